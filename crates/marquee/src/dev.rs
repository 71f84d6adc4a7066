//! Development middleware: file watching and browser live reload.
//!
//! The watcher polls the project root; every debounced change fans out on a
//! broadcast channel that the `/_dev/events` SSE endpoint relays to browsers.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config as NotifyConfig, PollWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer_opt, DebounceEventResult, Debouncer};
use tokio::sync::broadcast;

use marquee_ssr::ENTRY_SCRIPT_NAME;

/// Client script injected into the development template; reloads the page
/// when the server signals a change on the SSE channel.
const RELOAD_CLIENT: &str = r#"<script>
(() => {
    const es = new EventSource('/_dev/events');
    let retryCount = 0;

    es.addEventListener('reload', () => {
        console.log('[dev] Reload signal received, refreshing...');
        location.reload();
    });

    es.addEventListener('connected', () => {
        console.log('[dev] Live reload connected');
        retryCount = 0;
    });

    es.onerror = () => {
        retryCount++;
        if (retryCount <= 10) {
            setTimeout(() => location.reload(), 2000);
        }
    };
})();
</script>"#;

/// Dev-mode live state: the polling watcher and the reload channel.
pub struct DevServer {
    reload_tx: broadcast::Sender<()>,
    // Held only for its Drop, which stops the watcher thread; the Mutex
    // makes the handle shareable across request tasks.
    _watcher: Mutex<Debouncer<PollWatcher>>,
}

impl DevServer {
    /// Watch the project root and broadcast a reload signal on every change.
    pub fn spawn(root: &Path, poll_interval: Duration) -> anyhow::Result<Self> {
        let (reload_tx, _) = broadcast::channel(16);

        let tx = reload_tx.clone();
        let backend_config = NotifyConfig::default().with_poll_interval(poll_interval);
        let debounce_config = notify_debouncer_mini::Config::default()
            .with_timeout(poll_interval)
            .with_notify_config(backend_config);

        let mut watcher =
            new_debouncer_opt::<_, PollWatcher>(debounce_config, move |res: DebounceEventResult| {
                match res {
                    Ok(events) => {
                        tracing::debug!(count = events.len(), "File change detected");
                        let _ = tx.send(());
                    }
                    Err(e) => tracing::warn!(error = %e, "File watcher error"),
                }
            })?;
        watcher.watcher().watch(root, RecursiveMode::Recursive)?;

        tracing::info!(
            root = %root.display(),
            interval_ms = poll_interval.as_millis() as u64,
            "Dev watcher started"
        );

        Ok(Self {
            reload_tx,
            _watcher: Mutex::new(watcher),
        })
    }

    /// Subscribe to reload signals (for the SSE endpoint).
    pub fn subscribe_reload(&self) -> broadcast::Receiver<()> {
        self.reload_tx.subscribe()
    }
}

/// Inject the live-reload client into a development template.
///
/// Placed before `</head>` when present, before `</body>` otherwise,
/// appended as a last resort.
pub fn transform_index_html(template: &str) -> String {
    for anchor in ["</head>", "</body>"] {
        if let Some(idx) = template.find(anchor) {
            let mut out = String::with_capacity(template.len() + RELOAD_CLIENT.len());
            out.push_str(&template[..idx]);
            out.push_str(RELOAD_CLIENT);
            out.push_str(&template[idx..]);
            return out;
        }
    }

    let mut out = template.to_string();
    out.push_str(RELOAD_CLIENT);
    out
}

/// Rewrite the runtime's internal entry script name in a JS stack trace to
/// the on-disk bundle path.
pub fn fix_stack_trace(stack: &str, entry_path: &Path) -> String {
    stack.replace(ENTRY_SCRIPT_NAME, &entry_path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_transform_injects_before_head_close() {
        let template = "<html><head><title>t</title></head><body></body></html>";
        let out = transform_index_html(template);

        assert!(out.contains("EventSource('/_dev/events')"));
        let script_at = out.find("<script>").unwrap();
        let head_close_at = out.find("</head>").unwrap();
        assert!(script_at < head_close_at);
    }

    #[test]
    fn test_transform_falls_back_to_body_close() {
        let template = "<html><body><div></div></body></html>";
        let out = transform_index_html(template);

        let script_at = out.find("<script>").unwrap();
        let body_close_at = out.find("</body>").unwrap();
        assert!(script_at < body_close_at);
    }

    #[test]
    fn test_transform_appends_without_anchors() {
        let template = "<div>bare fragment</div>";
        let out = transform_index_html(template);

        assert!(out.starts_with(template));
        assert!(out.ends_with("</script>"));
    }

    #[test]
    fn test_fix_stack_trace_rewrites_entry_name() {
        let entry = PathBuf::from("/srv/app/dist/server/entry-server.js");
        let stack = format!("Error: boom\n    at render ({ENTRY_SCRIPT_NAME}:3:11)");
        let fixed = fix_stack_trace(&stack, &entry);

        assert!(fixed.contains("/srv/app/dist/server/entry-server.js:3:11"));
        assert!(!fixed.contains(ENTRY_SCRIPT_NAME));
    }
}
