//! Pure prelude generation for server-entry bundles.
//!
//! Server-entry bundles are built for a Node-ish environment; this module
//! generates the JavaScript executed ahead of the bundle to give it the
//! globals it expects inside a bare `deno_core` runtime.

/// Generate the prelude executed before the server-entry bundle.
///
/// This is a pure function - transforms input into output string. The
/// environment name is escaped for safe string interpolation.
pub fn generate_prelude(node_env: &str) -> String {
    let node_env_escaped = node_env.replace('\\', "\\\\").replace('\'', "\\'");

    let console_polyfill = CONSOLE_POLYFILL;
    let performance_polyfill = PERFORMANCE_POLYFILL;
    let text_encoder_polyfill = TEXT_ENCODER_POLYFILL;

    format!(
        r#"
// Process polyfill (Node.js compatibility)
globalThis.process = {{
    env: {{ NODE_ENV: '{node_env_escaped}' }},
    nextTick: (fn) => queueMicrotask(fn),
}};

{console_polyfill}
{performance_polyfill}
{text_encoder_polyfill}
"#
    )
}

const CONSOLE_POLYFILL: &str = r#"
// Console polyfill - forward JS logs to Rust stdout
globalThis.console = {
    log: (...args) => Deno.core.print('[JS] ' + args.map(a => typeof a === 'object' ? JSON.stringify(a) : String(a)).join(' ') + '\n', false),
    error: (...args) => Deno.core.print('[JS ERROR] ' + args.map(a => typeof a === 'object' ? JSON.stringify(a) : String(a)).join(' ') + '\n', true),
    warn: (...args) => Deno.core.print('[JS WARN] ' + args.map(a => typeof a === 'object' ? JSON.stringify(a) : String(a)).join(' ') + '\n', false),
    info: (...args) => Deno.core.print('[JS] ' + args.map(a => typeof a === 'object' ? JSON.stringify(a) : String(a)).join(' ') + '\n', false),
    debug: () => {},
};
"#;

const PERFORMANCE_POLYFILL: &str = r#"
// Performance polyfill for timing
const performanceStart = Date.now();
globalThis.performance = { now: () => Date.now() - performanceStart };
"#;

const TEXT_ENCODER_POLYFILL: &str = r#"
// TextEncoder/TextDecoder polyfills
class TextEncoderPolyfill {
    encode(str) {
        const utf8 = unescape(encodeURIComponent(str));
        const result = new Uint8Array(utf8.length);
        for (let i = 0; i < utf8.length; i++) result[i] = utf8.charCodeAt(i);
        return result;
    }
    encodeInto(str, dest) {
        const encoded = this.encode(str);
        const len = Math.min(encoded.length, dest.length);
        dest.set(encoded.subarray(0, len));
        return { read: str.length, written: len };
    }
}
globalThis.TextEncoder = TextEncoderPolyfill;

class TextDecoderPolyfill {
    constructor(label = 'utf-8') { this.encoding = label.toLowerCase(); }
    decode(input) {
        if (!input) return '';
        const bytes = input instanceof Uint8Array ? input : new Uint8Array(input);
        let result = '';
        for (let i = 0; i < bytes.length; i++) result += String.fromCharCode(bytes[i]);
        return decodeURIComponent(escape(result));
    }
}
globalThis.TextDecoder = TextDecoderPolyfill;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_sets_node_env() {
        let result = generate_prelude("production");
        assert!(result.contains("NODE_ENV: 'production'"));
    }

    #[test]
    fn test_prelude_contains_all_polyfills() {
        let result = generate_prelude("development");
        assert!(result.contains("globalThis.process"));
        assert!(result.contains("globalThis.console"));
        assert!(result.contains("globalThis.performance"));
        assert!(result.contains("globalThis.TextEncoder"));
        assert!(result.contains("globalThis.TextDecoder"));
    }

    #[test]
    fn test_prelude_escapes_node_env() {
        // Special characters in the environment name must not break out of
        // the string literal
        let result = generate_prelude("test's \"env\"");
        assert!(result.contains("NODE_ENV: 'test\\'s \"env\"'"));
    }

    #[test]
    fn test_prelude_escapes_backslashes() {
        let result = generate_prelude("a\\b");
        assert!(result.contains("NODE_ENV: 'a\\\\b'"));
    }
}
