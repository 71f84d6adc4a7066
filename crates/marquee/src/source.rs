//! Mode-resolved page sources.
//!
//! The development/production split is decided once at startup and captured
//! as a variant here; request handlers only ever call `resolve` and never
//! branch on the mode themselves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use marquee_ssr::{load_bundle, Result, SsrError};

use crate::config;
use crate::dev::{self, DevServer};

/// Template and bundle resolved for one request.
pub struct ResolvedPage {
    pub template: String,
    pub bundle: Arc<str>,
}

/// Where templates and render bundles come from.
pub enum RenderSource {
    /// Re-read and transform on every request; an external watch build keeps
    /// the files fresh and changes land without a restart.
    Dev {
        root: PathBuf,
        template_path: PathBuf,
        entry_path: PathBuf,
        server: DevServer,
    },
    /// Cached once at startup, reused read-only for the process lifetime.
    Prod {
        template: String,
        bundle: Arc<str>,
        assets_dir: PathBuf,
    },
}

impl RenderSource {
    /// Development source rooted at the project directory.
    pub fn dev(root: &Path, server: DevServer) -> Self {
        RenderSource::Dev {
            root: root.to_path_buf(),
            template_path: root.join(config::DEV_TEMPLATE),
            entry_path: root.join(config::SERVER_ENTRY),
            server,
        }
    }

    /// Production source; reads the built template and bundle eagerly.
    ///
    /// Fails when either file is missing - there is no fallback and the
    /// process must not start without them.
    pub fn prod(root: &Path) -> Result<Self> {
        let template_path = root.join(config::PROD_TEMPLATE);
        let template =
            std::fs::read_to_string(&template_path).map_err(|e| SsrError::TemplateLoad {
                path: template_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let bundle = load_bundle(&root.join(config::SERVER_ENTRY))?;

        Ok(RenderSource::Prod {
            template,
            bundle,
            assets_dir: root.join(config::CLIENT_ASSETS),
        })
    }

    /// Obtain the template and render bundle for one request.
    pub fn resolve(&self) -> Result<ResolvedPage> {
        match self {
            RenderSource::Dev {
                template_path,
                entry_path,
                ..
            } => {
                let raw = std::fs::read_to_string(template_path).map_err(|e| {
                    SsrError::TemplateLoad {
                        path: template_path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?;

                Ok(ResolvedPage {
                    template: dev::transform_index_html(&raw),
                    bundle: load_bundle(entry_path)?,
                })
            }
            RenderSource::Prod {
                template, bundle, ..
            } => Ok(ResolvedPage {
                template: template.clone(),
                bundle: Arc::clone(bundle),
            }),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, RenderSource::Dev { .. })
    }

    /// The dev server handle, when running in development mode.
    pub fn dev_server(&self) -> Option<&DevServer> {
        match self {
            RenderSource::Dev { server, .. } => Some(server),
            RenderSource::Prod { .. } => None,
        }
    }

    /// Map internal script names in a JS stack back to source locations.
    /// Production stacks are passed through untouched.
    pub fn fix_stack_trace(&self, stack: &str) -> String {
        match self {
            RenderSource::Dev { entry_path, .. } => dev::fix_stack_trace(stack, entry_path),
            RenderSource::Prod { .. } => stack.to_string(),
        }
    }
}
