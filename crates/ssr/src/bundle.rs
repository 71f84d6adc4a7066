//! Server-entry bundle loading.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, SsrError};

/// Read a server-entry bundle from disk.
///
/// Validates that the path resolves to a `.js` file before reading.
pub fn load_bundle(path: &Path) -> Result<Arc<str>> {
    let canonical = path.canonicalize().map_err(|e| SsrError::BundleLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if canonical.extension() != Some(OsStr::new("js")) {
        return Err(SsrError::BundleLoad {
            path: path.display().to_string(),
            reason: "Bundle must be a .js file".to_string(),
        });
    }

    let code = std::fs::read_to_string(&canonical).map_err(|e| SsrError::BundleLoad {
        path: canonical.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(Arc::from(code))
}
