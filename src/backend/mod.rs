use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::error::{AppError, AppResult};

mod hayro;
mod traits;

pub use hayro::{HayroDocument, HayroEngine};
pub use traits::{PageViewport, PdfBackend, PdfEngine, RgbaFrame};

static DEFAULT_ENGINE: OnceLock<Arc<dyn PdfEngine>> = OnceLock::new();

/// Process-wide engine handle, created on first use.
pub fn default_engine() -> Arc<dyn PdfEngine> {
    Arc::clone(DEFAULT_ENGINE.get_or_init(|| {
        tracing::debug!("initializing hayro pdf engine");
        Arc::new(HayroEngine)
    }))
}

pub fn load_shared_bytes(path: impl AsRef<Path>) -> AppResult<Arc<Vec<u8>>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(AppError::invalid_argument("pdf path must not be empty"));
    }
    if !path.exists() {
        return Err(AppError::io_with_context(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"),
            format!("pdf file not found: {}", path.display()),
        ));
    }
    if !path.is_file() {
        return Err(AppError::invalid_argument(
            "pdf path must be a regular file",
        ));
    }

    let bytes = std::fs::read(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to read {}", path.display()))
    })?;
    Ok(Arc::new(bytes))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::error::AppError;

    use super::{default_engine, load_shared_bytes};

    #[test]
    fn default_engine_is_initialized_once() {
        let first = default_engine();
        let second = default_engine();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "hayro");
    }

    #[test]
    fn load_shared_bytes_rejects_directory_path() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let result = load_shared_bytes(dir.path());
        assert!(matches!(
            result,
            Err(AppError::InvalidArgument(message))
                if message == "pdf path must be a regular file"
        ));
    }

    #[test]
    fn load_shared_bytes_reports_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let result = load_shared_bytes(dir.path().join("nope.pdf"));
        assert!(matches!(result, Err(AppError::Io { .. })));
    }
}
