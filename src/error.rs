pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("failed to decode PDF: {0}")]
    Decode(String),
    #[error("PDF render failed for page {page}")]
    PdfRender {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("text extraction failed for page {page}")]
    Extraction {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("this text is already saved")]
    SaveConflict,
    #[error("document store error: {0}")]
    Persistence(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn pdf_render(page: usize, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::PdfRender {
            page,
            source: Box::new(source),
        }
    }

    pub fn extraction(page: usize, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Extraction {
            page,
            source: Box::new(source),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn pdf_render_error_wraps_page_and_source() {
        let err = AppError::pdf_render(7, AppError::invalid_argument("bad page"));
        assert!(matches!(err, AppError::PdfRender { page: 7, .. }));
        assert_eq!(err.to_string(), "PDF render failed for page 7");
    }

    #[test]
    fn extraction_error_reports_one_based_page() {
        let err = AppError::extraction(2, AppError::unsupported("broken content stream"));
        assert!(matches!(err, AppError::Extraction { page: 2, .. }));
        assert_eq!(err.to_string(), "text extraction failed for page 2");
    }

    #[test]
    fn save_conflict_has_user_facing_message() {
        assert_eq!(AppError::SaveConflict.to_string(), "this text is already saved");
    }
}
