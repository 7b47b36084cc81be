use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("Account is blocked")]
    AccountBlocked,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("No valid files were uploaded")]
    NoValidFiles,

    #[error("Payload too large: {actual} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: u64, actual: u64 },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// How the request boundary reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Send the caller back to the login page.
    RedirectToLogin,
    /// Show a warning and stay on the current view; nothing changed.
    Warn,
    /// Show a warning and go back to the listing view.
    WarnAndRedirectToListing,
    /// Re-render the originating form with the message.
    RerenderForm,
    /// Generic failure; the request is aborted.
    Fatal,
}

impl ApiError {
    pub fn disposition(&self) -> ErrorDisposition {
        match self {
            ApiError::Unauthenticated => ErrorDisposition::RedirectToLogin,
            ApiError::Forbidden(_)
            | ApiError::AccountBlocked
            | ApiError::NoValidFiles
            | ApiError::PayloadTooLarge { .. } => ErrorDisposition::Warn,
            ApiError::NotFound(_) => ErrorDisposition::WarnAndRedirectToListing,
            ApiError::ValidationError(_)
            | ApiError::Conflict(_)
            | ApiError::InvalidCredential
            | ApiError::InvalidState(_) => ErrorDisposition::RerenderForm,
            ApiError::StorageError(_) | ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                ErrorDisposition::Fatal
            }
        }
    }

    /// Message safe to show to the end user. Infrastructure details are never exposed.
    pub fn user_message(&self) -> String {
        match self.disposition() {
            ErrorDisposition::Fatal => "Unexpected failure, please try again.".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} not found"))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApiError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}
