use thiserror::Error;

/// Failure talking to the spending API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Failed to {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
    #[error("Failed to {operation} (HTTP {status})")]
    Status { operation: &'static str, status: u16 },
    #[error("Failed to {operation}: unreadable response ({message})")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn transport(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            operation,
            message: err.to_string(),
        }
    }

    pub fn decode(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            operation,
            message: err.to_string(),
        }
    }
}

/// Input rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Category name cannot be empty")]
    BlankCategoryName,
    #[error("Amount must be a number, got \"{0}\"")]
    InvalidAmount(String),
    #[error("Date must look like YYYY-MM-DD, got \"{0}\"")]
    InvalidDate(String),
    #[error("Please select a valid image file (JPG or PNG)")]
    UnsupportedImage(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
