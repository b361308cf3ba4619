use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Remote store error{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    /// Whether a failed remote operation is worth repeating.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote { status: None, .. } => true,
            Self::Remote {
                status: Some(code), ..
            } => *code >= 500 || *code == 408 || *code == 429,
            Self::Io(_) => true,
            _ => false,
        }
    }
}
