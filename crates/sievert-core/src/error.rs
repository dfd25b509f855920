use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numeric degenerate: {0}")]
    NumericDegenerate(String),

    #[error("Render backend failure: {0}")]
    Backend(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SvError {
    /// Shorthand for building an [`SvError::InvalidParameter`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Whether this error ends the rendering session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

pub type Result<T> = std::result::Result<T, SvError>;
