/// Crate-wide result alias.
pub type MissionResult<T> = Result<T, MissionError>;

/// Errors produced by the countdown engine, the compositor and their configuration.
#[derive(thiserror::Error, Debug)]
pub enum MissionError {
    /// Input or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel buffer could not be keyed (size mismatch, unreadable surface).
    #[error("keying error: {0}")]
    Keying(String),

    /// A media source could not be probed, decoded or written.
    #[error("media error: {0}")]
    Media(String),

    /// A configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Any other error, with source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MissionError {
    /// Build a [`MissionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MissionError::Keying`].
    pub fn keying(msg: impl Into<String>) -> Self {
        Self::Keying(msg.into())
    }

    /// Build a [`MissionError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`MissionError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
