use thiserror::Error;

use crate::sim::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core and its collaborators.
///
/// Physics itself never fails; these errors come from the edges
/// (settings, feed input, programmatic misuse of the body collection).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid settings value or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// NaN or infinite input where a finite value is required.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// No body with this id is owned by the simulation.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    /// A body with this id is already present.
    #[error("duplicate body {0}")]
    DuplicateBody(BodyId),

    /// Every body id has been handed out.
    #[error("body ids exhausted")]
    IdsExhausted,

    /// Malformed feed event. Callers log it and keep going.
    #[error("malformed feed event: {0}")]
    Feed(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors the caller should log and skip rather than abort on.
    pub fn is_non_fatal(&self) -> bool {
        matches!(self, Error::Feed(_))
    }
}
