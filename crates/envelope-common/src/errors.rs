use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the persisted "already tracked" flag.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("flag store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid flag key: {0:?}")]
    InvalidKey(String),
}

/// Local failures of the analytics transport.
///
/// There is deliberately no variant for a rejected request: the response
/// of a dispatch is never inspected.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not build dispatcher: {0}")]
    Build(String),
}

/// Failures reported by an audio channel when asked to start playback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The start request was superseded by a pause before it resolved.
    #[error("playback start interrupted")]
    Interrupted,

    #[error("no playable source among {0} candidates")]
    NoSource(usize),

    #[error("audio device error: {0}")]
    Device(String),
}

impl PlaybackError {
    /// Interruptions are an expected race with rapid close/open and are not
    /// worth reporting.
    pub fn is_interruption(&self) -> bool {
        matches!(self, PlaybackError::Interrupted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
