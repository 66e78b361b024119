use std::fmt;

/// Terminal failure of one pipeline stage, rendered verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn fetch_timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::FetchTimeout, message)
    }

    pub fn fetch_process(message: impl Into<String>) -> Self {
        Self::new(FailureKind::FetchProcess, message)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Extraction, message)
    }

    pub fn too_short(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ExtractionTooShort, message)
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Model, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network failure reaching a remote endpoint.
    Transport,
    /// External fetch exceeded its wall-clock bound.
    FetchTimeout,
    /// External fetch could not be spawned or reported an error.
    FetchProcess,
    /// Document could not be decoded or parsed.
    Extraction,
    ExtractionTooShort,
    Model,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::FetchTimeout => write!(f, "fetch timed out"),
            FailureKind::FetchProcess => write!(f, "fetch process error"),
            FailureKind::Extraction => write!(f, "extraction error"),
            FailureKind::ExtractionTooShort => write!(f, "extracted text too short"),
            FailureKind::Model => write!(f, "model error"),
        }
    }
}
