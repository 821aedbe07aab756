use thiserror::Error;

/// Coarse failure class, used by callers to decide how to surface an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or unreachable input: the caller must fix the request.
    Input,
    /// The decode/transcode step failed; its message is passed through verbatim.
    Decode,
    /// An internal invariant was broken. Never expected on validated input.
    Computation,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("audio source not found: {0}")]
    SourceNotFound(String),

    #[error("failed to fetch audio source {url}: {reason}")]
    SourceUnreachable { url: String, reason: String },

    #[error("window size {0} is not a power of two")]
    WindowNotPowerOfTwo(usize),

    #[error("window size {0} is too small (minimum is 2)")]
    WindowTooSmall(usize),

    #[error("hop size {hop} must be between 1 and the window size {window}")]
    InvalidHopSize { hop: usize, window: usize },

    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,

    #[error("gate threshold {0} must lie in [0, 1]")]
    InvalidGateThreshold(f64),

    #[error("{0}")]
    Decode(String),

    #[error("internal invariant violated: {0}")]
    Computation(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::SourceNotFound(_)
            | AnalysisError::SourceUnreachable { .. }
            | AnalysisError::WindowNotPowerOfTwo(_)
            | AnalysisError::WindowTooSmall(_)
            | AnalysisError::InvalidHopSize { .. }
            | AnalysisError::InvalidSampleRate
            | AnalysisError::InvalidGateThreshold(_) => ErrorKind::Input,
            AnalysisError::Decode(_) => ErrorKind::Decode,
            AnalysisError::Computation(_) => ErrorKind::Computation,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
