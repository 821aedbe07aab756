//! Batch acoustic feature extraction for audio-reactive video.
//!
//! [`audio::analysis::analyze`] turns a decoded mono buffer into per-frame
//! loudness, dominant frequency band, spectral shape and a timbre
//! fingerprint. [`audio::source`], [`audio::decode`] and
//! [`audio::transcode`] get the buffer there.

pub mod audio;
pub mod error;

pub use audio::analysis::analyze;
pub use audio::features::{
    AnalysisOutput, AnalysisParams, AnalysisResult, BeatType, SampleBuffer, Summary,
};
pub use error::{AnalysisError, ErrorKind};
