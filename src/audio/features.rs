use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Number of timbre coefficients per frame.
pub const TIMBRE_COEFFICIENTS: usize = 13;

/// Frames whose normalized intensity falls below this are dropped from the output.
pub const DEFAULT_GATE_THRESHOLD: f64 = 0.05;

/// Decoded mono PCM, normalized to [-1, 1].
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds, 0 when the sample rate is unset.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisParams {
    /// Frame length in samples. Must be a power of two.
    pub window_size: usize,
    /// Distance between frame starts in samples.
    pub hop_size: usize,
    /// Normalized intensity below which a frame is suppressed as silence.
    pub gate_threshold: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 512,
            gate_threshold: DEFAULT_GATE_THRESHOLD,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() {
            return Err(AnalysisError::WindowNotPowerOfTwo(self.window_size));
        }
        if self.window_size < 2 {
            return Err(AnalysisError::WindowTooSmall(self.window_size));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(AnalysisError::InvalidHopSize {
                hop: self.hop_size,
                window: self.window_size,
            });
        }
        if !(0.0..=1.0).contains(&self.gate_threshold) {
            return Err(AnalysisError::InvalidGateThreshold(self.gate_threshold));
        }
        Ok(())
    }
}

/// Coarse band of a frame's dominant frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BeatType {
    Low,
    Mid,
    High,
}

impl BeatType {
    pub const LOW_MID_BOUNDARY_HZ: f64 = 250.0;
    pub const MID_HIGH_BOUNDARY_HZ: f64 = 2000.0;

    /// Buckets a frequency; lower bounds are inclusive.
    pub fn classify(frequency: f64) -> Self {
        if frequency < Self::LOW_MID_BOUNDARY_HZ {
            BeatType::Low
        } else if frequency < Self::MID_HIGH_BOUNDARY_HZ {
            BeatType::Mid
        } else {
            BeatType::High
        }
    }
}

/// Features of one retained frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Frame start in seconds
    pub timestamp: f64,
    /// Normalized loudness (0.0-1.0)
    pub intensity: f64,
    /// Dominant frequency (Hz)
    pub frequency: f64,
    pub beat_type: BeatType,
    /// Bin-normalized spectral centroid (0.0-1.0)
    pub spectral_centroid: f64,
    /// Bin-normalized 85% rolloff point (0.0-1.0)
    pub spectral_rolloff: f64,
    /// Sign changes per adjacent sample pair (0.0-1.0)
    pub zero_crossing_rate: f64,
    pub timbre: [f64; TIMBRE_COEFFICIENTS],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(rename = "totalBeats")]
    pub frame_count: usize,
    pub average_intensity: f64,
    #[serde(rename = "lowBeats")]
    pub low_count: usize,
    #[serde(rename = "midBeats")]
    pub mid_count: usize,
    #[serde(rename = "highBeats")]
    pub high_count: usize,
}

impl Summary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Summary {
            frame_count: results.len(),
            ..Default::default()
        };
        let mut total_intensity = 0.0;
        for result in results {
            total_intensity += result.intensity;
            match result.beat_type {
                BeatType::Low => summary.low_count += 1,
                BeatType::Mid => summary.mid_count += 1,
                BeatType::High => summary.high_count += 1,
            }
        }
        if !results.is_empty() {
            summary.average_intensity = total_intensity / results.len() as f64;
        }
        summary
    }
}

/// Whole-buffer analysis, in ascending timestamp order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    #[serde(rename = "analysis")]
    pub results: Vec<AnalysisResult>,
    pub duration_in_seconds: f64,
    pub summary: Summary,
}
