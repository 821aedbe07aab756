use rayon::prelude::*;

use super::features::{AnalysisOutput, AnalysisParams, AnalysisResult, BeatType, SampleBuffer, Summary};
use super::fft::{fft_real, magnitude_spectrum};
use super::loudness::{frame_rms, passes_gate, RmsRange};
use super::spectral::{dominant_frequency, spectral_centroid, spectral_rolloff, zero_crossing_rate};
use super::timbre::timbre_coefficients;
use super::window::{apply_window, frame_count, frame_start, hann_window};
use crate::error::{AnalysisError, Result};

/// Analyzes a whole buffer into time-ordered per-frame features.
///
/// Loudness is normalized against the quietest and loudest frame of the
/// entire buffer, so the result depends on the full input and cannot be
/// produced incrementally.
pub fn analyze(buffer: &SampleBuffer, params: &AnalysisParams) -> Result<AnalysisOutput> {
    params.validate()?;
    if buffer.sample_rate == 0 {
        return Err(AnalysisError::InvalidSampleRate);
    }

    let samples = &buffer.samples;
    let duration = buffer.duration();
    let num_frames = frame_count(samples.len(), params);

    if num_frames == 0 {
        log::info!(
            "Buffer of {} samples is shorter than one window ({}), nothing to analyze",
            samples.len(),
            params.window_size
        );
        return Ok(AnalysisOutput {
            results: Vec::new(),
            duration_in_seconds: duration,
            summary: Summary::default(),
        });
    }

    let window = hann_window(params.window_size);

    log::info!("Pass 1: Frame loudness ({} frames)...", num_frames);
    let rms_values = (0..num_frames)
        .into_par_iter()
        .map(|i| -> Result<f64> {
            let raw = frame(samples, i, params)?;
            Ok(frame_rms(&apply_window(raw, &window)))
        })
        .collect::<Result<Vec<f64>>>()?;

    let range = RmsRange::from_values(&rms_values)
        .ok_or_else(|| AnalysisError::Computation("no RMS values for non-empty frame set".into()))?;

    log::info!(
        "Pass 2: Normalization & gating (min_rms={:.6}, max_rms={:.6}, gate={:.2})...",
        range.min,
        range.max,
        params.gate_threshold
    );
    let retained: Vec<(usize, f64)> = rms_values
        .iter()
        .enumerate()
        .map(|(i, &rms)| (i, range.normalize(rms)))
        .filter(|&(_, intensity)| passes_gate(intensity, params.gate_threshold))
        .collect();
    log::debug!("{} of {} frames passed the gate", retained.len(), num_frames);

    log::info!("Pass 3: Spectral features ({} frames)...", retained.len());
    let results = retained
        .par_iter()
        .map(|&(i, intensity)| -> Result<AnalysisResult> {
            let raw = frame(samples, i, params)?;
            let timestamp = frame_start(i, params) as f64 / buffer.sample_rate as f64;
            extract_frame(raw, &window, buffer.sample_rate, timestamp, intensity)
        })
        .collect::<Result<Vec<AnalysisResult>>>()?;

    let summary = Summary::from_results(&results);
    log::info!(
        "Analysis: frames={}, avg_intensity={:.3}, low={}, mid={}, high={}",
        summary.frame_count,
        summary.average_intensity,
        summary.low_count,
        summary.mid_count,
        summary.high_count
    );

    Ok(AnalysisOutput {
        results,
        duration_in_seconds: duration,
        summary,
    })
}

fn frame<'a>(samples: &'a [f32], index: usize, params: &AnalysisParams) -> Result<&'a [f32]> {
    let start = frame_start(index, params);
    samples.get(start..start + params.window_size).ok_or_else(|| {
        AnalysisError::Computation(format!(
            "frame {} ({}..{}) exceeds buffer of {} samples",
            index,
            start,
            start + params.window_size,
            samples.len()
        ))
    })
}

fn extract_frame(
    raw: &[f32],
    window: &[f64],
    sample_rate: u32,
    timestamp: f64,
    intensity: f64,
) -> Result<AnalysisResult> {
    let windowed = apply_window(raw, window);
    let spectrum = fft_real(&windowed)?;
    let magnitudes = magnitude_spectrum(&spectrum);

    let frequency = dominant_frequency(&magnitudes, sample_rate, raw.len());

    Ok(AnalysisResult {
        timestamp,
        intensity,
        frequency,
        beat_type: BeatType::classify(frequency),
        spectral_centroid: spectral_centroid(&magnitudes),
        spectral_rolloff: spectral_rolloff(&magnitudes),
        zero_crossing_rate: zero_crossing_rate(raw),
        timbre: timbre_coefficients(&magnitudes),
    })
}
