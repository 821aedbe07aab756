use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use super::decode::samples_from_s16le;
use super::features::SampleBuffer;
use super::source::AudioSource;
use crate::error::{AnalysisError, Result};

/// Decodes a source by piping it through an external `ffmpeg`, which emits
/// mono signed 16-bit little-endian PCM at `sample_rate`.
///
/// Failures are reported with ffmpeg's own stderr and are not retried.
pub fn transcode_with_ffmpeg(source: &AudioSource, sample_rate: u32) -> Result<SampleBuffer> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidSampleRate);
    }

    let args = ffmpeg_args(sample_rate);

    let mut child = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            AnalysisError::Decode(format!("Failed to spawn ffmpeg. Is ffmpeg installed? ({})", e))
        })?;

    log::info!("FFmpeg transcoder started: {} -> s16le mono @ {}Hz", source.location, sample_rate);

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| AnalysisError::Decode("FFmpeg stdin not available".into()))?;
    let input = source.bytes.clone();
    // Feed stdin from its own thread so a full stdout pipe cannot deadlock us.
    let writer = thread::spawn(move || {
        // ffmpeg may close stdin early once it has seen enough; the exit status
        // below is the authoritative result.
        if let Err(e) = stdin.write_all(&input) {
            log::debug!("FFmpeg stdin closed early: {}", e);
        }
    });

    let output = child
        .wait_with_output()
        .map_err(|e| AnalysisError::Decode(format!("Failed to wait for ffmpeg: {}", e)))?;
    if writer.join().is_err() {
        return Err(AnalysisError::Computation("ffmpeg stdin writer panicked".into()));
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AnalysisError::Decode(stderr.trim().to_string()));
    }

    let samples = samples_from_s16le(&output.stdout);
    log::info!(
        "Transcoded audio: {} samples, {}Hz, {:.1}s",
        samples.len(),
        sample_rate,
        samples.len() as f32 / sample_rate as f32
    );

    Ok(SampleBuffer::new(samples, sample_rate))
}

fn ffmpeg_args(sample_rate: u32) -> Vec<String> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(), "error".into(),
        "-i".into(), "pipe:0".into(),
        "-vn".into(),
        "-f".into(), "s16le".into(),
        "-acodec".into(), "pcm_s16le".into(),
        "-ac".into(), "1".into(),
        "-ar".into(), sample_rate.to_string(),
        "pipe:1".into(),
    ]
}
