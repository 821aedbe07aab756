mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use cli::{Cli, DecoderBackend};
use pulsescan::audio::{decode, source, transcode};
use pulsescan::{analyze, AnalysisParams};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    if let Some(ref path) = config::find_config(cli.config.as_deref()) {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.window_size == 2048 { cli.window_size = cfg.analysis.window_size; }
            if cli.hop_size == 512 { cli.hop_size = cfg.analysis.hop_size; }
            if cli.gate_threshold == 0.05 { cli.gate_threshold = cfg.analysis.gate_threshold; }
            if cli.decoder == DecoderBackend::Symphonia { cli.decoder = cfg.decode.backend; }
            if cli.sample_rate == 44100 { cli.sample_rate = cfg.decode.sample_rate; }
            if !cli.pretty { cli.pretty = cfg.output.pretty; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    log::info!("pulsescan - audio feature analysis");
    log::info!("Input: {}", cli.input);
    log::info!(
        "Window: {} samples, hop: {} samples, gate: {:.2}",
        cli.window_size, cli.hop_size, cli.gate_threshold
    );

    // 1. Fetch
    let audio_source = source::fetch(&cli.input)
        .with_context(|| format!("Failed to load audio source {}", cli.input))?;

    // 2. Decode
    log::info!("Decoding audio ({:?})...", cli.decoder);
    let buffer = match cli.decoder {
        DecoderBackend::Symphonia => decode::decode_bytes(&audio_source),
        DecoderBackend::Ffmpeg => transcode::transcode_with_ffmpeg(&audio_source, cli.sample_rate),
    }
    .context("Failed to decode audio")?;

    // 3. Analyze
    let params = AnalysisParams {
        window_size: cli.window_size,
        hop_size: cli.hop_size,
        gate_threshold: cli.gate_threshold,
    };
    let output = analyze(&buffer, &params).context("Audio analysis failed")?;

    // 4. Emit
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Done! Output: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
        }
    }

    log::info!(
        "{} frames over {:.1}s (low={}, mid={}, high={})",
        output.summary.frame_count,
        output.duration_in_seconds,
        output.summary.low_count,
        output.summary.mid_count,
        output.summary.high_count
    );
    Ok(())
}
