use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pulsescan", about = "Per-frame acoustic features for audio-reactive video")]
pub struct Cli {
    /// Input audio file path or http(s) URL (WAV, MP3, FLAC, OGG, AAC)
    pub input: String,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Analysis window in samples (power of two)
    #[arg(long, default_value_t = 2048)]
    pub window_size: usize,

    /// Hop between frame starts in samples
    #[arg(long, default_value_t = 512)]
    pub hop_size: usize,

    /// Frames with normalized intensity below this are dropped (0.0-1.0)
    #[arg(long, default_value_t = 0.05)]
    pub gate_threshold: f64,

    /// Decoder used to turn the input into PCM
    #[arg(long, value_enum, default_value_t = DecoderBackend::Symphonia)]
    pub decoder: DecoderBackend,

    /// Target sample rate for the ffmpeg decoder
    #[arg(long, default_value_t = 44100)]
    pub sample_rate: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file (defaults to pulsescan.toml or ~/.config/pulsescan/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderBackend {
    /// In-process decoding
    #[default]
    Symphonia,
    /// External ffmpeg transcode to s16le
    Ffmpeg,
}
