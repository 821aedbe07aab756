use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::DecoderBackend;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,
    #[serde(default = "default_gate_threshold")]
    pub gate_threshold: f64,
}

#[derive(Debug, Deserialize)]
pub struct DecodeConfig {
    #[serde(default)]
    pub backend: DecoderBackend,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            hop_size: default_hop_size(),
            gate_threshold: default_gate_threshold(),
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            backend: DecoderBackend::default(),
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_window_size() -> usize { 2048 }
fn default_hop_size() -> usize { 512 }
fn default_gate_threshold() -> f64 { 0.05 }
fn default_sample_rate() -> u32 { 44100 }

/// Explicit path first, then `pulsescan.toml` in the working directory,
/// then the per-user config locations.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("pulsescan.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("pulsescan").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("pulsescan").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<Config> {
    match toml::from_str(content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.analysis.window_size, 2048);
        assert_eq!(cfg.analysis.hop_size, 512);
        assert_eq!(cfg.analysis.gate_threshold, 0.05);
        assert_eq!(cfg.decode.backend, DecoderBackend::Symphonia);
        assert_eq!(cfg.decode.sample_rate, 44100);
        assert!(!cfg.output.pretty);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_config(
            r#"
            [analysis]
            window_size = 4096

            [decode]
            backend = "ffmpeg"
            sample_rate = 22050

            [output]
            pretty = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.analysis.window_size, 4096);
        assert_eq!(cfg.analysis.hop_size, 512);
        assert_eq!(cfg.decode.backend, DecoderBackend::Ffmpeg);
        assert_eq!(cfg.decode.sample_rate, 22050);
        assert!(cfg.output.pretty);
    }

    #[test]
    fn malformed_config_is_ignored() {
        assert!(parse_config("[analysis]\nwindow_size = \"big\"").is_none());
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/etc/somewhere/custom.toml");
        assert_eq!(find_config(Some(path)), Some(path.to_path_buf()));
    }
}
