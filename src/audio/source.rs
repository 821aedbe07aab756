use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Encoded audio as fetched, before decoding.
#[derive(Clone, Debug)]
pub struct AudioSource {
    /// Where the bytes came from (path or URL), for log and error messages
    pub location: String,
    pub bytes: Vec<u8>,
    /// File extension, used as a format probe hint
    pub extension: Option<String>,
}

/// Reads a local file, or downloads `http://` / `https://` locations.
pub fn fetch(location: &str) -> Result<AudioSource> {
    let bytes = if is_url(location) {
        fetch_url(location)?
    } else {
        read_file(Path::new(location))?
    };

    log::info!("Fetched {} bytes from {}", bytes.len(), location);

    Ok(AudioSource {
        location: location.to_string(),
        bytes,
        extension: extension_of(location),
    })
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(AnalysisError::SourceNotFound(path.display().to_string()));
    }
    std::fs::read(path).map_err(|e| AnalysisError::SourceUnreachable {
        url: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let unreachable = |reason: String| AnalysisError::SourceUnreachable {
        url: url.to_string(),
        reason,
    };

    let response = reqwest::blocking::get(url).map_err(|e| unreachable(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(unreachable(format!("HTTP {}", status)));
    }
    let bytes = response.bytes().map_err(|e| unreachable(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Extension of the last path segment, ignoring any URL query or fragment.
fn extension_of(location: &str) -> Option<String> {
    let path = location.split(&['?', '#'][..]).next().unwrap_or(location);
    let name = path.rsplit('/').next().unwrap_or(path);
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
