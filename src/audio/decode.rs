use std::io::Cursor;

use symphonia::core::audio::SampleBuffer as SymphoniaBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::features::SampleBuffer;
use super::source::AudioSource;
use crate::error::{AnalysisError, Result};

/// Full-scale value of a signed 16-bit sample.
const I16_SCALE: f32 = 32768.0;

/// Decodes a fetched source in-process, downmixing to mono.
pub fn decode_bytes(source: &AudioSource) -> Result<SampleBuffer> {
    let cursor = Cursor::new(source.bytes.clone());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(ref ext) = source.extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| decode_error("Failed to probe audio format", e))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::Decode("No audio tracks found".into()))?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::Decode("Unknown sample rate".into()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_error("Failed to create audio decoder", e))?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(decode_error("Failed to read packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(decode_error("Failed to decode packet", e)),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SymphoniaBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        let samples = sample_buf.samples();

        // Downmix to mono
        if channels == 1 {
            all_samples.extend_from_slice(samples);
        } else {
            for frame_samples in samples.chunks(channels) {
                let mono: f32 = frame_samples.iter().sum::<f32>() / channels as f32;
                all_samples.push(mono);
            }
        }
    }

    log::info!(
        "Decoded audio: {} samples, {}Hz, {:.1}s",
        all_samples.len(),
        sample_rate,
        all_samples.len() as f32 / sample_rate as f32
    );

    Ok(SampleBuffer::new(all_samples, sample_rate))
}

/// Converts signed 16-bit little-endian PCM into normalized floats.
/// A trailing odd byte is ignored.
pub fn samples_from_s16le(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / I16_SCALE)
        .collect()
}

fn decode_error(context: &str, err: SymphoniaError) -> AnalysisError {
    AnalysisError::Decode(format!("{}: {}", context, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn wav_source(channels: u16, frames: &[[i16; 2]]) -> AudioSource {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut bytes = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            for frame in frames {
                for &s in &frame[..channels as usize] {
                    writer.write_sample(s).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        AudioSource {
            location: "memory.wav".into(),
            bytes,
            extension: Some("wav".into()),
        }
    }

    #[test]
    fn s16le_is_normalized() {
        let bytes = [0x00, 0x80, 0xff, 0x7f, 0x00, 0x00, 0x00, 0x40, 0x12];
        let samples = samples_from_s16le(&bytes);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], -1.0);
        assert!((samples[1] - 32767.0 / 32768.0).abs() < 1e-7);
        assert_eq!(samples[2], 0.0);
        assert_eq!(samples[3], 0.5);
    }

    #[test]
    fn decodes_mono_wav() {
        let frames: Vec<[i16; 2]> = (0..1000).map(|i| [(i * 16) as i16, 0]).collect();
        let buffer = decode_bytes(&wav_source(1, &frames)).unwrap();
        assert_eq!(buffer.sample_rate, 22050);
        assert_eq!(buffer.samples.len(), 1000);
        assert!((buffer.samples[500] - 8000.0 / 32768.0).abs() < 1e-4);
    }

    #[test]
    fn downmixes_stereo_wav() {
        let frames = vec![[16384i16, -16384i16]; 256];
        let frames: Vec<[i16; 2]> = frames
            .into_iter()
            .chain(std::iter::repeat([16384, 16384]).take(256))
            .collect();
        let buffer = decode_bytes(&wav_source(2, &frames)).unwrap();
        assert_eq!(buffer.samples.len(), 512);
        assert!(buffer.samples[0].abs() < 1e-4);
        assert!((buffer.samples[400] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn garbage_is_decode_error() {
        let source = AudioSource {
            location: "noise.bin".into(),
            bytes: vec![0x42; 512],
            extension: None,
        };
        let err = decode_bytes(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
