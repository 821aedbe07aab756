//! Dominant-frequency lookup and spectral shape descriptors.
//!
//! All functions take the half spectrum produced by
//! [`magnitude_spectrum`](super::fft::magnitude_spectrum).

const ROLLOFF_FRACTION: f64 = 0.85;

/// Index of the strongest bin; the first one wins on ties.
pub fn dominant_bin(magnitudes: &[f64]) -> usize {
    let mut best = 0;
    for (i, &mag) in magnitudes.iter().enumerate() {
        if mag > magnitudes[best] {
            best = i;
        }
    }
    best
}

/// Dominant frequency in Hz for a spectrum taken from `fft_size` samples.
pub fn dominant_frequency(magnitudes: &[f64], sample_rate: u32, fft_size: usize) -> f64 {
    dominant_bin(magnitudes) as f64 * sample_rate as f64 / fft_size as f64
}

/// Magnitude-weighted mean bin, divided by the spectrum length.
pub fn spectral_centroid(magnitudes: &[f64]) -> f64 {
    let total: f64 = magnitudes.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let weighted: f64 = magnitudes
        .iter()
        .enumerate()
        .map(|(i, &mag)| i as f64 * mag)
        .sum();
    weighted / total / magnitudes.len() as f64
}

/// Fraction of the spectrum below which 85% of the magnitude lies.
/// Returns 1.0 when the threshold is never reached.
pub fn spectral_rolloff(magnitudes: &[f64]) -> f64 {
    let total: f64 = magnitudes.iter().sum();
    let threshold = total * ROLLOFF_FRACTION;
    let mut cumulative = 0.0;
    for (i, &mag) in magnitudes.iter().enumerate() {
        cumulative += mag;
        if total > 0.0 && cumulative >= threshold {
            return i as f64 / magnitudes.len() as f64;
        }
    }
    1.0
}

/// Fraction of adjacent raw samples whose sign differs.
pub fn zero_crossing_rate(frame: &[f32]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|pair| sign(pair[0]) != sign(pair[1]))
        .count();
    crossings as f64 / (frame.len() - 1) as f64
}

fn sign(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_bin_prefers_first_peak() {
        assert_eq!(dominant_bin(&[0.0, 3.0, 1.0, 3.0]), 1);
        assert_eq!(dominant_bin(&[0.0; 8]), 0);
    }

    #[test]
    fn dominant_frequency_maps_bins_to_hz() {
        let mut mags = vec![0.0; 1024];
        mags[20] = 5.0;
        let freq = dominant_frequency(&mags, 44100, 2048);
        assert!((freq - 430.664_062_5).abs() < 1e-9);
    }

    #[test]
    fn centroid_of_silence_is_zero() {
        assert_eq!(spectral_centroid(&[0.0; 16]), 0.0);
    }

    #[test]
    fn centroid_is_bin_normalized() {
        let mut mags = vec![0.0; 10];
        mags[5] = 2.0;
        assert!((spectral_centroid(&mags) - 0.5).abs() < 1e-12);

        let flat = vec![1.0; 100];
        assert!((spectral_centroid(&flat) - 0.495).abs() < 1e-12);
    }

    #[test]
    fn rolloff_of_dc_only_spectrum_is_zero() {
        let mut mags = vec![0.0; 1024];
        mags[0] = 10.0;
        assert_eq!(spectral_rolloff(&mags), 0.0);
    }

    #[test]
    fn rolloff_of_flat_spectrum_is_near_threshold() {
        let mags = vec![1.0; 1000];
        assert!((spectral_rolloff(&mags) - 0.85).abs() < 0.002);
    }

    #[test]
    fn rolloff_of_silence_is_one() {
        assert_eq!(spectral_rolloff(&[0.0; 32]), 1.0);
        assert_eq!(spectral_rolloff(&[]), 1.0);
    }

    #[test]
    fn zcr_counts_sign_changes() {
        assert_eq!(zero_crossing_rate(&[1.0, -1.0, 1.0, -1.0, 1.0]), 1.0);
        assert_eq!(zero_crossing_rate(&[0.5, 0.2, 0.1, 0.9]), 0.0);
        assert!((zero_crossing_rate(&[1.0, 1.0, -1.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zcr_treats_zero_as_its_own_sign() {
        assert_eq!(zero_crossing_rate(&[0.0; 8]), 0.0);
        assert!((zero_crossing_rate(&[0.0, 1.0, 0.0]) - 1.0).abs() < 1e-12);
    }
}
