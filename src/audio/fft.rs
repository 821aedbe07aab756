//! Recursive radix-2 decimation-in-time FFT.
//!
//! The transform is kept in-crate so bin-to-Hz mapping stays under our
//! control: lengths that are not a power of two are rejected instead of
//! padded.

use rustfft::num_complex::Complex;
use std::f64::consts::PI;

use crate::error::{AnalysisError, Result};

pub type Complex64 = Complex<f64>;

pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    check_length(input.len())?;
    Ok(transform(input, -1.0))
}

/// Inverse transform, scaled by `1/N`.
pub fn ifft(input: &[Complex64]) -> Result<Vec<Complex64>> {
    check_length(input.len())?;
    let scale = 1.0 / input.len().max(1) as f64;
    Ok(transform(input, 1.0)
        .into_iter()
        .map(|c| c * scale)
        .collect())
}

/// Forward transform of a real-valued frame.
pub fn fft_real(frame: &[f64]) -> Result<Vec<Complex64>> {
    let buffer: Vec<Complex64> = frame.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft(&buffer)
}

/// Magnitudes of the first `N/2` bins; the rest mirror them for real input.
pub fn magnitude_spectrum(bins: &[Complex64]) -> Vec<f64> {
    bins[..bins.len() / 2].iter().map(|c| c.norm()).collect()
}

fn check_length(n: usize) -> Result<()> {
    if n > 1 && !n.is_power_of_two() {
        return Err(AnalysisError::WindowNotPowerOfTwo(n));
    }
    Ok(())
}

// `sign` is -1 for the forward transform and +1 for the inverse.
fn transform(input: &[Complex64], sign: f64) -> Vec<Complex64> {
    let n = input.len();
    if n <= 1 {
        return input.to_vec();
    }

    let even: Vec<Complex64> = input.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = input.iter().skip(1).step_by(2).copied().collect();
    let even = transform(&even, sign);
    let odd = transform(&odd, sign);

    let half = n / 2;
    let mut output = vec![Complex::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex::from_polar(1.0, sign * 2.0 * PI * k as f64 / n as f64);
        let t = twiddle * odd[k];
        output[k] = even[k] + t;
        output[k + half] = even[k] - t;
    }
    output
}
