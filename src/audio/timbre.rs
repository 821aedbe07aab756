//! Compact timbre fingerprint for driving animation.
//!
//! Binary filters are laid out linearly over the spectrum index rather than on
//! the mel scale, and each filter spans two filter widths. This is not an MFCC
//! and should not be fed into anything recognition-grade.

use std::f64::consts::PI;

use super::features::TIMBRE_COEFFICIENTS;

pub const FILTER_COUNT: usize = 26;

const LOG_FLOOR: f64 = 1e-10;

/// Summed magnitude under each filter. Filter `j` covers indices
/// `[j/26 * L, (j+2)/26 * L)`, clamped to the spectrum length `L`.
pub fn filter_bank_energies(magnitudes: &[f64]) -> [f64; FILTER_COUNT] {
    let len = magnitudes.len();
    let mut energies = [0.0; FILTER_COUNT];
    for (j, energy) in energies.iter_mut().enumerate() {
        let start = j * len / FILTER_COUNT;
        let end = ((j + 2) * len / FILTER_COUNT).min(len);
        *energy = magnitudes[start..end].iter().sum();
    }
    energies
}

/// Type-II cosine transform of the log filter-bank energies.
pub fn timbre_coefficients(magnitudes: &[f64]) -> [f64; TIMBRE_COEFFICIENTS] {
    let log_energies = filter_bank_energies(magnitudes).map(|e| e.max(LOG_FLOOR).ln());

    let mut coefficients = [0.0; TIMBRE_COEFFICIENTS];
    for (c, coefficient) in coefficients.iter_mut().enumerate() {
        *coefficient = log_energies
            .iter()
            .enumerate()
            .map(|(j, &log_e)| {
                log_e * (PI * c as f64 * (j as f64 + 0.5) / FILTER_COUNT as f64).cos()
            })
            .sum();
    }
    coefficients
}
