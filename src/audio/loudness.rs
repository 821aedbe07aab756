/// Root-mean-square of an already windowed frame.
pub fn frame_rms(windowed: &[f64]) -> f64 {
    if windowed.is_empty() {
        return 0.0;
    }
    (windowed.iter().map(|s| s * s).sum::<f64>() / windowed.len() as f64).sqrt()
}

/// Global RMS extent over every frame of a buffer (normalizer pass 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RmsRange {
    pub min: f64,
    pub max: f64,
}

impl RmsRange {
    /// `None` when there are no frames.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Maps an RMS value into [0, 1]. A flat range (silence, constant level)
    /// maps everything to 0.
    pub fn normalize(&self, rms: f64) -> f64 {
        if self.max > self.min {
            (rms - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }
}

pub fn passes_gate(intensity: f64, threshold: f64) -> bool {
    intensity >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_of_constant() {
        assert!((frame_rms(&[0.5; 64]) - 0.5).abs() < 1e-12);
        assert!((frame_rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(frame_rms(&[]), 0.0);
    }

    #[test]
    fn range_normalizes_into_unit_interval() {
        let range = RmsRange::from_values(&[0.2, 0.6, 1.0]).unwrap();
        assert_eq!(range.min, 0.2);
        assert_eq!(range.max, 1.0);
        assert_eq!(range.normalize(0.2), 0.0);
        assert!((range.normalize(0.6) - 0.5).abs() < 1e-12);
        assert_eq!(range.normalize(1.0), 1.0);
    }

    #[test]
    fn flat_range_is_zero_not_nan() {
        let range = RmsRange::from_values(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(range.normalize(0.0), 0.0);
        let range = RmsRange::from_values(&[0.3, 0.3]).unwrap();
        assert_eq!(range.normalize(0.3), 0.0);
    }

    #[test]
    fn empty_range() {
        assert!(RmsRange::from_values(&[]).is_none());
    }

    #[test]
    fn gate_is_strictly_below_threshold() {
        assert!(!passes_gate(0.049, 0.05));
        assert!(passes_gate(0.05, 0.05));
        assert!(passes_gate(0.0, 0.0));
    }
}
