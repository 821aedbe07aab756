use super::features::AnalysisParams;

/// Number of frames the buffer yields before gating.
///
/// Follows `floor((len - window) / hop)`, so a buffer exactly one window long
/// produces no frames.
pub fn frame_count(len: usize, params: &AnalysisParams) -> usize {
    if len < params.window_size || params.hop_size == 0 {
        return 0;
    }
    (len - params.window_size) / params.hop_size
}

pub fn frame_start(index: usize, params: &AnalysisParams) -> usize {
    index * params.hop_size
}

pub fn hann_window(size: usize) -> Vec<f64> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / (size - 1) as f64).cos())
        .collect()
}

/// Multiplies a raw frame by a precomputed window of the same length.
pub fn apply_window(frame: &[f32], window: &[f64]) -> Vec<f64> {
    frame
        .iter()
        .zip(window)
        .map(|(&s, &w)| s as f64 * w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(window_size: usize, hop_size: usize) -> AnalysisParams {
        AnalysisParams {
            window_size,
            hop_size,
            ..Default::default()
        }
    }

    #[test]
    fn counts_frames() {
        let p = params(2048, 512);
        assert_eq!(frame_count(0, &p), 0);
        assert_eq!(frame_count(2047, &p), 0);
        assert_eq!(frame_count(2048, &p), 0);
        assert_eq!(frame_count(2560, &p), 1);
        assert_eq!(frame_count(88200, &p), 168);
    }

    #[test]
    fn frames_start_at_hop_multiples() {
        let p = params(1024, 256);
        assert_eq!(frame_start(0, &p), 0);
        assert_eq!(frame_start(3, &p), 768);
    }

    #[test]
    fn hann_is_zero_at_edges_and_one_at_center() {
        let w = hann_window(1025);
        assert!(w[0].abs() < 1e-12);
        assert!(w[1024].abs() < 1e-12);
        assert!((w[512] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn apply_window_scales_samples() {
        let window = hann_window(4);
        let windowed = apply_window(&[1.0, 1.0, -1.0, 1.0], &window);
        assert_eq!(windowed.len(), 4);
        assert!(windowed[0].abs() < 1e-12);
        assert!((windowed[1] - 0.75).abs() < 1e-12);
        assert!((windowed[2] + 0.75).abs() < 1e-12);
    }
}
