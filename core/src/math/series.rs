use ndarray::Array1;

/// Moving average with boundary samples dropped: output length is
/// `len - window + 1`, empty when the input is shorter than the window.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    let series: Array1<f64> = values.iter().copied().collect();
    series
        .windows(window)
        .into_iter()
        .map(|slice| slice.sum() / window as f64)
        .collect()
}

/// Truncates readings above `ceiling`; values at or below pass unchanged.
pub fn clamp_ceiling(value: f64, ceiling: f64) -> f64 {
    value.min(ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_two_yields_pairwise_means() {
        let smoothed = moving_average(&[1.0, 3.0, 5.0, 7.0], 2);
        assert_eq!(smoothed, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn output_shrinks_by_window_minus_one() {
        let values = vec![4.0; 10];
        assert_eq!(moving_average(&values, 2).len(), 9);
        assert_eq!(moving_average(&values, 5).len(), 6);
    }

    #[test]
    fn short_input_yields_empty_output() {
        assert!(moving_average(&[1.0], 2).is_empty());
        assert!(moving_average(&[], 2).is_empty());
        assert!(moving_average(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn clamp_is_idempotent_and_bounded() {
        for value in [-5.0, 0.0, 199.9, 200.0, 200.1, 1.0e9] {
            let once = clamp_ceiling(value, 200.0);
            assert!(once <= 200.0);
            assert_eq!(clamp_ceiling(once, 200.0), once);
        }
    }
}
