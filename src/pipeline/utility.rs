/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Expresses `part` as a percentage of `total`.
///
/// Returns `None` when `total` is zero: the rate is undefined, not zero,
/// and downstream formatting must show it as such.
pub fn pct(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(part / total * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_pct_zero_total_is_undefined() {
        assert_eq!(pct(5.0, 0.0), None);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(pct(5.0, 100.0), Some(5.0));
        assert_eq!(pct(1.0, 4.0), Some(25.0));
    }
}
