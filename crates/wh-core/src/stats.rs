//! Guarded ratios and means over small counts.

/// `numerator / denominator`, or `0.0` when the denominator is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)] // counts are days and categories
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Arithmetic mean, or `0.0` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<i64>() as f64 / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_zero() {
        assert!(ratio(3, 0).abs() < f64::EPSILON);
        assert!(mean(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn plain_values() {
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
        assert!((mean(&[10, 20, 45]) - 25.0).abs() < f64::EPSILON);
    }
}
