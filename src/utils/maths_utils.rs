use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Arithmetic mean. Returns `None` for an empty slice rather than NaN.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.mean())
}

/// Caller guarantees a non-empty slice.
pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Round to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Relative distance between `value` and `reference`, as a fraction of `reference`.
#[inline]
pub fn relative_distance(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn min_max_picks_extremes() {
        let values = [3.0, -1.0, 7.5, 2.0];
        assert_eq!(get_min(&values), -1.0);
        assert_eq!(get_max(&values), 7.5);
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(4.995, 1), 5.0);
    }

    #[test]
    fn relative_distance_uses_reference() {
        assert!((relative_distance(102.0, 100.0) - 0.02).abs() < 1e-12);
        assert!((relative_distance(98.0, 100.0) - 0.02).abs() < 1e-12);
    }
}
