//! Pairwise combination of one metric from two sources

use super::normalize::{finite, round1, round2};

/// Combine two readings of the same metric
///
/// Absent on both sides stays absent. A single reading wins outright.
/// Two readings are averaged. The result is rounded to one decimal.
///
/// ```
/// use domain::fusion::combine;
///
/// assert_eq!(combine(Some(30.0), Some(28.0)), Some(29.0));
/// assert_eq!(combine(None, Some(28.04)), Some(28.0));
/// assert_eq!(combine(None, None), None);
/// ```
#[must_use]
pub fn combine(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (finite(a), finite(b)) {
        (Some(a), Some(b)) => Some(round1(f64::midpoint(a, b))),
        (Some(v), None) | (None, Some(v)) => Some(round1(v)),
        (None, None) => None,
    }
}

/// Combine two rainfall readings, never absent
///
/// The wetter source wins. No data reads as no rain.
#[must_use]
pub fn combine_rain(a: Option<f64>, b: Option<f64>) -> f64 {
    match (finite(a), finite(b)) {
        (Some(a), Some(b)) => round2(a.max(b)),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_two() {
        assert_eq!(combine(Some(30.0), Some(28.0)), Some(29.0));
        assert_eq!(combine(Some(1013.0), Some(1010.0)), Some(1011.5));
    }

    #[test]
    fn test_single_side_is_rounded() {
        assert_eq!(combine(Some(28.04), None), Some(28.0));
        assert_eq!(combine(None, Some(28.0)), Some(28.0));
    }

    #[test]
    fn test_both_absent() {
        assert_eq!(combine(None, None), None);
    }

    #[test]
    fn test_non_finite_is_ignored() {
        assert_eq!(combine(Some(f64::NAN), Some(20.0)), Some(20.0));
        assert_eq!(combine(Some(f64::INFINITY), None), None);
    }

    #[test]
    fn test_mean_is_rounded() {
        assert_eq!(combine(Some(20.1), Some(20.2)), Some(20.2));
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(combine(Some(20.0), Some(20.5)), Some(20.3));
        assert_eq!(combine(Some(-20.0), Some(-20.5)), Some(-20.3));
        assert_eq!(combine(Some(0.25), None), Some(0.3));
        assert_eq!(combine(None, Some(-0.25)), Some(-0.3));
    }

    #[test]
    fn test_rain_takes_maximum() {
        assert!((combine_rain(Some(5.0), Some(3.0)) - 5.0).abs() < f64::EPSILON);
        assert!((combine_rain(Some(3.0), Some(5.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rain_defaults_to_zero() {
        assert!(combine_rain(None, None).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_rain_reading_is_passed_through() {
        assert!((combine_rain(Some(0.123), None) - 0.123).abs() < f64::EPSILON);
        assert!((combine_rain(None, Some(2.0)) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rain_maximum_is_rounded() {
        assert!((combine_rain(Some(1.234_5), Some(0.5)) - 1.23).abs() < 1e-9);
    }
}
