//! Course completion arithmetic.

/// Percentage of `total` items that are `completed`, in `[0, 100]`.
///
/// A course with no content has no progress to make, so zero total yields 0.
pub fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = completed.min(total) as f64 / total as f64;
    100.0 * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_course_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn full_completion_is_hundred() {
        assert_eq!(percentage(4, 4), 100.0);
    }

    #[test]
    fn partial_completion() {
        assert_eq!(percentage(1, 4), 25.0);
        assert!((percentage(1, 3) - 33.333_333).abs() < 1e-4);
    }

    #[test]
    fn never_exceeds_hundred() {
        assert_eq!(percentage(5, 4), 100.0);
    }

    #[test]
    fn monotonic_in_completed() {
        let values: Vec<f64> = (0..=6).map(|done| percentage(done, 6)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
