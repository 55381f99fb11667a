use num::Float;

/// Ascending sample points `min, min + step, ...` strictly below `max`.
///
/// Each point is the previous one plus `step`, not `min + i * step`, so the
/// rounding drift of a running sum is part of the sequence. Callers relying on
/// exact accumulated values depend on this. Once `step` is below the
/// precision of the running sum the sequence ends instead of repeating.
pub(crate) struct Steps<F> {
    next: F,
    step: F,
    max: F,
}

impl<F: Float> Steps<F> {
    /// `step` must be positive, otherwise the sequence never ends.
    pub(crate) fn new(min: F, max: F, step: F) -> Self {
        debug_assert!(step > F::zero());

        Steps { next: min, step, max }
    }
}

impl<F: Float> Iterator for Steps<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.next < self.max {
            let x = self.next;
            let next = x + self.step;

            // Past the float's precision the sum stops moving; end there.
            self.next = if next > x { next } else { self.max };
            Some(x)
        } else {
            None
        }
    }
}

#[test]
fn test_steps_exclude_max() {
    let xs: Vec<f64> = Steps::new(0., 0.5, 0.1).collect();

    assert_eq!(xs.len(), 5);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[1], 0.1);
    // running sum, not 3 * 0.1
    assert_eq!(xs[3], 0.1 + 0.1 + 0.1);
    assert!(xs.iter().all(|x| *x < 0.5));
}

#[test]
fn test_steps_empty_range() {
    assert_eq!(Steps::new(2., 2., 0.1).count(), 0);
    assert_eq!(Steps::new(3., 2., 0.1).count(), 0);
}

#[test]
fn test_steps_stop_when_sum_stalls() {
    // 1e16 + 0.1 rounds back to 1e16
    assert_eq!(Steps::new(1e16, 2e16, 0.1).count(), 1);
    assert_eq!(Steps::new(1e16, 2e16, 0.1).next(), Some(1e16));
    // a step that still moves the sum keeps the running-sum sequence
    assert_eq!(Steps::new(1e16, 1e16 + 8., 2.).count(), 4);
}
