use num::Float;

/// Similar to numpy.interp, for a single abscissa.
///
/// `coords` must be sorted by x. Values left of the first point take the first
/// y, values right of the last point take the last y. An empty set of points
/// yields zero.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }

    for window in coords.windows(2) {
        let (x1, y1) = window[0];
        let (x2, y2) = window[1];

        // Repeated x coordinates describe a vertical step; take the right side
        if x1 <= x && x < x2 {
            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    last_y
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let got: Vec<f64> = [0., 1., 1.5, 2.72, 3.24].into_iter().map(|x| interp(x, &coords)).collect();

    assert_eq!(got, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
    let got: Vec<f64> = [2.5, -1., 7.5].into_iter().map(|x| interp(x, &coords)).collect();

    assert_eq!(got, vec![4., 0., 2.]);
}

#[test]
fn test_interp_step_and_empty() {
    let step = [(0., 0.), (1., 0.), (1., 1.), (2., 1.)];

    assert_eq!(interp(0.5, &step), 0.);
    assert_eq!(interp(1., &step), 1.);
    assert_eq!(interp(1.5, &step), 1.);
    assert_eq!(interp(3.0f64, &[]), 0.);
}
