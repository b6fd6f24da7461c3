//! Ordinary least squares of a value sequence against its index `0..n`.

/// The fitted line `y = intercept + slope * x` and its coefficient of determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// In `[0, 1]`; `0` when the values have no variance.
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `values` against their positions.
///
/// Degenerate inputs never produce NaN: an empty slice fits the zero line, a single
/// value fits a flat line through it, and zero variance in either axis gives
/// slope `0` / R² `0`.
pub fn fit(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n == 0 {
        return LinearFit { slope: 0.0, intercept: 0.0, r_squared: 0.0 };
    }

    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, y) in values.iter().enumerate() {
        let fitted = intercept + slope * i as f64;
        ss_res += (y - fitted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }
    let r_squared = if ss_tot > 0.0 {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    LinearFit { slope, intercept, r_squared }
}

/// Slope only; shorthand for `fit(values).slope`.
pub fn slope(values: &[f64]) -> f64 {
    fit(values).slope
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_is_recovered() {
        let values: Vec<f64> = (0..10).map(|i| 1.5 + 0.25 * i as f64).collect();
        let line = fit(&values);
        assert_relative_eq!(line.slope, 0.25, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 1.5, epsilon = 1e-12);
        assert_relative_eq!(line.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.predict(10.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_are_neutral() {
        assert_eq!(fit(&[]), LinearFit { slope: 0.0, intercept: 0.0, r_squared: 0.0 });

        let single = fit(&[4.2]);
        assert_eq!(single.slope, 0.0);
        assert_eq!(single.intercept, 4.2);
        assert_eq!(single.r_squared, 0.0);

        let flat = fit(&[3.0; 6]);
        assert_eq!(flat.slope, 0.0);
        assert_eq!(flat.r_squared, 0.0);
    }

    #[test]
    fn test_noisy_fit_has_partial_r_squared() {
        let line = fit(&[1.0, 3.0, 2.0, 4.0, 3.0, 5.0]);
        assert!(line.slope > 0.0);
        assert!(line.r_squared > 0.0 && line.r_squared < 1.0);
    }
}
