use crate::catalog::{FEATURE_COUNT, FEATURE_NAMES};
use tracing::warn;

/// Per-column standardization fitted across the whole catalog
///
/// `z = (x - mean) / std`, using the population standard deviation. A column
/// with zero variance keeps a std of 1.0, so it is centered but not scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    mean: [f64; FEATURE_COUNT],
    std: [f64; FEATURE_COUNT],
}

impl FeatureScaler {
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Self {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut std = [1.0; FEATURE_COUNT];

        if rows.is_empty() {
            return Self { mean, std };
        }

        for (j, ((m, s), name)) in mean
            .iter_mut()
            .zip(std.iter_mut())
            .zip(FEATURE_NAMES)
            .enumerate()
        {
            let (column_mean, column_std) = fit_column(rows.iter().map(|row| row[j]));
            *m = column_mean;

            if column_std > 0.0 && column_std.is_finite() {
                *s = column_std;
            } else {
                warn!(
                    "Feature column {} has zero variance; leaving it unscaled",
                    name
                );
            }
        }

        Self { mean, std }
    }

    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (((z, x), m), s) in out.iter_mut().zip(row).zip(&self.mean).zip(&self.std) {
            // Halved so the difference of two extreme values stays finite
            *z = (x / 2.0 - m / 2.0) / (s / 2.0);
        }
        out
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn std(&self) -> &[f64; FEATURE_COUNT] {
        &self.std
    }
}

/// Population mean and std of one column
///
/// Values are divided by the column's largest magnitude first, so no
/// intermediate sum or square can overflow for finite input.
fn fit_column<I>(values: I) -> (f64, f64)
where
    I: Iterator<Item = f64> + Clone,
{
    let scale = values.clone().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return (0.0, 0.0);
    }

    let mut mean = 0.0;
    let mut count = 0usize;
    for v in values.clone() {
        count += 1;
        mean += (v / scale - mean) / count as f64;
    }

    let variance = values.map(|v| (v / scale - mean).powi(2)).sum::<f64>() / count as f64;

    (mean * scale, variance.sqrt() * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fit_mean_and_population_std() {
        let rows = [[1.0, 10.0, 0.0, 2.0], [3.0, 20.0, 0.0, 4.0]];
        let scaler = FeatureScaler::fit(&rows);

        for (m, expected) in scaler.mean().iter().zip([2.0, 15.0, 0.0, 3.0]) {
            assert!(close(*m, expected), "mean {m} != {expected}");
        }
        assert!(close(scaler.std()[0], 1.0));
        assert!(close(scaler.std()[1], 5.0));
        assert!(close(scaler.std()[3], 1.0));
    }

    #[test]
    fn test_transform_standardizes_columns() {
        let rows = [[1.0, 0.0, 5.0, 2.0], [2.0, 4.0, 6.0, 2.5], [3.0, 8.0, 10.0, 9.0]];
        let scaler = FeatureScaler::fit(&rows);
        let scaled: Vec<_> = rows.iter().map(|r| scaler.transform(r)).collect();

        for j in 0..FEATURE_COUNT {
            let mean: f64 = scaled.iter().map(|r| r[j]).sum::<f64>() / 3.0;
            let var: f64 = scaled.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(close(mean, 0.0), "column {j} mean {mean}");
            assert!(close(var, 1.0), "column {j} variance {var}");
        }
    }

    #[test]
    fn test_constant_column_is_centered_not_scaled() {
        let rows = [[0.5, 1.0, 7.0, 0.0], [0.5, 2.0, 7.0, 1.0]];
        let scaler = FeatureScaler::fit(&rows);

        assert_eq!(scaler.std()[0], 1.0);
        assert_eq!(scaler.std()[2], 1.0);

        let z = scaler.transform(&rows[0]);
        assert_eq!(z[0], 0.0);
        assert_eq!(z[2], 0.0);
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_extreme_values_stay_finite() {
        let rows = [
            [0.1, 0.2, f64::MAX, 1e308],
            [0.4, 0.3, -f64::MAX, 1e308],
            [0.9, 0.5, f64::MAX / 2.0, 1e308],
        ];
        let scaler = FeatureScaler::fit(&rows);

        assert!(scaler.mean().iter().all(|v| v.is_finite()));
        assert!(scaler.std().iter().all(|v| v.is_finite() && *v > 0.0));
        assert_eq!(scaler.std()[3], 1.0);

        for row in &rows {
            let z = scaler.transform(row);
            assert!(z.iter().all(|v| v.is_finite()), "{z:?}");
            assert_eq!(z[3], 0.0);
        }
    }

    #[test]
    fn test_fit_empty() {
        let scaler = FeatureScaler::fit(&[]);
        assert_eq!(scaler.mean(), &[0.0; FEATURE_COUNT]);
        assert_eq!(scaler.std(), &[1.0; FEATURE_COUNT]);
    }
}
