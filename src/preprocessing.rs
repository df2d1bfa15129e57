use ndarray::Axis;

use crate::{Matrix, RegressionError, Result, Vector};

/// Per-column standardisation fitted on one matrix and applied to others.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data.mean_axis(Axis(0)).ok_or_else(|| {
            RegressionError::InvalidParameter("cannot fit a scaler on zero rows".to_string())
        })?;
        // Constant columns keep their scale.
        let std = data
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 1e-12 { s } else { 1.0 });

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            _ => {
                return Err(RegressionError::InvalidParameter(
                    "scaler not fitted, call fit() first".to_string(),
                ));
            }
        };
        if data.ncols() != mean.len() {
            return Err(RegressionError::mismatch("scaler input", mean.len(), data.ncols()));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());

        let means = scaled.mean_axis(Axis(0)).unwrap();
        for m in means.iter() {
            assert!(m.abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_column_left_finite() {
        let data = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert!(scaled.column(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_without_fit() {
        let scaler = StandardScaler::new();
        assert!(scaler.transform(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_transform_width_mismatch() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [2.0, 3.0]]).unwrap();
        assert!(scaler.transform(&array![[1.0]]).is_err());
    }
}
