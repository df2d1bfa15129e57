//! The capability shared by every regression model in the crate.
//!
//! A model only has to know how to predict a batch and how to update itself
//! from a single example; epoch iteration and RMSE evaluation are provided on
//! top of that.

use crate::{ArrayView1, Matrix, RegressionError, Result, Vector};

pub trait Regressor {
    /// Number of input features the model was built for.
    fn n_features(&self) -> usize;

    /// One prediction per row of `x`, in row order.
    fn predict(&self, x: &Matrix) -> Result<Vector>;

    /// Online update from a single example. A row whose length differs from
    /// `n_features` is rejected without touching the parameters.
    fn update_weight(&mut self, x_i: ArrayView1<f64>, y_i: f64, learning_rate: f64)
        -> Result<()>;

    /// Flat weight vector, for models that have one comparable to a
    /// closed-form solution.
    fn weights(&self) -> Option<&Vector> {
        None
    }

    /// Applies `update_weight` to every row of `x` in order.
    fn train_epoch(&mut self, x: &Matrix, y: &Vector, learning_rate: f64) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(RegressionError::mismatch("train_epoch targets", x.nrows(), y.len()));
        }
        if x.ncols() != self.n_features() {
            return Err(RegressionError::mismatch(
                "train_epoch features",
                self.n_features(),
                x.ncols(),
            ));
        }

        for (x_i, &y_i) in x.rows().into_iter().zip(y.iter()) {
            self.update_weight(x_i, y_i, learning_rate)?;
        }
        Ok(())
    }

    /// Root mean squared error of the predictions for `x` against `y`.
    fn evaluate(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::root_mean_squared_error(y, &y_pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Records every example it sees and predicts a constant.
    struct Recorder {
        seen: Vec<(Vec<f64>, f64)>,
        constant: f64,
    }

    impl Regressor for Recorder {
        fn n_features(&self) -> usize {
            2
        }

        fn predict(&self, x: &Matrix) -> Result<Vector> {
            Ok(Vector::from_elem(x.nrows(), self.constant))
        }

        fn update_weight(
            &mut self,
            x_i: ArrayView1<f64>,
            y_i: f64,
            _learning_rate: f64,
        ) -> Result<()> {
            self.seen.push((x_i.to_vec(), y_i));
            Ok(())
        }
    }

    #[test]
    fn test_train_epoch_visits_rows_in_order() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = array![10.0, 20.0, 30.0];
        let mut model = Recorder { seen: vec![], constant: 0.0 };

        model.train_epoch(&x, &y, 0.1).unwrap();

        assert_eq!(
            model.seen,
            vec![
                (vec![1.0, 2.0], 10.0),
                (vec![3.0, 4.0], 20.0),
                (vec![5.0, 6.0], 30.0)
            ]
        );
    }

    #[test]
    fn test_train_epoch_rejects_wrong_width() {
        let x = array![[1.0, 2.0, 3.0]];
        let y = array![1.0];
        let mut model = Recorder { seen: vec![], constant: 0.0 };

        assert!(model.train_epoch(&x, &y, 0.1).is_err());
        assert!(model.seen.is_empty());
    }

    #[test]
    fn test_evaluate_constant_model() {
        let x = array![[0.0, 0.0], [0.0, 0.0]];
        let y = array![1.0, 3.0];
        let model = Recorder { seen: vec![], constant: 2.0 };

        let rmse = model.evaluate(&x, &y).unwrap();
        assert!((rmse - 1.0).abs() < 1e-12);
        assert_eq!(rmse, model.evaluate(&x, &y).unwrap());
    }
}
