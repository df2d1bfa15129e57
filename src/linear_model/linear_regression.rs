use crate::{ArrayView1, Matrix, RegressionError, Regressor, Result, Vector};

#[derive(Clone, Debug)]
pub struct LinearRegression {
    weights: Vector,
}

impl LinearRegression {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

    /// A model with all weights at zero. Include the bias column in
    /// `n_features` when the data carries one.
    pub fn new(n_features: usize) -> Self {
        Self {
            weights: Vector::zeros(n_features),
        }
    }

    pub fn from_weights(weights: Vector) -> Self {
        Self { weights }
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != self.weights.len() {
            return Err(RegressionError::mismatch(
                "linear predict",
                self.weights.len(),
                x.ncols(),
            ));
        }

        Ok(x.dot(&self.weights))
    }

    fn update_weight(
        &mut self,
        x_i: ArrayView1<f64>,
        y_i: f64,
        learning_rate: f64,
    ) -> Result<()> {
        if x_i.len() != self.weights.len() {
            return Err(RegressionError::mismatch(
                "linear update",
                self.weights.len(),
                x_i.len(),
            ));
        }

        let y_hat = self.weights.dot(&x_i);

        // Exact match means zero loss on this example, so no step.
        if y_hat != y_i {
            // L = ½ (y_i − w·x_i)², so ∂L/∂w = −x_i (y_i − ŷ).
            let gradient = x_i.mapv(|x| -x * (y_i - y_hat));
            self.weights.scaled_add(-learning_rate, &gradient);
        }
        Ok(())
    }

    fn weights(&self) -> Option<&Vector> {
        Some(&self.weights)
    }
}
