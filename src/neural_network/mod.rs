//! Single-hidden-layer ReLU network for scalar regression, trained online.
//!
//! # Examples
//!
//! ```rust
//! use tabreg::{NeuralRegression, Regressor};
//! use ndarray::array;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut model = NeuralRegression::new(2, 8, &mut rng).unwrap();
//!
//! let x = array![[0.5, 1.0], [1.5, -0.5]];
//! let y = array![1.0, 2.0];
//! model.train_epoch(&x, &y, 0.001).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! assert_eq!(predictions.len(), 2);
//! ```

use ndarray::Zip;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::Rng;

use crate::{ArrayView1, Matrix, RegressionError, Regressor, Result, Vector};

/// Mean of the normal distribution the weight matrices are drawn from.
pub const INIT_MEAN: f64 = 0.1;
/// Standard deviation of that distribution.
pub const INIT_STD_DEV: f64 = 0.1;

#[derive(Clone, Debug)]
pub struct NeuralRegression {
    /// hidden_size × n_features
    w1: Matrix,
    b1: Vector,
    /// 1 × hidden_size
    w2: Matrix,
    b2: f64,
}

/// Intermediate values of one forward pass.
struct Activations {
    h1: Vector,
    z2: f64,
}

impl NeuralRegression {
    pub const DEFAULT_HIDDEN_SIZE: usize = 150;

    /// Draws both weight matrices from `Normal(0.1, 0.1)` using `rng`; biases
    /// start at zero.
    pub fn new<R: Rng + ?Sized>(n_features: usize, hidden_size: usize, rng: &mut R) -> Result<Self> {
        if n_features == 0 || hidden_size == 0 {
            return Err(RegressionError::InvalidParameter(format!(
                "network needs n_features > 0 and hidden_size > 0, got {n_features} and {hidden_size}"
            )));
        }

        let normal = Normal::new(INIT_MEAN, INIT_STD_DEV)
            .map_err(|e| RegressionError::InvalidParameter(e.to_string()))?;

        let w1 = Matrix::random_using((hidden_size, n_features), normal, rng);
        let w2 = Matrix::random_using((1, hidden_size), normal, rng);

        Ok(Self {
            w1,
            b1: Vector::zeros(hidden_size),
            w2,
            b2: 0.0,
        })
    }

    /// Builds a network from explicit parameters, checking their shapes agree.
    pub fn from_parameters(w1: Matrix, b1: Vector, w2: Matrix, b2: f64) -> Result<Self> {
        let hidden_size = w1.nrows();
        if b1.len() != hidden_size {
            return Err(RegressionError::mismatch("hidden bias", hidden_size, b1.len()));
        }
        if w2.nrows() != 1 {
            return Err(RegressionError::mismatch("output rows", 1, w2.nrows()));
        }
        if w2.ncols() != hidden_size {
            return Err(RegressionError::mismatch("output weights", hidden_size, w2.ncols()));
        }

        Ok(Self { w1, b1, w2, b2 })
    }

    pub fn hidden_size(&self) -> usize {
        self.w1.nrows()
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.w1
    }

    pub fn hidden_bias(&self) -> &Vector {
        &self.b1
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.w2
    }

    pub fn output_bias(&self) -> f64 {
        self.b2
    }

    fn forward(&self, x_i: ArrayView1<f64>) -> Activations {
        let z1 = self.w1.dot(&x_i) + &self.b1;
        let h1 = z1.mapv(relu);
        let z2 = self.w2.row(0).dot(&h1) + self.b2;
        Activations { h1, z2 }
    }
}

fn relu(z: f64) -> f64 {
    z.max(0.0)
}

impl Regressor for NeuralRegression {
    fn n_features(&self) -> usize {
        self.w1.ncols()
    }

    /// Returns the output pre-activation `z2` for every row.
    fn predict(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != self.n_features() {
            return Err(RegressionError::mismatch(
                "network predict",
                self.n_features(),
                x.ncols(),
            ));
        }

        Ok(x.rows().into_iter().map(|x_i| self.forward(x_i).z2).collect())
    }

    fn update_weight(
        &mut self,
        x_i: ArrayView1<f64>,
        y_i: f64,
        learning_rate: f64,
    ) -> Result<()> {
        if x_i.len() != self.n_features() {
            return Err(RegressionError::mismatch(
                "network update",
                self.n_features(),
                x_i.len(),
            ));
        }

        let Activations { h1, z2 } = self.forward(x_i);
        let h2 = relu(z2);

        // Seeded on the rectified output h2, not on z2.
        let grad_z2 = h2 - y_i;

        let grad_w2 = &h1 * grad_z2;
        let grad_b2 = grad_z2;

        let grad_h1 = self.w2.row(0).mapv(|w| w * grad_z2);
        let grad_z1 = Zip::from(&grad_h1)
            .and(&h1)
            .map_collect(|&g, &h| if h > 0.0 { g } else { 0.0 });

        // Outer product grad_z1 ⊗ x_i, applied in place.
        Zip::from(self.w1.rows_mut())
            .and(&grad_z1)
            .for_each(|mut row, &g| row.scaled_add(-learning_rate * g, &x_i));
        self.b1.scaled_add(-learning_rate, &grad_z1);
        self.w2.row_mut(0).scaled_add(-learning_rate, &grad_w2);
        self.b2 -= learning_rate * grad_b2;
        Ok(())
    }
}
