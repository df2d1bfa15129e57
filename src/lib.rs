pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod model;
pub mod neural_network;
pub mod preprocessing;
pub mod training;

pub use dataset::{Dataset, RegressionData};
pub use error::{RegressionError, Result};
pub use linear_model::{LinearRegression, RIDGE_PENALTY, distance, solve_analytically};
pub use model::Regressor;
pub use neural_network::NeuralRegression;
pub use preprocessing::StandardScaler;
pub use training::{EpochRecord, LogSink, ReportingSink, Trainer, TrainingConfig, TrainingHistory};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
