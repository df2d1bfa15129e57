//! Linear regression: the online-trained model and its closed-form reference.
//!
//! This module provides:
//! - `LinearRegression`: a weight vector updated one example at a time
//! - `solve_analytically`: the ridge-regularised least-squares solution
//! - `distance`: Euclidean distance between two weight vectors
//!
//! # Examples
//!
//! ```rust
//! use tabreg::{LinearRegression, Regressor, solve_analytically};
//! use ndarray::array;
//!
//! let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
//! let y = array![2.0, 4.0, 6.0];
//!
//! let w = solve_analytically(&x, &y).unwrap();
//! assert!((w[1] - 2.0).abs() < 1e-3);
//!
//! let mut model = LinearRegression::new(2);
//! model.train_epoch(&x, &y, 0.001).unwrap();
//! let rmse = model.evaluate(&x, &y).unwrap();
//! ```

mod analytic;
mod linear_regression;

pub use analytic::{RIDGE_PENALTY, distance, solve_analytically};
pub use linear_regression::LinearRegression;
