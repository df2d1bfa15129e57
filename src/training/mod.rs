//! The epoch loop shared by both models.
//!
//! Each epoch shuffles the training split, runs one online pass of
//! `Regressor::train_epoch`, then evaluates RMSE on both splits and, for a
//! linear model, the distance to a closed-form reference.
//!
//! # Examples
//!
//! ```rust
//! use tabreg::{Dataset, LinearRegression, RegressionData, Trainer, TrainingConfig, TrainingHistory};
//! use tabreg::solve_analytically;
//! use ndarray::array;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
//! let y = array![2.0, 4.0, 6.0];
//! let mut data = RegressionData::new(
//!     Dataset::new(x.clone(), y.clone()).unwrap(),
//!     Dataset::new(x.clone(), y.clone()).unwrap(),
//! )
//! .unwrap();
//!
//! let reference = solve_analytically(&x, &y).unwrap();
//! let mut model = LinearRegression::new(2);
//! let mut trainer = Trainer::new(TrainingConfig::new().epochs(10), StdRng::seed_from_u64(42));
//! let mut sink = TrainingHistory::new();
//! let history = trainer.fit(&mut model, &mut data, Some(&reference), &mut sink).unwrap();
//! assert_eq!(history.len(), 10);
//! ```

mod config;
mod history;

pub use config::TrainingConfig;
pub use history::{EpochRecord, LogSink, ReportingSink, TrainingHistory};

use rand::Rng;

use crate::{RegressionData, RegressionError, Regressor, Result, Vector, linear_model::distance};

/// Drives a model through a fixed number of epochs with an injected RNG.
pub struct Trainer<R: Rng> {
    config: TrainingConfig,
    rng: R,
}

impl<R: Rng> Trainer<R> {
    pub fn new(config: TrainingConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Trains `model` on `data.train` for `config.epochs` epochs.
    ///
    /// The training split is left in the order of the last epoch's shuffle.
    /// All shape checks happen before the first update.
    pub fn fit<M, S>(
        &mut self,
        model: &mut M,
        data: &mut RegressionData,
        reference: Option<&Vector>,
        sink: &mut S,
    ) -> Result<TrainingHistory>
    where
        M: Regressor + ?Sized,
        S: ReportingSink + ?Sized,
    {
        self.config.validate()?;
        check_preconditions(&*model, data, reference)?;

        let learning_rate = self.config.learning_rate;
        let mut history = TrainingHistory::new();

        log::debug!(
            "training for {} epochs at learning rate {} on {} samples",
            self.config.epochs,
            learning_rate,
            data.train.n_samples()
        );

        for epoch in 1..=self.config.epochs {
            data.train.shuffle(&mut self.rng);
            model.train_epoch(&data.train.features, &data.train.targets, learning_rate)?;

            let train_rmse = model.evaluate(&data.train.features, &data.train.targets)?;
            let test_rmse = model.evaluate(&data.test.features, &data.test.targets)?;

            let distance_to_reference = match (reference, model.weights()) {
                (Some(reference), Some(weights)) => Some(distance(reference, weights)?),
                _ => None,
            };

            let record = EpochRecord::new(epoch, train_rmse, test_rmse, distance_to_reference);
            if record.diverged && history.diverged().is_none() {
                log::warn!(
                    "training diverged at epoch {epoch}: train rmse {train_rmse}, test rmse {test_rmse}"
                );
            }

            sink.record(&record);
            history.record(&record);
        }

        Ok(history)
    }
}

fn check_preconditions<M: Regressor + ?Sized>(
    model: &M,
    data: &RegressionData,
    reference: Option<&Vector>,
) -> Result<()> {
    let n_features = model.n_features();

    if data.train.n_samples() == 0 {
        return Err(RegressionError::InvalidParameter(
            "training split is empty".to_string(),
        ));
    }
    if data.test.n_samples() == 0 {
        return Err(RegressionError::InvalidParameter(
            "test split is empty".to_string(),
        ));
    }
    if data.train.n_features() != n_features {
        return Err(RegressionError::mismatch(
            "training features",
            n_features,
            data.train.n_features(),
        ));
    }
    if data.test.n_features() != n_features {
        return Err(RegressionError::mismatch(
            "test features",
            n_features,
            data.test.n_features(),
        ));
    }

    if let Some(reference) = reference {
        let weights = model.weights().ok_or_else(|| {
            RegressionError::InvalidParameter(
                "a reference solution needs a model with a weight vector".to_string(),
            )
        })?;
        if reference.len() != weights.len() {
            return Err(RegressionError::mismatch(
                "reference solution",
                weights.len(),
                reference.len(),
            ));
        }
    }

    Ok(())
}
