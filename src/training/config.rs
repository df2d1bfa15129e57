use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LinearRegression, NeuralRegression, RegressionError, Result};

/// Hyperparameters of one training run.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// Only read when building a network.
    pub hidden_size: usize,
    pub seed: u64,
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self {
            epochs: 150,
            learning_rate: LinearRegression::DEFAULT_LEARNING_RATE,
            hidden_size: NeuralRegression::DEFAULT_HIDDEN_SIZE,
            seed: 42,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(RegressionError::InvalidParameter(
                "epochs must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(RegressionError::InvalidParameter(format!(
                "learning_rate must be a finite non-negative number, got {}",
                self.learning_rate
            )));
        }
        if self.hidden_size == 0 {
            return Err(RegressionError::InvalidParameter(
                "hidden_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new()
    }
}
