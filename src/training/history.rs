use std::path::Path;

use serde::Serialize;

use crate::Result;

/// What the trainer reports after each epoch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpochRecord {
    pub epoch: usize,
    pub train_rmse: f64,
    pub test_rmse: f64,
    /// Distance from the closed-form solution, linear runs only.
    pub distance: Option<f64>,
    /// Set once any reported number has become NaN or infinite.
    #[serde(skip)]
    pub diverged: bool,
}

impl EpochRecord {
    pub fn new(epoch: usize, train_rmse: f64, test_rmse: f64, distance: Option<f64>) -> Self {
        let diverged = !train_rmse.is_finite()
            || !test_rmse.is_finite()
            || distance.is_some_and(|d| !d.is_finite());

        Self {
            epoch,
            train_rmse,
            test_rmse,
            distance,
            diverged,
        }
    }
}

/// Consumer of per-epoch results.
pub trait ReportingSink {
    fn record(&mut self, record: &EpochRecord);
}

/// Writes each epoch to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportingSink for LogSink {
    fn record(&mut self, record: &EpochRecord) {
        match record.distance {
            Some(distance) => log::info!(
                "Epoch {}: loss (train) {:.3} | loss (test) {:.3} | distance {:.4}",
                record.epoch,
                record.train_rmse,
                record.test_rmse,
                distance
            ),
            None => log::info!(
                "Epoch {}: loss (train) {:.3} | loss (test) {:.3}",
                record.epoch,
                record.train_rmse,
                record.test_rmse
            ),
        }
    }
}

/// Discards every record.
impl ReportingSink for () {
    fn record(&mut self, _record: &EpochRecord) {}
}

/// All epoch records of a run, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingHistory {
    records: Vec<EpochRecord>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn final_record(&self) -> Option<&EpochRecord> {
        self.records.last()
    }

    pub fn train_losses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.train_rmse).collect()
    }

    pub fn test_losses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.test_rmse).collect()
    }

    /// Distances for the epochs that recorded one.
    pub fn distances(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.distance).collect()
    }

    /// First epoch whose numbers stopped being finite.
    pub fn diverged(&self) -> Option<usize> {
        self.records.iter().find(|r| r.diverged).map(|r| r.epoch)
    }

    /// `epoch,train_rmse,test_rmse,distance`, one row per epoch.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ReportingSink for TrainingHistory {
    fn record(&mut self, record: &EpochRecord) {
        self.records.push(record.clone());
    }
}
