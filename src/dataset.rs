use std::path::Path;

use ndarray::{Axis, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Matrix, RegressionError, Result, Vector};

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub targets: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, targets: Vector) -> Result<Self> {
        if features.nrows() != targets.len() {
            return Err(RegressionError::mismatch(
                "dataset targets",
                features.nrows(),
                targets.len(),
            ));
        }

        Ok(Self { features, targets })
    }

    /// Reads a CSV file of numbers where the last column is the target.
    pub fn from_csv<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;

        let mut values = Vec::new();
        let mut n_columns = None;
        let mut n_rows = 0;

        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let width = *n_columns.get_or_insert(record.len());
            if record.len() != width {
                return Err(RegressionError::Data(format!(
                    "row {line} has {} columns, expected {width}",
                    record.len()
                )));
            }
            for field in record.iter() {
                let value = field.parse::<f64>().map_err(|e| {
                    RegressionError::Data(format!("row {line}: cannot parse {field:?}: {e}"))
                })?;
                values.push(value);
            }
            n_rows += 1;
        }

        let n_columns = match n_columns {
            Some(width) if width >= 2 => width,
            Some(width) => {
                return Err(RegressionError::Data(format!(
                    "need at least one feature column and a target, got {width} columns"
                )));
            }
            None => return Err(RegressionError::Data("no data found in CSV".to_string())),
        };

        let table = Matrix::from_shape_vec((n_rows, n_columns), values)
            .map_err(|e| RegressionError::Data(e.to_string()))?;
        let features = table.slice(s![.., ..n_columns - 1]).to_owned();
        let targets = table.column(n_columns - 1).to_owned();

        log::debug!(
            "loaded {} samples with {} features from {}",
            n_rows,
            n_columns - 1,
            path.as_ref().display()
        );
        Self::new(features, targets)
    }

    /// `targets = features · weights + N(0, noise_std)` with features drawn
    /// from a standard normal.
    pub fn synthetic_linear<R: Rng + ?Sized>(
        n_samples: usize,
        weights: &Vector,
        noise_std: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let standard = Normal::new(0.0, 1.0)
            .map_err(|e| RegressionError::InvalidParameter(e.to_string()))?;
        let features = Matrix::random_using((n_samples, weights.len()), standard, rng);

        let mut targets = features.dot(weights);
        if noise_std > 0.0 {
            let noise = Normal::new(0.0, noise_std)
                .map_err(|e| RegressionError::InvalidParameter(e.to_string()))?;
            targets += &Vector::random_using(n_samples, noise, rng);
        }

        Self::new(features, targets)
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// A copy with a constant `1.0` column prepended.
    pub fn with_bias(&self) -> Self {
        let mut features = Matrix::ones((self.n_samples(), self.n_features() + 1));
        features.slice_mut(s![.., 1..]).assign(&self.features);

        Self {
            features,
            targets: self.targets.clone(),
        }
    }

    /// Draws a uniform permutation of the rows from `rng` and applies it to
    /// features and targets alike.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.n_samples()).collect();
        order.shuffle(rng);
        self.features = self.features.select(Axis(0), &order);
        self.targets = self.targets.select(Axis(0), &order);
    }

    /// Splits off the last `test_size` fraction of rows as the test split.
    pub fn train_test_split(&self, test_size: f64) -> Result<(Self, Self)> {
        if test_size <= 0.0 || test_size >= 1.0 {
            return Err(RegressionError::InvalidParameter(format!(
                "test_size must be between 0 and 1, got {test_size}"
            )));
        }

        let n_samples = self.n_samples();
        let n_test = (n_samples as f64 * test_size).round() as usize;
        let n_train = n_samples - n_test;
        if n_train == 0 || n_test == 0 {
            return Err(RegressionError::InvalidParameter(format!(
                "splitting {n_samples} samples with test_size {test_size} leaves an empty split"
            )));
        }

        let train = Dataset::new(
            self.features.slice(s![..n_train, ..]).to_owned(),
            self.targets.slice(s![..n_train]).to_owned(),
        )?;
        let test = Dataset::new(
            self.features.slice(s![n_train.., ..]).to_owned(),
            self.targets.slice(s![n_train..]).to_owned(),
        )?;

        Ok((train, test))
    }
}

/// The train and test splits of one run; both have the same width.
#[derive(Clone, Debug)]
pub struct RegressionData {
    pub train: Dataset,
    pub test: Dataset,
}

impl RegressionData {
    pub fn new(train: Dataset, test: Dataset) -> Result<Self> {
        if train.n_features() != test.n_features() {
            return Err(RegressionError::mismatch(
                "test split features",
                train.n_features(),
                test.n_features(),
            ));
        }

        Ok(Self { train, test })
    }

    pub fn n_features(&self) -> usize {
        self.train.n_features()
    }

    pub fn with_bias(&self) -> Self {
        Self {
            train: self.train.with_bias(),
            test: self.test.with_bias(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn pairs(dataset: &Dataset) -> Vec<(Vec<u64>, u64)> {
        let mut pairs: Vec<_> = dataset
            .features
            .rows()
            .into_iter()
            .zip(dataset.targets.iter())
            .map(|(x, y)| (x.iter().map(|v| v.to_bits()).collect(), y.to_bits()))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let targets = array![1.0, 2.0, 3.0];

        let dataset = Dataset::new(features, targets).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
    }

    #[test]
    fn test_dataset_length_mismatch() {
        let features = array![[1.0], [2.0]];
        let targets = array![1.0];
        assert!(Dataset::new(features, targets).is_err());
    }

    #[test]
    fn test_train_test_split() {
        let features = Matrix::zeros((100, 5));
        let targets = Vector::zeros(100);
        let dataset = Dataset::new(features, targets).unwrap();

        let (train, test) = dataset.train_test_split(0.2).unwrap();
        assert_eq!(train.n_samples(), 80);
        assert_eq!(test.n_samples(), 20);
    }

    #[test]
    fn test_split_keeps_rows_disjoint() {
        let features = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        let targets = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let dataset = Dataset::new(features, targets).unwrap();

        let (train, test) = dataset.train_test_split(0.4).unwrap();
        assert_eq!(train.targets, array![0.0, 1.0, 2.0]);
        assert_eq!(test.targets, array![3.0, 4.0]);
    }

    #[test]
    fn test_with_bias_prepends_ones() {
        let dataset = Dataset::new(array![[2.0], [3.0]], array![1.0, 1.0]).unwrap();
        let biased = dataset.with_bias();

        assert_eq!(biased.features, array![[1.0, 2.0], [1.0, 3.0]]);
        assert_eq!(biased.targets, dataset.targets);
    }

    #[test]
    fn test_shuffle_preserves_pairs() {
        let mut rng = StdRng::seed_from_u64(42);
        let original =
            Dataset::synthetic_linear(40, &array![1.0, -2.0, 0.5], 0.1, &mut rng).unwrap();
        let mut shuffled = original.clone();

        shuffled.shuffle(&mut rng);

        assert_eq!(pairs(&original), pairs(&shuffled));
        assert_ne!(original.targets, shuffled.targets);
    }

    #[test]
    fn test_shuffle_reproducible_for_seed() {
        let dataset = Dataset::new(
            Matrix::from_shape_fn((10, 2), |(i, j)| (i * 2 + j) as f64),
            Vector::from_shape_fn(10, |i| i as f64),
        )
        .unwrap();

        let mut a = dataset.clone();
        let mut b = dataset.clone();
        a.shuffle(&mut StdRng::seed_from_u64(7));
        b.shuffle(&mut StdRng::seed_from_u64(7));

        assert_eq!(a.features, b.features);
        assert_eq!(a.targets, b.targets);
    }

    #[test]
    fn test_shuffle_keeps_rows_paired() {
        let mut dataset = Dataset::new(
            array![[1.0], [2.0], [3.0], [4.0], [5.0]],
            array![10.0, 20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();
        dataset.shuffle(&mut StdRng::seed_from_u64(3));

        for (x, y) in dataset.features.column(0).iter().zip(dataset.targets.iter()) {
            assert_eq!(*y, x * 10.0);
        }
        let mut seen: Vec<f64> = dataset.targets.to_vec();
        seen.sort_by(f64::total_cmp);
        assert_eq!(seen, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_synthetic_linear_without_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        let weights = array![2.0, -1.0];
        let dataset = Dataset::synthetic_linear(25, &weights, 0.0, &mut rng).unwrap();

        assert_eq!(dataset.targets, dataset.features.dot(&weights));
    }

    #[test]
    fn test_regression_data_width_mismatch() {
        let train = Dataset::new(array![[1.0, 2.0]], array![1.0]).unwrap();
        let test = Dataset::new(array![[1.0]], array![1.0]).unwrap();
        assert!(RegressionData::new(train, test).is_err());
    }

    #[test]
    fn test_from_csv() {
        let path = std::env::temp_dir().join("tabreg_dataset_from_csv.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "a,b,target").unwrap();
        writeln!(file, "1.0, 2.0, 3.0").unwrap();
        writeln!(file, "4.0, 5.0, 9.0").unwrap();
        drop(file);

        let dataset = Dataset::from_csv(&path, true).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dataset.features, array![[1.0, 2.0], [4.0, 5.0]]);
        assert_eq!(dataset.targets, array![3.0, 9.0]);
    }

    #[test]
    fn test_from_csv_rejects_text() {
        let path = std::env::temp_dir().join("tabreg_dataset_bad.csv");
        std::fs::write(&path, "1.0,abc\n").unwrap();

        let result = Dataset::from_csv(&path, false);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(RegressionError::Data(_))));
    }
}
