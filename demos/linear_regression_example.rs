use ndarray::array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tabreg::{
    Dataset, LinearRegression, LogSink, RegressionData, Regressor, StandardScaler, Trainer,
    TrainingConfig, solve_analytically,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainingConfig::new();
    let mut rng = StdRng::seed_from_u64(config.seed);

    // y = 3*x1 + 2*x2 - x3 + noise
    let true_weights = array![3.0, 2.0, -1.0];
    let dataset = Dataset::synthetic_linear(200, &true_weights, 0.5, &mut rng)?;
    println!(
        "Dataset: {} samples, {} features",
        dataset.n_samples(),
        dataset.n_features()
    );

    let (mut train, mut test) = dataset.train_test_split(0.2)?;

    let mut scaler = StandardScaler::new();
    train.features = scaler.fit_transform(&train.features)?;
    test.features = scaler.transform(&test.features)?;

    let mut data = RegressionData::new(train, test)?.with_bias();

    let reference = solve_analytically(&data.train.features, &data.train.targets)?;
    let closed_form = LinearRegression::from_weights(reference.clone());

    let mut model = LinearRegression::new(data.n_features());
    let mut trainer = Trainer::new(config, rng);
    let history = trainer.fit(&mut model, &mut data, Some(&reference), &mut LogSink)?;

    println!("\nResults:");
    println!(
        "  Closed form  train RMSE {:.4}  test RMSE {:.4}",
        closed_form.evaluate(&data.train.features, &data.train.targets)?,
        closed_form.evaluate(&data.test.features, &data.test.targets)?
    );
    if let Some(last) = history.final_record() {
        println!(
            "  Online       train RMSE {:.4}  test RMSE {:.4}  distance {:.4}",
            last.train_rmse,
            last.test_rmse,
            last.distance.unwrap_or(f64::NAN)
        );
    }
    println!("  Closed-form weights: {:.4}", reference);
    println!("  Online weights:      {:.4}", model.weights().unwrap());

    let path = std::env::temp_dir().join("tabreg_linear_history.csv");
    history.write_csv(&path)?;
    println!("\nPer-epoch history written to {}", path.display());

    Ok(())
}
