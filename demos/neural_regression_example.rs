use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tabreg::{
    Dataset, LogSink, NeuralRegression, RegressionData, Regressor, Trainer, TrainingConfig,
    metrics,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainingConfig::new().epochs(100).learning_rate(0.005).hidden_size(32);
    let mut rng = StdRng::seed_from_u64(config.seed);

    // y = x² + 1 on [-2, 2], a target a linear model cannot fit
    let features = Array2::from_shape_fn((200, 1), |(i, _)| -2.0 + 4.0 * i as f64 / 199.0);
    let targets = features.column(0).mapv(|x| x * x + 1.0);
    let mut dataset = Dataset::new(features, targets)?;
    dataset.shuffle(&mut rng);
    let (train, test) = dataset.train_test_split(0.25)?;
    let mut data = RegressionData::new(train, test)?;

    let mut model = NeuralRegression::new(data.n_features(), config.hidden_size, &mut rng)?;
    println!(
        "Network: {} input(s), {} hidden units",
        model.n_features(),
        model.hidden_size()
    );
    let mut trainer = Trainer::new(config, rng);
    let history = trainer.fit(&mut model, &mut data, None, &mut LogSink)?;

    if let Some(epoch) = history.diverged() {
        println!("Training diverged at epoch {epoch}");
    }

    let predictions = model.predict(&data.test.features)?;
    println!("\nResults:");
    println!("  Test RMSE: {:.4}", history.final_record().map_or(f64::NAN, |r| r.test_rmse));
    println!("  Test MAE:  {:.4}", metrics::mean_absolute_error(&data.test.targets, &predictions)?);
    println!("  Test R²:   {:.4}", metrics::r2_score(&data.test.targets, &predictions)?);

    println!("\nSample predictions:");
    for i in 0..5.min(data.test.n_samples()) {
        println!(
            "  x={:>6.3}  predicted={:>7.3}  actual={:>7.3}",
            data.test.features[(i, 0)],
            predictions[i],
            data.test.targets[i]
        );
    }

    Ok(())
}
