use ndarray::array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tabreg::{
    Dataset, LinearRegression, RegressionData, Regressor, Trainer, TrainingConfig,
    TrainingHistory, solve_analytically,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Online Linear Regression vs Closed Form ===\n");

    // y = 2x, with the bias column already in place
    let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
    let y = array![2.0, 4.0, 6.0];

    let reference = solve_analytically(&x, &y)?;
    println!("Closed-form weights: {:.4}", reference);

    let mut data = RegressionData::new(
        Dataset::new(x.clone(), y.clone())?,
        Dataset::new(x.clone(), y.clone())?,
    )?;

    let mut model = LinearRegression::new(2);
    let mut trainer = Trainer::new(TrainingConfig::new(), StdRng::seed_from_u64(42));
    let mut history = TrainingHistory::new();
    trainer.fit(&mut model, &mut data, Some(&reference), &mut history)?;

    println!("\n{:>6} {:>12} {:>12}", "Epoch", "Train RMSE", "Distance");
    for record in history.records().iter().step_by(15) {
        println!(
            "{:>6} {:>12.4} {:>12.4}",
            record.epoch,
            record.train_rmse,
            record.distance.unwrap_or(f64::NAN)
        );
    }

    println!("\nOnline weights after {} epochs: {:.4}", history.len(), model.weights().unwrap());

    let predictions = model.predict(&x)?;
    println!("\nPredictions vs Actual:");
    for (i, (pred, actual)) in predictions.iter().zip(y.iter()).enumerate() {
        println!(
            "Sample {}: Predicted={:.2}, Actual={:.2}, Error={:.2}",
            i + 1,
            pred,
            actual,
            (pred - actual).abs()
        );
    }

    Ok(())
}
