use crate::{RegressionError, Result, Vector};

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(RegressionError::mismatch("metric inputs", y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(RegressionError::InvalidParameter(
            "metrics need at least one sample".to_string(),
        ));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_pred - y_true;
    Ok(diff.dot(&diff) / y_true.len() as f64)
}

/// RMSE, the per-epoch loss reported for both models.
pub fn root_mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / y_true.len() as f64)
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}
