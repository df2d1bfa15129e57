use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Everything that can go wrong while loading data, solving or training.
///
/// Numeric divergence during training is deliberately not part of this enum:
/// it is reported through [`crate::EpochRecord::diverged`] instead.
#[derive(Debug)]
pub enum RegressionError {
    /// Two shapes that must agree do not.
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    /// The ridge-regularised normal equations are still not solvable.
    SingularMatrix,
    /// A configuration value or input is outside its valid domain.
    InvalidParameter(String),
    /// Malformed tabular input.
    Data(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Config(serde_json::Error),
}

impl RegressionError {
    pub(crate) fn mismatch(context: &'static str, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            got,
        }
    }
}

impl Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                context,
                expected,
                got,
            } => write!(f, "dimension mismatch in {context}: expected {expected}, got {got}"),
            Self::SingularMatrix => write!(
                f,
                "regularized normal matrix is singular, no closed-form solution exists"
            ),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::Data(msg) => write!(f, "invalid data: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl Error for RegressionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RegressionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for RegressionError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<serde_json::Error> for RegressionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = RegressionError::mismatch("predict", 3, 2);
        assert_eq!(
            err.to_string(),
            "dimension mismatch in predict: expected 3, got 2"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        let err: RegressionError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(RegressionError::SingularMatrix.source().is_none());
    }
}
