use thiserror::Error;

pub type RegressionResult<T> = Result<T, RegressionError>;

/// Failures raised by the fitting core.
///
/// All of these are deterministic: they come from the shape of the input or the
/// conditioning of the design matrix, so nothing is ever retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("you need some observations to perform the regression")]
    NotPopulated,
    #[error("the model has not been fit yet")]
    NotFitted,
    #[error("not enough observations ({observations}) to support {features} expanded feature(s)")]
    InsufficientData { observations: usize, features: usize },
    #[error("expected {expected} value(s), found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("cross references variable {index} but only {len} variable(s) are available")]
    OutOfBounds { index: usize, len: usize },
    #[error("design matrix is rank deficient at column {column}")]
    NumericDegeneracy { column: usize },
    #[error("invalid cross: {0}")]
    InvalidCross(String),
}

/// Application-level error carrying the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        AppError::new(4, format!("Regression failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
