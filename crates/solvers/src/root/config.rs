use numtrace_core::expression::is_identifier;
use thiserror::Error;

/// Default convergence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERS: usize = 1000;

/// Default free variable name.
pub const DEFAULT_VARIABLE: &str = "x";

/// Default step for the Newton-Raphson centered difference.
pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-5;

/// Configuration shared by the root finders.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    variable: String,
}

/// Errors that can occur when validating a root finder config.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),

    #[error("variable must be an identifier, got {0:?}")]
    Variable(String),

    #[error("derivative step must be finite and positive, got {0}")]
    DerivativeStep(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iters: DEFAULT_MAX_ITERS,
            variable: DEFAULT_VARIABLE.to_owned(),
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance and variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive, or if the
    /// variable is not a valid identifier.
    pub fn new(
        tolerance: f64,
        max_iters: usize,
        variable: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::default()
            .with_tolerance(tolerance)?
            .with_max_iters(max_iters)
            .with_variable(variable)
    }

    /// Returns the config with a different tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        self.set_tolerance(tolerance)?;
        Ok(self)
    }

    /// Returns the config with a different iteration cap.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Returns the config with a different variable name.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not a valid identifier.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Result<Self, ConfigError> {
        let variable = variable.into();
        if !is_identifier(&variable) {
            return Err(ConfigError::Variable(variable));
        }
        self.variable = variable;
        Ok(self)
    }

    /// Replaces the tolerance in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<(), ConfigError> {
        validate_positive(tolerance).map_err(ConfigError::Tolerance)?;
        self.tolerance = tolerance;
        Ok(())
    }

    /// Returns the convergence tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the free variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

/// Checks that a value is finite and strictly positive.
pub(crate) fn validate_positive(value: f64) -> Result<f64, f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(value)
    }
}
