use thiserror::Error;

use crate::root::validate_positive;

/// Default tolerance for singularity checks and iterative convergence.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Pass cap for the iterative solvers.
pub const MAX_ITERATIONS: usize = 1000;

/// Configuration shared by the linear-system solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tolerance: f64,
}

/// Errors that can occur when validating a linear solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Config {
    /// Creates a config with a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn new(tolerance: f64) -> Result<Self, ConfigError> {
        Self::default().with_tolerance(tolerance)
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

    /// Replaces the tolerance in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<(), ConfigError> {
        self.tolerance = validate_positive(tolerance).map_err(ConfigError::Tolerance)?;
        Ok(())
    }

    /// Returns the tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_tolerance() {
        assert_eq!(Config::default().tolerance(), DEFAULT_TOLERANCE);
        assert_eq!(Config::new(1e-6).map(|c| c.tolerance()), Ok(1e-6));
        assert_eq!(Config::new(-1.0), Err(ConfigError::Tolerance(-1.0)));
        assert!(Config::new(f64::NAN).is_err());
    }
}
