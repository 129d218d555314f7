//! Solvers for square linear systems `A x = b`.
//!
//! The direct methods work in exact [`Fraction`](numtrace_core::Fraction)
//! arithmetic, so their traces show reduced fractions alongside decimals. The
//! iterative methods work in `f64` and first try to reorder the equations
//! into a diagonally dominant arrangement.
//!
//! Inputs are never modified: every solver copies the matrix and constants
//! before transforming them.
//!
//! # Solvers
//!
//! - [`CramersRule`]: determinants by cofactor expansion
//! - [`GaussianElimination`]: forward elimination with partial pivoting
//! - [`Jacobi`]: each pass uses only the previous pass's vector
//! - [`GaussSeidel`]: each pass uses components updated earlier in the pass

mod config;
mod dominance;
mod error;
mod iterative;
mod system;

pub mod cramer;
pub mod gauss_seidel;
pub mod gaussian;
pub mod jacobi;

pub use config::{Config, ConfigError, DEFAULT_TOLERANCE, MAX_ITERATIONS};
pub use cramer::CramersRule;
pub use error::Error;
pub use gauss_seidel::GaussSeidel;
pub use gaussian::GaussianElimination;
pub use jacobi::Jacobi;

use numtrace_core::{Formats, Outcome, Trace};
use tracing::{info, warn};

/// Configuration and output shared by every linear solver.
#[derive(Debug, Clone)]
pub(crate) struct Output<T> {
    method: &'static str,
    config: Config,
    formats: Formats,
    trace: Trace,
    solution: Vec<T>,
    error: Option<Error>,
}

impl<T> Output<T> {
    pub(crate) fn new(method: &'static str, config: Config) -> Self {
        Self {
            method,
            formats: Formats::for_tolerance(config.tolerance()),
            config,
            trace: Trace::new(),
            solution: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn trace(&self) -> &Trace {
        &self.trace
    }

    pub(crate) fn solution(&self) -> &[T] {
        &self.solution
    }

    pub(crate) fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub(crate) fn tolerance(&self) -> f64 {
        self.config.tolerance()
    }

    pub(crate) fn formats(&self) -> Formats {
        self.formats
    }

    /// Replaces the tolerance and re-derives the formats.
    pub(crate) fn set_tolerance(&mut self, tolerance: f64) -> Result<(), ConfigError> {
        self.config.set_tolerance(tolerance)?;
        self.formats = Formats::for_tolerance(tolerance);
        Ok(())
    }

    /// Clears the previous solve and applies a tolerance override.
    pub(crate) fn begin(&mut self, tolerance: Option<f64>) -> Result<(), Error> {
        self.trace.clear();
        self.solution.clear();
        self.error = None;

        if let Some(tolerance) = tolerance {
            self.set_tolerance(tolerance)?;
        }
        Ok(())
    }

    /// Formats a number for the trace.
    pub(crate) fn num(&self, value: f64) -> String {
        self.formats.decimal().format(value)
    }

    pub(crate) fn step(&mut self, line: impl Into<String>) {
        self.trace.step(line);
    }

    pub(crate) fn steps<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.trace.extend_steps(lines);
    }

    pub(crate) fn blank(&mut self) {
        self.trace.blank();
    }

    pub(crate) fn answer(&mut self, line: impl Into<String>) {
        self.trace.answer(line);
    }

    /// Stores the solution, or writes the failure line.
    ///
    /// Answers are written by the solver before it returns `Ok`.
    pub(crate) fn finish(&mut self, result: Result<(Vec<T>, Outcome), Error>) -> Outcome {
        match result {
            Ok((solution, outcome)) => {
                info!(
                    method = self.method,
                    unknowns = solution.len(),
                    ?outcome,
                    "linear solver finished"
                );
                self.solution = solution;
                outcome
            }
            Err(error) => {
                warn!(method = self.method, %error, "linear solver failed");
                self.step(format!("{} cannot continue: {error}", self.method));
                self.error = Some(error);
                Outcome::Failed
            }
        }
    }
}

/// Implements the accessors and [`Traced`](numtrace_core::Traced) shared by
/// every linear solver wrapping an [`Output`] in a field named `output`.
macro_rules! linear_solver_accessors {
    ($name:ident, $value:ty) => {
        impl $name {
            /// Returns the configuration.
            #[must_use]
            pub fn config(&self) -> &$crate::linear::Config {
                self.output.config()
            }

            /// Returns the tolerance.
            #[must_use]
            pub fn tolerance(&self) -> f64 {
                self.output.tolerance()
            }

            /// Replaces the tolerance used by later solves.
            ///
            /// # Errors
            ///
            /// Returns an error if the tolerance is not finite and positive.
            pub fn set_tolerance(
                &mut self,
                tolerance: f64,
            ) -> Result<(), $crate::linear::ConfigError> {
                self.output.set_tolerance(tolerance)
            }

            /// Returns the solution of the last solve, empty if it failed.
            #[must_use]
            pub fn solution(&self) -> &[$value] {
                self.output.solution()
            }

            /// Returns the error that stopped the last solve, if any.
            #[must_use]
            pub fn error(&self) -> Option<&$crate::linear::Error> {
                self.output.error()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new($crate::linear::Config::default())
            }
        }

        impl numtrace_core::Traced for $name {
            fn trace(&self) -> &numtrace_core::Trace {
                self.output.trace()
            }
        }
    };
}

pub(crate) use linear_solver_accessors;
