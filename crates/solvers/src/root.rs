//! Single-variable root finders.
//!
//! Every finder evaluates a formula through an [`Evaluator`], records each
//! iteration in its [`Trace`], and reports how the solve ended as an
//! [`Outcome`]. Errors never escape [`solve`](Bisection::solve): they are
//! written to the trace and kept for inspection through `error()`.
//!
//! # Solvers
//!
//! - [`Bisection`]: halves a sign-change bracket
//! - [`FalsePosition`]: shrinks a bracket at the chord's zero crossing
//! - [`Secant`]: chord through the two most recent estimates
//! - [`NewtonRaphson`]: tangent step with a centered-difference derivative
//! - [`FixedPoint`]: iterates `x = g(x)`

mod bracket;
mod config;
mod error;

pub mod bisection;
pub mod false_position;
pub mod fixed_point;
pub mod newton_raphson;
pub mod secant;

pub use bisection::Bisection;
pub use config::{
    Config, ConfigError, DEFAULT_DERIVATIVE_STEP, DEFAULT_MAX_ITERS, DEFAULT_TOLERANCE,
    DEFAULT_VARIABLE,
};
pub use error::Error;
pub use false_position::FalsePosition;
pub use fixed_point::FixedPoint;
pub use newton_raphson::NewtonRaphson;
pub use secant::Secant;

pub(crate) use config::validate_positive;

use numtrace_core::{Evaluator, Formats, Outcome, Trace, expression::substitute};
use tracing::{info, warn};

/// State shared by every root finder.
///
/// Holds the configuration and the output of the most recent solve. A solve
/// starts with [`begin`](Finder::begin) and ends with
/// [`finish`](Finder::finish), which turns the result into answers or a
/// failure line.
#[derive(Debug)]
pub(crate) struct Finder<E> {
    method: &'static str,
    config: Config,
    formats: Formats,
    evaluator: E,
    expression: String,
    trace: Trace,
    iterations: Vec<f64>,
    root: Option<f64>,
    error: Option<Error>,
}

impl<E: Evaluator> Finder<E> {
    pub(crate) fn new(method: &'static str, config: Config, evaluator: E) -> Self {
        Self {
            method,
            formats: Formats::for_tolerance(config.tolerance()),
            config,
            evaluator,
            expression: String::new(),
            trace: Trace::new(),
            iterations: Vec::new(),
            root: None,
            error: None,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn trace(&self) -> &Trace {
        &self.trace
    }

    pub(crate) fn iterations(&self) -> &[f64] {
        &self.iterations
    }

    pub(crate) fn root(&self) -> Option<f64> {
        self.root
    }

    pub(crate) fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub(crate) fn tolerance(&self) -> f64 {
        self.config.tolerance()
    }

    pub(crate) fn max_iters(&self) -> usize {
        self.config.max_iters()
    }

    /// Replaces the tolerance and re-derives the formats.
    pub(crate) fn set_tolerance(&mut self, tolerance: f64) -> Result<(), ConfigError> {
        self.config.set_tolerance(tolerance)?;
        self.formats = Formats::for_tolerance(tolerance);
        Ok(())
    }

    /// Clears the previous solve and writes the common header.
    pub(crate) fn begin(&mut self, expression: &str, tolerance: Option<f64>) -> Result<(), Error> {
        self.trace.clear();
        self.iterations.clear();
        self.root = None;
        self.error = None;
        expression.clone_into(&mut self.expression);

        if let Some(tolerance) = tolerance {
            self.set_tolerance(tolerance)?;
        }

        self.step(format!("Using tolerance: {}", self.num(self.tolerance())));
        self.step(format!("Maximum iterations: {}", self.max_iters()));
        Ok(())
    }

    /// Evaluates the expression at `x`, rejecting non-finite values.
    pub(crate) fn eval(&self, x: f64) -> Result<f64, Error> {
        let value = self
            .evaluator
            .evaluate(&self.expression, self.config.variable(), x)
            .map_err(|source| Error::Evaluation {
                x,
                source: Box::new(source),
            })?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NonFinite { x, value })
        }
    }

    /// Formats a number for the trace.
    pub(crate) fn num(&self, value: f64) -> String {
        self.formats.decimal().format(value)
    }

    /// Returns the expression text with `x` substituted for the variable.
    pub(crate) fn plug(&self, x: f64) -> String {
        substitute(
            &self.expression,
            self.config.variable(),
            &self.formats.fixed().format(x),
        )
    }

    pub(crate) fn step(&mut self, line: impl Into<String>) {
        self.trace.step(line);
    }

    pub(crate) fn blank(&mut self) {
        self.trace.blank();
    }

    /// Appends an accepted estimate to the iteration record.
    pub(crate) fn record(&mut self, estimate: f64) {
        self.iterations.push(estimate);
    }

    pub(crate) fn converged(&mut self, estimate: f64) -> (f64, Outcome) {
        self.step("Convergence achieved!");
        (estimate, Outcome::Converged)
    }

    pub(crate) fn cap_reached(&mut self, estimate: f64) -> (f64, Outcome) {
        warn!(
            method = self.method,
            max_iters = self.max_iters(),
            estimate,
            "maximum iterations reached without convergence"
        );
        self.step("Maximum iterations reached without convergence.");
        (estimate, Outcome::MaxIterationsReached)
    }

    /// Turns the result of a solve into answers, or a failure line.
    pub(crate) fn finish(&mut self, result: Result<(f64, Outcome), Error>) -> Outcome {
        match result {
            Ok((root, outcome)) => {
                info!(
                    method = self.method,
                    root,
                    iterations = self.iterations.len(),
                    ?outcome,
                    "root finder finished"
                );
                let root_line = format!("Root found: {}", self.num(root));
                self.trace.answer(root_line);
                self.trace
                    .answer(format!("Number of iterations: {}", self.iterations.len()));
                let tolerance_line = format!("Final tolerance: {}", self.num(self.tolerance()));
                self.trace.answer(tolerance_line);
                self.root = Some(root);
                outcome
            }
            Err(error) => {
                warn!(method = self.method, %error, "root finder failed");
                self.step(format!("{} cannot continue: {error}", self.method));
                self.error = Some(error);
                Outcome::Failed
            }
        }
    }
}

/// Implements the accessors and [`Traced`](numtrace_core::Traced) shared by
/// every root finder wrapping a [`Finder`] in a field named `finder`.
macro_rules! root_finder_accessors {
    ($name:ident) => {
        impl<E: numtrace_core::Evaluator> $name<E> {
            /// Returns the configuration.
            #[must_use]
            pub fn config(&self) -> &$crate::root::Config {
                self.finder.config()
            }

            /// Returns the convergence tolerance.
            #[must_use]
            pub fn tolerance(&self) -> f64 {
                self.finder.tolerance()
            }

            /// Replaces the tolerance used by later solves.
            ///
            /// # Errors
            ///
            /// Returns an error if the tolerance is not finite and positive.
            pub fn set_tolerance(
                &mut self,
                tolerance: f64,
            ) -> Result<(), $crate::root::ConfigError> {
                self.finder.set_tolerance(tolerance)
            }

            /// Returns the root reported by the last solve, if any.
            #[must_use]
            pub fn root(&self) -> Option<f64> {
                self.finder.root()
            }

            /// Returns the estimates accepted during the last solve.
            #[must_use]
            pub fn iterations(&self) -> &[f64] {
                self.finder.iterations()
            }

            /// Returns the error that stopped the last solve, if any.
            #[must_use]
            pub fn error(&self) -> Option<&$crate::root::Error> {
                self.finder.error()
            }
        }

        impl<E: numtrace_core::Evaluator> numtrace_core::Traced for $name<E> {
            fn trace(&self) -> &numtrace_core::Trace {
                self.finder.trace()
            }
        }
    };
}

pub(crate) use root_finder_accessors;
