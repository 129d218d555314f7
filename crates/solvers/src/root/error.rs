use std::error::Error as StdError;

use thiserror::Error;

use super::ConfigError;

/// Errors that stop a root finder.
///
/// Running out of iterations is not an error: the solver reports its best
/// estimate with [`Outcome::MaxIterationsReached`](numtrace_core::Outcome).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("f(a) and f(b) must have opposite signs, got f({a}) = {fa} and f({b}) = {fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("f(x0) and f(x1) are equal ({value}) at x0 = {x0}, x1 = {x1}, division by zero")]
    EqualValues { x0: f64, x1: f64, value: f64 },

    #[error("derivative too small (near zero) at x = {x}: f'(x) = {derivative}")]
    ZeroDerivative { x: f64, derivative: f64 },

    #[error("error evaluating function at {x}: {source}")]
    Evaluation {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("function value is not finite at x = {x}: {value}")]
    NonFinite { x: f64, value: f64 },
}
