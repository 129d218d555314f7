//! Shared building blocks for step-by-step numerical solvers.
//!
//! This crate defines the pieces every solver in the workspace relies on:
//!
//! - [`Fraction`]: an exact rational kept in lowest terms
//! - [`DecimalFormat`] and [`Formats`]: tolerance-driven number formatting
//! - [`Trace`] and [`Traced`]: the ordered record of a solve
//! - [`Outcome`]: how a solve ended
//! - [`Evaluator`]: the seam through which solvers evaluate formulas, with
//!   [`StandardEvaluator`] as the built-in implementation

pub mod expression;
pub mod format;
mod fraction;
mod outcome;
mod trace;

pub use expression::{Evaluator, Expression, ExpressionError, StandardEvaluator};
pub use format::{DecimalFormat, Formats};
pub use fraction::{FLOAT_SCALE, Fraction, FractionError};
pub use outcome::Outcome;
pub use trace::{Trace, Traced};
