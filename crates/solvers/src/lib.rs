//! Step-by-step numerical solvers.
//!
//! Every solver owns a [`Trace`](numtrace_core::Trace) of its most recent
//! solve, readable through [`Traced`](numtrace_core::Traced), and reports how
//! the solve ended as an [`Outcome`](numtrace_core::Outcome).
//!
//! - [`root`]: Bisection, False Position, Secant, Newton-Raphson and
//!   fixed-point iteration for `f(x) = 0`
//! - [`linear`]: Cramer's Rule, Gaussian elimination, Jacobi and
//!   Gauss-Seidel for `A x = b`
//!
//! Solvers log through [`tracing`] and never install a subscriber.

pub mod linear;
pub mod root;
