//! Fixed-point iteration.

use numtrace_core::{Evaluator, Outcome, StandardEvaluator};
use tracing::{debug, warn};

use super::{Config, Error, Finder, root_finder_accessors};

/// Step of the forward difference used to estimate `g'(x0)`.
pub const SLOPE_STEP: f64 = 1e-10;

/// Finds a fixed point `x = g(x)` by applying `g` repeatedly.
///
/// The expression passed to [`solve`](Self::solve) is the iteration map `g`
/// itself. Before iterating, `g'(x0)` is estimated with a forward difference
/// and a warning is written if `|g'(x0)| >= 1`, since convergence is then not
/// guaranteed. Converges when `|g(x) - x| < tol`; on reaching the iteration
/// cap the latest estimate is reported.
#[derive(Debug)]
pub struct FixedPoint<E = StandardEvaluator> {
    finder: Finder<E>,
}

impl FixedPoint {
    /// Creates a solver with the built-in evaluator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, StandardEvaluator)
    }
}

impl Default for FixedPoint {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: Evaluator> FixedPoint<E> {
    /// Creates a solver that evaluates formulas with `evaluator`.
    pub fn with_evaluator(config: Config, evaluator: E) -> Self {
        Self {
            finder: Finder::new("Fixed-point iteration", config, evaluator),
        }
    }

    /// Iterates the map `expression` starting from `x0`.
    pub fn solve(&mut self, expression: &str, x0: f64) -> Outcome {
        let result = self
            .finder
            .begin(expression, None)
            .and_then(|()| self.run(x0));
        self.finder.finish(result)
    }

    /// Like [`solve`](Self::solve), but first replaces the tolerance.
    pub fn solve_with_tolerance(&mut self, expression: &str, x0: f64, tolerance: f64) -> Outcome {
        let result = self
            .finder
            .begin(expression, Some(tolerance))
            .and_then(|()| self.run(x0));
        self.finder.finish(result)
    }

    fn run(&mut self, x0: f64) -> Result<(f64, Outcome), Error> {
        let f = &mut self.finder;

        let slope = (f.eval(x0 + SLOPE_STEP)? - f.eval(x0)?) / SLOPE_STEP;
        f.step(format!("Derivative at initial guess: g'(x0) = {}", f.num(slope)));
        if slope.abs() >= 1.0 {
            warn!(x0, slope, "fixed-point map is not a contraction at the initial guess");
            f.step("Warning: |g'(x)| ≥ 1 at initial guess. Convergence not guaranteed.");
        }
        f.step(format!(
            "Starting fixed-point iteration with initial guess: {}",
            f.num(x0)
        ));
        f.blank();

        let tolerance = f.tolerance();
        let mut x = x0;

        for iteration in 1..=f.max_iters() {
            let gx = f.eval(x)?;
            let error = (gx - x).abs();
            f.record(gx);

            f.step(format!("Iteration {iteration}:"));
            f.step(format!("  x{} = {}", iteration - 1, f.num(x)));
            f.step(format!(
                "  x{iteration} = g(x{}) = {} = {}",
                iteration - 1,
                f.plug(x),
                f.num(gx)
            ));
            f.step(format!(
                "  Error = |g(x) - x| = |{} - {}| = {}",
                f.num(gx),
                f.num(x),
                f.num(error)
            ));
            f.blank();
            debug!(iteration, x, gx, error, "fixed-point step");

            if error < tolerance {
                return Ok(f.converged(gx));
            }

            x = gx;
        }

        Ok(f.cap_reached(x))
    }
}

root_finder_accessors!(FixedPoint);
