//! The bisection method.

use numtrace_core::{Evaluator, Outcome, StandardEvaluator};
use tracing::debug;

use super::{Config, Error, Finder, bracket::Bracket, root_finder_accessors};

/// Finds a root by repeatedly halving an interval `[a, b]` whose endpoint
/// values have opposite signs.
///
/// Converges when `|f(c)| < tol` or the half-width falls below `tol`. On
/// reaching the iteration cap the midpoint of the final bracket is reported.
///
/// # Examples
/// ```
/// use numtrace_core::Outcome;
/// use numtrace_solvers::root::Bisection;
///
/// let mut solver = Bisection::default();
/// assert_eq!(solver.solve("x^2 - 4", 1.0, 3.0), Outcome::Converged);
/// assert_eq!(solver.root(), Some(2.0));
/// ```
#[derive(Debug)]
pub struct Bisection<E = StandardEvaluator> {
    finder: Finder<E>,
}

impl Bisection {
    /// Creates a solver with the built-in evaluator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, StandardEvaluator)
    }
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: Evaluator> Bisection<E> {
    /// Creates a solver that evaluates formulas with `evaluator`.
    pub fn with_evaluator(config: Config, evaluator: E) -> Self {
        Self {
            finder: Finder::new("Bisection method", config, evaluator),
        }
    }

    /// Searches `[a, b]` for a root of `expression`.
    pub fn solve(&mut self, expression: &str, a: f64, b: f64) -> Outcome {
        let result = self
            .finder
            .begin(expression, None)
            .and_then(|()| self.run(a, b));
        self.finder.finish(result)
    }

    /// Like [`solve`](Self::solve), but first replaces the tolerance.
    pub fn solve_with_tolerance(
        &mut self,
        expression: &str,
        a: f64,
        b: f64,
        tolerance: f64,
    ) -> Outcome {
        let result = self
            .finder
            .begin(expression, Some(tolerance))
            .and_then(|()| self.run(a, b));
        self.finder.finish(result)
    }

    fn run(&mut self, a: f64, b: f64) -> Result<(f64, Outcome), Error> {
        let f = &mut self.finder;
        let fa = f.eval(a)?;
        let fb = f.eval(b)?;

        f.step("Initial values:");
        f.step(format!("a = {}, f(a) = {} = {}", f.num(a), f.plug(a), f.num(fa)));
        f.step(format!("b = {}, f(b) = {} = {}", f.num(b), f.plug(b), f.num(fb)));
        f.blank();

        let mut bracket = Bracket::new(a, b, fa, fb)?;
        let tolerance = f.tolerance();

        for iteration in 1..=f.max_iters() {
            let (a, fa) = bracket.left();
            let (b, fb) = bracket.right();
            let c = bracket.midpoint();
            let fc = f.eval(c)?;
            f.record(c);

            f.step(format!("Iteration {iteration}:"));
            f.step(format!("  a = {}, f(a) = {} = {}", f.num(a), f.plug(a), f.num(fa)));
            f.step(format!("  b = {}, f(b) = {} = {}", f.num(b), f.plug(b), f.num(fb)));
            f.step(format!(
                "  c = (a + b)/2 = ({} + {})/2 = {}",
                f.num(a),
                f.num(b),
                f.num(c)
            ));
            f.step(format!("  f(c) = {} = {}", f.plug(c), f.num(fc)));
            f.blank();
            debug!(iteration, a, b, c, fc, "bisection step");

            if fc.abs() < tolerance || 0.5 * bracket.width() < tolerance {
                return Ok(f.converged(c));
            }

            bracket.shrink(c, fc);
        }

        Ok(f.cap_reached(bracket.midpoint()))
    }
}

root_finder_accessors!(Bisection);
