//! The false position (regula falsi) method.

use numtrace_core::{Evaluator, Outcome, StandardEvaluator};
use tracing::debug;

use super::{Config, Error, Finder, bracket::Bracket, root_finder_accessors};

/// Finds a root inside a sign-change bracket by moving one endpoint to where
/// the chord between `(a, f(a))` and `(b, f(b))` crosses zero.
///
/// Converges when `|f(c)| < tol` or `|b - a| < tol`. Also stops when the new
/// point lands exactly on an endpoint, since the bracket can no longer shrink.
/// On reaching the iteration cap the midpoint of the final bracket is
/// reported.
#[derive(Debug)]
pub struct FalsePosition<E = StandardEvaluator> {
    finder: Finder<E>,
}

impl FalsePosition {
    /// Creates a solver with the built-in evaluator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, StandardEvaluator)
    }
}

impl Default for FalsePosition {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: Evaluator> FalsePosition<E> {
    /// Creates a solver that evaluates formulas with `evaluator`.
    pub fn with_evaluator(config: Config, evaluator: E) -> Self {
        Self {
            finder: Finder::new("False Position method", config, evaluator),
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
            let c = bracket.chord_root();
            let fc = f.eval(c)?;
            f.record(c);

            f.step(format!("Iteration {iteration}:"));
            f.step(format!("  a = {}, f(a) = {} = {}", f.num(a), f.plug(a), f.num(fa)));
            f.step(format!("  b = {}, f(b) = {} = {}", f.num(b), f.plug(b), f.num(fb)));
            f.step(format!(
                "  c = a - (f(a)*(b-a))/(f(b)-f(a)) = {} - ({}*({}-{}))/({}-{}) = {}",
                f.num(a),
                f.num(fa),
                f.num(b),
                f.num(a),
                f.num(fb),
                f.num(fa),
                f.num(c)
            ));
            f.step(format!("  f(c) = {} = {}", f.plug(c), f.num(fc)));
            f.blank();
            debug!(iteration, a, b, c, fc, "false position step");

            if fc.abs() < tolerance || bracket.width() < tolerance {
                return Ok(f.converged(c));
            }

            if bracket.is_endpoint(c) {
                f.step("Estimate did not move off the bracket endpoint.");
                return Ok(f.converged(c));
            }

            bracket.shrink(c, fc);
        }

        Ok(f.cap_reached(bracket.midpoint()))
    }
}

root_finder_accessors!(FalsePosition);
