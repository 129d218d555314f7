//! The secant method.

use numtrace_core::{Evaluator, Outcome, StandardEvaluator};
use tracing::debug;

use super::{Config, Error, Finder, root_finder_accessors};

/// Finds a root from two starting points by following the chord through the
/// two most recent estimates.
///
/// Converges when successive estimates differ by less than `tol`. Fails if
/// the two function values ever coincide, since the chord is then flat. On
/// reaching the iteration cap the latest estimate is reported.
#[derive(Debug)]
pub struct Secant<E = StandardEvaluator> {
    finder: Finder<E>,
}

impl Secant {
    /// Creates a solver with the built-in evaluator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, StandardEvaluator)
    }
}

impl Default for Secant {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: Evaluator> Secant<E> {
    /// Creates a solver that evaluates formulas with `evaluator`.
    pub fn with_evaluator(config: Config, evaluator: E) -> Self {
        Self {
            finder: Finder::new("Secant method", config, evaluator),
        }
    }

    /// Searches for a root of `expression` starting from `x0` and `x1`.
    pub fn solve(&mut self, expression: &str, x0: f64, x1: f64) -> Outcome {
        let result = self
            .finder
            .begin(expression, None)
            .and_then(|()| self.run(x0, x1));
        self.finder.finish(result)
    }

    /// Like [`solve`](Self::solve), but first replaces the tolerance.
    pub fn solve_with_tolerance(
        &mut self,
        expression: &str,
        x0: f64,
        x1: f64,
        tolerance: f64,
    ) -> Outcome {
        let result = self
            .finder
            .begin(expression, Some(tolerance))
            .and_then(|()| self.run(x0, x1));
        self.finder.finish(result)
    }

    fn run(&mut self, x0: f64, x1: f64) -> Result<(f64, Outcome), Error> {
        let f = &mut self.finder;
        let (mut x0, mut x1) = (x0, x1);
        let mut f0 = f.eval(x0)?;
        let mut f1 = f.eval(x1)?;

        f.step("Initial values:");
        f.step(format!("x0 = {}, f(x0) = {} = {}", f.num(x0), f.plug(x0), f.num(f0)));
        f.step(format!("x1 = {}, f(x1) = {} = {}", f.num(x1), f.plug(x1), f.num(f1)));
        f.blank();

        let tolerance = f.tolerance();

        for iteration in 1..=f.max_iters() {
            #[allow(clippy::float_cmp)]
            let flat = f1 == f0;
            if flat {
                return Err(Error::EqualValues {
                    x0,
                    x1,
                    value: f1,
                });
            }

            let x2 = x1 - (f1 * (x1 - x0)) / (f1 - f0);
            let f2 = f.eval(x2)?;
            f.record(x2);

            let (prev, curr, next) = (iteration - 1, iteration, iteration + 1);
            f.step(format!("Iteration {iteration}:"));
            f.step(format!(
                "  x{prev} = {}, f(x{prev}) = {} = {}",
                f.num(x0),
                f.plug(x0),
                f.num(f0)
            ));
            f.step(format!(
                "  x{curr} = {}, f(x{curr}) = {} = {}",
                f.num(x1),
                f.plug(x1),
                f.num(f1)
            ));
            f.step(format!(
                "  x{next} = {} - ({} * ({} - {})) / ({} - {}) = {}",
                f.num(x1),
                f.num(f1),
                f.num(x1),
                f.num(x0),
                f.num(f1),
                f.num(f0),
                f.num(x2)
            ));
            f.step(format!(
                "  New approximation: x{next} = {}, f(x{next}) = {} = {}",
                f.num(x2),
                f.plug(x2),
                f.num(f2)
            ));
            f.blank();
            debug!(iteration, x0, x1, x2, f2, "secant step");

            if (x2 - x1).abs() < tolerance {
                return Ok(f.converged(x2));
            }

            (x0, f0) = (x1, f1);
            (x1, f1) = (x2, f2);
        }

        Ok(f.cap_reached(x1))
    }
}

root_finder_accessors!(Secant);
