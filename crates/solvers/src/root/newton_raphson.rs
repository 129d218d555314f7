//! The Newton-Raphson method.

use numtrace_core::{Evaluator, Outcome, StandardEvaluator};
use tracing::debug;

use super::{
    Config, ConfigError, DEFAULT_DERIVATIVE_STEP, Error, Finder, root_finder_accessors,
    validate_positive,
};

/// Derivatives smaller than this in magnitude stop the solve.
pub const MIN_DERIVATIVE: f64 = 1e-10;

/// Finds a root by following tangent lines from an initial guess.
///
/// The derivative is approximated with the centered difference
/// `f'(x) = (f(x + h) - f(x - h)) / (2h)`. Converges when successive
/// estimates differ by less than `tol`, and fails when `|f'(x)|` drops below
/// [`MIN_DERIVATIVE`]. On reaching the iteration cap the latest estimate is
/// reported.
///
/// # Examples
/// ```
/// use numtrace_solvers::root::NewtonRaphson;
///
/// let mut solver = NewtonRaphson::default();
/// assert!(solver.solve("x^3 - x - 1", 1.5).is_converged());
/// assert!((solver.root().unwrap() - 1.3247).abs() < 1e-4);
/// ```
#[derive(Debug)]
pub struct NewtonRaphson<E = StandardEvaluator> {
    finder: Finder<E>,
    derivative_step: f64,
}

impl NewtonRaphson {
    /// Creates a solver with the built-in evaluator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, StandardEvaluator)
    }
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: Evaluator> NewtonRaphson<E> {
    /// Creates a solver that evaluates formulas with `evaluator`.
    pub fn with_evaluator(config: Config, evaluator: E) -> Self {
        Self {
            finder: Finder::new("Newton-Raphson method", config, evaluator),
            derivative_step: DEFAULT_DERIVATIVE_STEP,
        }
    }

    /// Returns the solver with a different finite-difference step.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and positive.
    pub fn with_derivative_step(mut self, step: f64) -> Result<Self, ConfigError> {
        self.derivative_step = validate_positive(step).map_err(ConfigError::DerivativeStep)?;
        Ok(self)
    }

    /// Returns the finite-difference step.
    #[must_use]
    pub fn derivative_step(&self) -> f64 {
        self.derivative_step
    }

    /// Searches for a root of `expression` starting from `x0`.
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
        let h = self.derivative_step;
        let f = &mut self.finder;

        f.step(format!("Derivative step size: {h:e}"));
        f.step(format!(
            "Starting Newton-Raphson method with initial guess: {}",
            f.num(x0)
        ));
        f.blank();

        let tolerance = f.tolerance();
        let mut x = x0;

        for iteration in 1..=f.max_iters() {
            let fx = f.eval(x)?;
            let derivative = (f.eval(x + h)? - f.eval(x - h)?) / (2.0 * h);

            f.step(format!("Iteration {iteration}:"));
            f.step(format!("  x{} = {}", iteration - 1, f.num(x)));
            f.step(format!("  f(x) = {} = {}", f.plug(x), f.num(fx)));
            f.step(format!(
                "  f'(x{}) = [f(x+h)-f(x-h)]/(2h) = {}",
                iteration - 1,
                f.num(derivative)
            ));

            if derivative.abs() < MIN_DERIVATIVE {
                return Err(Error::ZeroDerivative { x, derivative });
            }

            let next = x - fx / derivative;
            f.record(next);
            f.step(format!(
                "  x{iteration} = x - f(x)/f'(x) = {} - {}/{} = {}",
                f.num(x),
                f.num(fx),
                f.num(derivative),
                f.num(next)
            ));
            f.blank();
            debug!(iteration, x, fx, derivative, next, "newton-raphson step");

            if (next - x).abs() < tolerance {
                return Ok(f.converged(next));
            }

            x = next;
        }

        Ok(f.cap_reached(x))
    }
}

root_finder_accessors!(NewtonRaphson);
