//! The Gauss-Seidel method.

use numtrace_core::Outcome;

use super::{
    Config, Output,
    iterative::{self, Sweep},
    linear_solver_accessors,
};

/// Solves `A x = b` iteratively, letting each component use the values
/// already updated earlier in the same pass.
///
/// Before iterating, the rows are reordered into a strictly diagonally
/// dominant arrangement when one exists. If none does, a warning is written
/// and the iteration runs anyway. Stops when no component moves by more than
/// the tolerance, or after [`MAX_ITERATIONS`](super::MAX_ITERATIONS) passes.
///
/// # Examples
/// ```
/// use numtrace_solvers::linear::GaussSeidel;
///
/// let mut solver = GaussSeidel::default();
/// assert!(solver.solve(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]).is_converged());
/// assert!((solver.solution()[1] - 0.6).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct GaussSeidel {
    output: Output<f64>,
    iterations: Vec<Vec<f64>>,
}

impl GaussSeidel {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            output: Output::new("Gauss-Seidel method", config),
            iterations: Vec::new(),
        }
    }

    /// Solves `a x = b`.
    pub fn solve<R: AsRef<[f64]>>(&mut self, a: &[R], b: &[f64]) -> Outcome {
        self.run(a, b, None)
    }

    /// Like [`solve`](Self::solve), but first replaces the tolerance.
    pub fn solve_with_tolerance<R: AsRef<[f64]>>(
        &mut self,
        a: &[R],
        b: &[f64],
        tolerance: f64,
    ) -> Outcome {
        self.run(a, b, Some(tolerance))
    }

    /// Returns the vector produced by each pass of the last solve.
    #[must_use]
    pub fn iterations(&self) -> &[Vec<f64>] {
        &self.iterations
    }

    fn run<R: AsRef<[f64]>>(&mut self, a: &[R], b: &[f64], tolerance: Option<f64>) -> Outcome {
        self.iterations.clear();
        let result = self.output.begin(tolerance).and_then(|()| {
            iterative::solve(
                Sweep::GaussSeidel,
                &mut self.output,
                &mut self.iterations,
                a,
                b,
            )
        });
        self.output.finish(result)
    }
}

linear_solver_accessors!(GaussSeidel, f64);

#[cfg(test)]
mod tests;
