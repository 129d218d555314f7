//! The Jacobi method.

use numtrace_core::Outcome;

use super::{
    Config, Output,
    iterative::{self, Sweep},
    linear_solver_accessors,
};

/// Solves `A x = b` iteratively, computing every component of a pass from the
/// previous pass's full vector.
///
/// Shares its setup with [`GaussSeidel`](super::GaussSeidel): the input
/// system is listed, rows are reordered for diagonal dominance when possible,
/// and iteration starts from the zero vector. Stops when no component moves
/// by more than the tolerance, or after [`MAX_ITERATIONS`](super::MAX_ITERATIONS)
/// passes.
#[derive(Debug, Clone)]
pub struct Jacobi {
    output: Output<f64>,
    iterations: Vec<Vec<f64>>,
}

impl Jacobi {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            output: Output::new("Jacobi method", config),
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
            iterative::solve(Sweep::Jacobi, &mut self.output, &mut self.iterations, a, b)
        });
        self.output.finish(result)
    }
}

linear_solver_accessors!(Jacobi, f64);
