//! Gaussian elimination with partial pivoting.

use numtrace_core::{Fraction, Outcome};
use tracing::debug;

use super::{Config, Error, Output, linear_solver_accessors, system};

/// Solves `A x = b` by reducing the augmented matrix `[A | b]` to upper
/// triangular form and back-substituting, all in exact fractions.
///
/// Before eliminating below column `k`, the row at or below `k` with the
/// largest `|a[r][k]|` is swapped into the pivot position. A zero pivot after
/// the swap means the system has no unique solution. Every swap and row
/// update is written to the trace as a full matrix snapshot.
///
/// # Examples
/// ```
/// use numtrace_solvers::linear::GaussianElimination;
///
/// let mut solver = GaussianElimination::default();
/// solver.solve(&[[1.0, 1.0], [1.0, -1.0]], &[3.0, 1.0]);
/// assert_eq!(solver.solution()[0].to_string(), "2");
/// ```
#[derive(Debug, Clone)]
pub struct GaussianElimination {
    output: Output<Fraction>,
}

impl GaussianElimination {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            output: Output::new("Gaussian Elimination", config),
        }
    }

    /// Solves `a x = b`.
    pub fn solve<R: AsRef<[f64]>>(&mut self, a: &[R], b: &[f64]) -> Outcome {
        let result = self.output.begin(None).and_then(|()| self.run(a, b));
        self.output.finish(result)
    }

    /// Like [`solve`](Self::solve), but first replaces the tolerance.
    pub fn solve_with_tolerance<R: AsRef<[f64]>>(
        &mut self,
        a: &[R],
        b: &[f64],
        tolerance: f64,
    ) -> Outcome {
        let result = self
            .output
            .begin(Some(tolerance))
            .and_then(|()| self.run(a, b));
        self.output.finish(result)
    }

    fn run<R: AsRef<[f64]>>(
        &mut self,
        a: &[R],
        b: &[f64],
    ) -> Result<(Vec<Fraction>, Outcome), Error> {
        let n = system::square(a)?;
        system::constants(b, n)?;

        let mut matrix = system::to_fractions(a)?;
        for (row, &rhs) in matrix.iter_mut().zip(b) {
            row.push(Fraction::from_f64(rhs)?);
        }

        let out = &mut self.output;
        out.step("Augmented Matrix (Initial):");
        out.steps(system::matrix_lines(&matrix));
        out.blank();

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&r, &s| matrix[r][col].abs().cmp(&matrix[s][col].abs()).then(s.cmp(&r)))
                .unwrap_or(col);

            if pivot != col {
                matrix.swap(col, pivot);
                out.step(format!("Swapped rows {} and {}:", col + 1, pivot + 1));
                out.steps(system::matrix_lines(&matrix));
                out.blank();
                debug!(column = col + 1, pivot_row = pivot + 1, "row swap");
            }

            if matrix[col][col].is_zero() {
                return Err(Error::ZeroPivot { column: col + 1 });
            }

            for row in col + 1..n {
                let factor = matrix[row][col].divide(&matrix[col][col])?;

                let (upper, lower) = matrix.split_at_mut(row);
                let pivot_row = &upper[col];
                for (target, source) in lower[0].iter_mut().zip(pivot_row) {
                    *target = &*target - &(&factor * source);
                }

                out.step(format!(
                    "Row {} updated by subtracting {factor} * Row {}:",
                    row + 1,
                    col + 1
                ));
                out.steps(system::matrix_lines(&matrix));
                out.blank();
                debug!(row = row + 1, pivot_row = col + 1, factor = %factor, "row elimination");
            }
        }

        out.step("Back Substitution:");
        let mut solution = vec![Fraction::zero(); n];
        for i in (0..n).rev() {
            let mut sum = matrix[i][n].clone();
            for j in i + 1..n {
                sum = sum - &matrix[i][j] * &solution[j];
            }
            let x = sum.divide(&matrix[i][i])?;
            out.step(format!("x{} = {x} ≈ {}", i + 1, out.num(x.to_f64())));
            solution[i] = x;
        }

        out.answer("Decimal Form:");
        for (i, x) in solution.iter().enumerate() {
            let line = format!("x{} = {}", i + 1, out.num(x.to_f64()));
            out.answer(line);
        }
        out.answer("");
        out.answer("Fraction Form:");
        for (i, x) in solution.iter().enumerate() {
            out.answer(format!("x{} = {x}", i + 1));
        }

        Ok((solution, Outcome::Converged))
    }
}

linear_solver_accessors!(GaussianElimination, Fraction);
