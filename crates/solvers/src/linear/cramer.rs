//! Cramer's Rule.

use numtrace_core::{Fraction, Outcome};
use tracing::debug;

use super::{Config, Error, Output, linear_solver_accessors, system};

/// Solves `A x = b` as `x_i = det(A_i) / det(A)`, where `A_i` is `A` with
/// column `i` replaced by `b`.
///
/// Determinants come from cofactor expansion along the first row in exact
/// fractions, so the cost grows as `n!` and the method suits small systems
/// only. Inputs pass through [`Fraction::from_f64`] and keep five decimal
/// digits. The system is treated as singular when `|det(A)|` is below the
/// tolerance.
///
/// # Examples
/// ```
/// use numtrace_solvers::linear::CramersRule;
///
/// let mut solver = CramersRule::default();
/// solver.solve(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0]);
/// assert_eq!(solver.solution()[1].to_string(), "7/5");
/// ```
#[derive(Debug, Clone)]
pub struct CramersRule {
    output: Output<Fraction>,
}

impl CramersRule {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            output: Output::new("Cramer's Rule", config),
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
        if n < 2 {
            return Err(Error::TooFewEquations {
                required: 2,
                actual: n,
            });
        }
        system::constants(b, n)?;

        let matrix = system::to_fractions(a)?;
        let constants = b
            .iter()
            .map(|&v| Fraction::from_f64(v))
            .collect::<Result<Vec<_>, _>>()?;

        let out = &mut self.output;
        out.step("Original Coefficient Matrix:");
        out.steps(system::matrix_lines(&matrix));
        out.blank();
        out.step("Constant Terms Vector:");
        for (i, value) in constants.iter().enumerate() {
            out.step(format!("b[{}] = {value}", i + 1));
        }
        out.blank();

        out.step("Step 1: Calculate determinant of A");
        let det = determinant(&matrix);
        out.step(format!("det(A) = {det} ≈ {}", out.num(det.to_f64())));
        out.blank();
        debug!(determinant = %det, "cramer determinant");

        if det.abs().to_f64() < out.tolerance() {
            return Err(Error::Singular {
                determinant: det.to_string(),
            });
        }

        let mut solution = Vec::with_capacity(n);
        for i in 0..n {
            let replaced = replace_column(&matrix, i, &constants);
            let det_i = determinant(&replaced);
            let x = det_i.divide(&det)?;

            out.step(format!(
                "Step {}: Matrix A{} (replace column {} with constants)",
                i + 2,
                i + 1,
                i + 1
            ));
            out.steps(system::matrix_lines(&replaced));
            out.step(format!(
                "det(A{}) = {det_i} ≈ {}",
                i + 1,
                out.num(det_i.to_f64())
            ));
            out.step(format!(
                "x{} = det(A{})/det(A) = {x} ≈ {}",
                i + 1,
                i + 1,
                out.num(x.to_f64())
            ));
            out.blank();
            debug!(unknown = i + 1, determinant = %det_i, value = %x, "cramer unknown");

            solution.push(x);
        }

        for (i, x) in solution.iter().enumerate() {
            let line = format!("x{} = {x} ≈ {}", i + 1, out.num(x.to_f64()));
            out.answer(line);
        }

        Ok((solution, Outcome::Converged))
    }
}

linear_solver_accessors!(CramersRule, Fraction);

/// Computes a determinant by cofactor expansion along the first row.
fn determinant(m: &[Vec<Fraction>]) -> Fraction {
    match m.len() {
        0 => Fraction::from_integer(1),
        1 => m[0][0].clone(),
        2 => &m[0][0] * &m[1][1] - &m[0][1] * &m[1][0],
        _ => {
            let mut det = Fraction::zero();
            for (col, entry) in m[0].iter().enumerate() {
                if entry.is_zero() {
                    continue;
                }
                let term = entry * &determinant(&minor(m, col));
                det = if col % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    }
}

/// Drops the first row and column `col`.
fn minor(m: &[Vec<Fraction>], col: usize) -> Vec<Vec<Fraction>> {
    m[1..]
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(j, _)| j != col)
                .map(|(_, v)| v.clone())
                .collect()
        })
        .collect()
}

fn replace_column(m: &[Vec<Fraction>], col: usize, values: &[Fraction]) -> Vec<Vec<Fraction>> {
    m.iter()
        .zip(values)
        .map(|(row, value)| {
            let mut row = row.clone();
            row[col] = value.clone();
            row
        })
        .collect()
}
