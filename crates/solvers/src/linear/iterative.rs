use numtrace_core::{DecimalFormat, Outcome};
use tracing::{debug, warn};

use super::{Error, MAX_ITERATIONS, Output, dominance, system};

/// How a pass reads the components it has not yet updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sweep {
    /// Every component reads the previous pass's vector.
    Jacobi,
    /// Components read values already updated earlier in the same pass.
    GaussSeidel,
}

impl Sweep {
    fn name(self) -> &'static str {
        match self {
            Sweep::Jacobi => "Jacobi",
            Sweep::GaussSeidel => "Gauss-Seidel",
        }
    }
}

/// Runs the iteration from the zero vector, appending each pass's vector to
/// `iterations`.
///
/// Converges when no component moves by more than the tolerance between
/// passes. After [`MAX_ITERATIONS`] passes the latest vector is reported as a
/// best effort.
pub(super) fn solve<R: AsRef<[f64]>>(
    sweep: Sweep,
    out: &mut Output<f64>,
    iterations: &mut Vec<Vec<f64>>,
    a: &[R],
    b: &[f64],
) -> Result<(Vec<f64>, Outcome), Error> {
    let n = system::square(a)?;
    system::constants(b, n)?;

    let mut a: Vec<Vec<f64>> = a.iter().map(|row| row.as_ref().to_vec()).collect();
    let mut b = b.to_vec();

    out.step("Linear System:");
    out.steps(system::equation_lines(&a, &b, DecimalFormat::PLUG_IN));
    out.blank();

    match dominance::reorder(&a) {
        Some(order) if dominance::is_identity(&order) => {
            out.step("System is already diagonally dominant");
        }
        Some(order) => {
            a = order.iter().map(|&r| a[r].clone()).collect();
            b = order.iter().map(|&r| b[r]).collect();
            debug!(?order, "rows reordered for diagonal dominance");
            out.step("System was rearranged to be diagonally dominant");
            out.steps(system::equation_lines(&a, &b, DecimalFormat::PLUG_IN));
        }
        None => {
            warn!(method = sweep.name(), "system is not diagonally dominant");
            out.step("Warning: System is not diagonally dominant - convergence not guaranteed");
        }
    }
    out.blank();

    #[allow(clippy::float_cmp)]
    let zero_diagonal = (0..n).find(|&i| a[i][i] == 0.0);
    if let Some(row) = zero_diagonal {
        return Err(Error::ZeroDiagonal { row: row + 1 });
    }

    let tolerance = out.tolerance();
    let format = out.formats().decimal();
    out.step(format!("Starting {} Iteration:", sweep.name()));
    out.step(format!("Using tolerance: {}", out.num(tolerance)));

    let mut x = vec![0.0; n];
    for iteration in 1..=MAX_ITERATIONS {
        let previous = x.clone();
        out.blank();
        out.step(format!("Iteration {iteration}:"));

        for i in 0..n {
            let source = match sweep {
                Sweep::Jacobi => &previous,
                Sweep::GaussSeidel => &x,
            };

            let mut sum = 0.0;
            let mut terms = Vec::with_capacity(n - 1);
            for j in (0..n).filter(|&j| j != i) {
                sum += a[i][j] * source[j];
                terms.push(format!(
                    "{}*x{} [{}]",
                    format.format(a[i][j]),
                    j + 1,
                    format.format(source[j])
                ));
            }
            let value = (b[i] - sum) / a[i][i];

            out.step(format!(
                "x{} = ({} - ({})) / {} = {}",
                i + 1,
                format.format(b[i]),
                terms.join(" + "),
                format.format(a[i][i]),
                format.format(value)
            ));
            x[i] = value;
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::Diverged { iteration });
        }

        out.step(format!(
            "Iteration {iteration:2}: {}",
            system::vector(&x, format)
        ));
        iterations.push(x.clone());
        debug!(iteration, values = ?x, method = sweep.name(), "iteration pass");

        let converged = x
            .iter()
            .zip(&previous)
            .all(|(current, prev)| (current - prev).abs() <= tolerance);

        if converged {
            out.answer(format!("Solution converged after {iteration} iterations"));
            out.answer(format!("Final tolerance: {}", out.num(tolerance)));
            out.answer("");
            out.answer("Final Solution:");
            answer_values(out, &x, format);
            return Ok((x, Outcome::Converged));
        }
    }

    warn!(
        method = sweep.name(),
        max_iterations = MAX_ITERATIONS,
        "maximum iterations reached without convergence"
    );
    out.answer(format!(
        "Warning: Maximum iterations ({MAX_ITERATIONS}) reached without convergence"
    ));
    out.answer("");
    out.answer("Best Estimate:");
    answer_values(out, &x, format);
    Ok((x, Outcome::MaxIterationsReached))
}

fn answer_values(out: &mut Output<f64>, x: &[f64], format: DecimalFormat) {
    for (i, value) in x.iter().enumerate() {
        out.answer(format!("x{} = {}", i + 1, format.format(*value)));
    }
}
