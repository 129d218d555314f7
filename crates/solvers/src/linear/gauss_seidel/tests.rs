use approx::assert_relative_eq;
use numtrace_core::{Outcome, Traced};

use super::{Config, GaussSeidel};
use crate::linear::{Error, MAX_ITERATIONS};

fn residuals<const N: usize>(a: &[[f64; N]; N], b: &[f64; N], x: &[f64]) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(row, rhs)| row.iter().zip(x).map(|(a, x)| a * x).sum::<f64>() - rhs)
        .collect()
}

#[test]
fn converges_on_dominant_system() {
    let a = [[10.0, -1.0, 2.0], [-1.0, 11.0, -1.0], [2.0, -1.0, 10.0]];
    let mut solver = GaussSeidel::default();

    assert_eq!(solver.solve(&a, &[6.0, 25.0, -11.0]), Outcome::Converged);
    assert_eq!(solver.iterations().len(), 5);
    assert!(solver.steps().contains(&"System is already diagonally dominant".to_owned()));

    let x = solver.solution();
    assert_relative_eq!(x[0], 217.0 / 208.0, epsilon = 1e-4);
    assert_relative_eq!(x[1], 59.0 / 26.0, epsilon = 1e-4);
    assert_relative_eq!(x[2], -225.0 / 208.0, epsilon = 1e-4);
}

#[test]
fn uses_values_from_the_current_pass() {
    let mut solver = GaussSeidel::default();
    solver.solve(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]);

    assert_eq!(
        &solver.steps()[6..13],
        [
            "Starting Gauss-Seidel Iteration:",
            "Using tolerance: 0.0001",
            "",
            "Iteration 1:",
            "x1 = (1.0000 - (1.0000*x2 [0.0000])) / 4.0000 = 0.2500",
            "x2 = (2.0000 - (2.0000*x1 [0.2500])) / 3.0000 = 0.5000",
            "Iteration  1: [0.2500, 0.5000]",
        ]
    );
    assert_eq!(solver.iterations()[0], [0.25, 0.5]);
    assert_eq!(solver.iterations().len(), 6);
}

#[test]
fn answers_with_iteration_count_and_values() {
    let mut solver = GaussSeidel::default();
    solver.solve(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]);

    assert_eq!(
        solver.answers(),
        [
            "Solution converged after 6 iterations",
            "Final tolerance: 0.0001",
            "",
            "Final Solution:",
            "x1 = 0.1000",
            "x2 = 0.6000",
        ]
    );
}

#[test]
fn reorders_rows_for_dominance() {
    let a = [[1.0, 11.0, -1.0], [10.0, -1.0, 2.0], [2.0, -1.0, 10.0]];
    let b = [25.0, 6.0, -11.0];
    let mut solver = GaussSeidel::default();

    assert_eq!(solver.solve(&a, &b), Outcome::Converged);
    assert_eq!(
        &solver.steps()[..10],
        [
            "Linear System:",
            "1.000 x1 + 11.000 x2 - 1.000 x3 = 25.000",
            "10.000 x1 - 1.000 x2 + 2.000 x3 = 6.000",
            "2.000 x1 - 1.000 x2 + 10.000 x3 = -11.000",
            "",
            "System was rearranged to be diagonally dominant",
            "10.000 x1 - 1.000 x2 + 2.000 x3 = 6.000",
            "1.000 x1 + 11.000 x2 - 1.000 x3 = 25.000",
            "2.000 x1 - 1.000 x2 + 10.000 x3 = -11.000",
            "",
        ]
    );

    for r in residuals(&a, &b, solver.solution()) {
        assert!(r.abs() < 1e-3, "residual {r} too large");
    }
}

#[test]
fn warns_and_terminates_without_dominance() {
    let mut solver = GaussSeidel::default();
    let outcome = solver.solve(&[[1.0, 2.0], [3.0, 4.0]], &[5.0, 6.0]);

    assert_eq!(outcome, Outcome::MaxIterationsReached);
    assert!(outcome.is_success());
    assert_eq!(
        solver.steps()[4],
        "Warning: System is not diagonally dominant - convergence not guaranteed"
    );
    assert_eq!(solver.iterations().len(), MAX_ITERATIONS);
    assert_eq!(
        solver.answers()[0],
        "Warning: Maximum iterations (1000) reached without convergence"
    );
    assert_eq!(solver.solution().len(), 2);
}

#[test]
fn does_not_mutate_inputs() {
    let a = vec![vec![1.0, 11.0], vec![10.0, 1.0]];
    let b = vec![12.0, 11.0];
    let mut solver = GaussSeidel::default();
    solver.solve(&a, &b);

    assert_eq!(a, [[1.0, 11.0], [10.0, 1.0]]);
    assert_eq!(b, [12.0, 11.0]);
    assert_relative_eq!(solver.solution()[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(solver.solution()[1], 1.0, epsilon = 1e-4);
}

#[test]
fn validates_shape() {
    let mut solver = GaussSeidel::default();

    assert_eq!(solver.solve(&[[1.0, 2.0]], &[1.0]), Outcome::Failed);
    assert!(matches!(solver.error(), Some(Error::NotSquare { .. })));

    assert_eq!(solver.solve(&[[2.0]], &[1.0, 1.0]), Outcome::Failed);
    assert!(matches!(solver.error(), Some(Error::ConstantsLength { .. })));
    assert!(solver.iterations().is_empty());
}

#[test]
fn tolerance_controls_precision() {
    let config = Config::new(0.01).unwrap();
    let mut solver = GaussSeidel::new(config);
    solver.solve(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]);

    assert_eq!(solver.steps()[7], "Using tolerance: 0.01");
    assert_eq!(solver.answers()[4], "x1 = 0.10");

    solver.solve_with_tolerance(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0], 1e-6);
    assert_relative_eq!(solver.tolerance(), 1e-6);
    assert_eq!(solver.answers()[4], "x1 = 0.100000");
}

#[test]
fn repeated_solves_are_identical() {
    let a = [[4.0, 1.0], [2.0, 3.0]];
    let b = [1.0, 2.0];
    let mut solver = GaussSeidel::default();

    solver.solve(&a, &b);
    let first = solver.trace().clone();
    solver.solve(&a, &b);

    assert_eq!(solver.trace(), &first);
}
