use approx::assert_relative_eq;
use numtrace_core::{Fraction, Outcome, Traced};
use numtrace_solvers::linear::{Config, CramersRule, GaussSeidel, GaussianElimination, Jacobi};
use tracing::Level;

const A: [[f64; 3]; 3] = [[2.0, -1.0, -3.0], [1.0, 4.0, -2.0], [3.0, 1.0, 5.0]];
const B: [f64; 3] = [5.0, 1.0, 2.0];

const DOMINANT: [[f64; 3]; 3] = [[10.0, -1.0, 2.0], [-1.0, 11.0, -1.0], [2.0, -1.0, 10.0]];
const DOMINANT_B: [f64; 3] = [6.0, 25.0, -11.0];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn decimals(solution: &[Fraction]) -> Vec<f64> {
    solution.iter().map(Fraction::to_f64).collect()
}

fn assert_satisfies(a: &[[f64; 3]; 3], b: &[f64; 3], x: &[f64], epsilon: f64) {
    for (row, rhs) in a.iter().zip(b) {
        let lhs: f64 = row.iter().zip(x).map(|(a, x)| a * x).sum();
        assert!((lhs - rhs).abs() < epsilon, "{lhs} != {rhs}");
    }
}

#[test]
fn gaussian_solution_satisfies_system() {
    init_tracing();

    let mut solver = GaussianElimination::default();
    assert_eq!(solver.solve(&A, &B), Outcome::Converged);
    assert_satisfies(&A, &B, &decimals(solver.solution()), 1e-3);
}

#[test]
fn direct_methods_agree_exactly() {
    let mut gaussian = GaussianElimination::default();
    let mut cramer = CramersRule::default();
    gaussian.solve(&A, &B);
    cramer.solve(&A, &B);

    assert_eq!(gaussian.solution(), cramer.solution());
}

#[test]
fn singular_systems_fail_without_solution() {
    let singular = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]];
    let b = [1.0, 2.0, 3.0];

    let mut gaussian = GaussianElimination::default();
    assert_eq!(gaussian.solve(&singular, &b), Outcome::Failed);
    assert!(gaussian.solution().is_empty());
    assert!(gaussian.answers().is_empty());

    let mut cramer = CramersRule::default();
    assert_eq!(cramer.solve(&singular, &b), Outcome::Failed);
    assert!(cramer.solution().is_empty());
}

#[test]
fn iterative_methods_match_direct_solution() {
    init_tracing();

    let mut gaussian = GaussianElimination::default();
    gaussian.solve(&DOMINANT, &DOMINANT_B);
    let exact = decimals(gaussian.solution());

    let mut jacobi = Jacobi::default();
    assert_eq!(jacobi.solve(&DOMINANT, &DOMINANT_B), Outcome::Converged);
    assert!(jacobi.iterations().len() <= 1000);

    let mut seidel = GaussSeidel::default();
    assert_eq!(seidel.solve(&DOMINANT, &DOMINANT_B), Outcome::Converged);
    assert!(seidel.iterations().len() <= jacobi.iterations().len());

    for i in 0..3 {
        assert_relative_eq!(jacobi.solution()[i], exact[i], epsilon = 1e-3);
        assert_relative_eq!(seidel.solution()[i], exact[i], epsilon = 1e-3);
    }
}

#[test]
fn iterative_methods_terminate_without_dominance() {
    let a = [[1.0, 2.0], [3.0, 4.0]];
    let b = [5.0, 6.0];

    let mut jacobi = Jacobi::default();
    let outcome = jacobi.solve(&a, &b);
    assert_ne!(outcome, Outcome::Converged);
    assert!(
        jacobi
            .steps()
            .iter()
            .any(|line| line.starts_with("Warning: System is not diagonally dominant"))
    );

    let mut seidel = GaussSeidel::default();
    let outcome = seidel.solve(&a, &b);
    assert_ne!(outcome, Outcome::Converged);
    assert!(
        seidel
            .answers()
            .iter()
            .any(|line| line.contains("reached without convergence"))
    );
}

#[test]
fn repeated_solves_are_identical() {
    let mut gaussian = GaussianElimination::default();
    gaussian.solve(&A, &B);
    let first = gaussian.trace().clone();
    gaussian.solve(&A, &B);
    assert_eq!(gaussian.trace(), &first);

    let mut jacobi = Jacobi::default();
    jacobi.solve(&DOMINANT, &DOMINANT_B);
    let first = jacobi.trace().clone();
    jacobi.solve(&DOMINANT, &DOMINANT_B);
    assert_eq!(jacobi.trace(), &first);
}

#[test]
fn tolerance_drives_decimal_places() {
    let mut solver = CramersRule::new(Config::new(0.001).unwrap());
    solver.solve(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0]);
    assert_eq!(solver.answers(), ["x1 = 4/5 ≈ 0.800", "x2 = 7/5 ≈ 1.400"]);

    solver.solve_with_tolerance(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0], 0.1);
    assert_eq!(solver.answers(), ["x1 = 4/5 ≈ 0.8", "x2 = 7/5 ≈ 1.4"]);
}

#[test]
fn failure_is_reported_in_trace() {
    let mut solver = GaussianElimination::default();
    solver.solve(&[[1.0, 2.0], [3.0, 4.0]], &[1.0]);

    assert_eq!(
        solver.trace().to_string(),
        "Solution failed:\nGaussian Elimination cannot continue: constant vector has 1 entries, expected 2\n"
    );
}
