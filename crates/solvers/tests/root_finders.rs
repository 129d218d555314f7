use std::convert::Infallible;

use approx::assert_relative_eq;
use numtrace_core::{Evaluator, Outcome, Traced};
use numtrace_solvers::root::{
    Bisection, Config, Error, FalsePosition, FixedPoint, NewtonRaphson, Secant,
};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Evaluates `x^3 - x - 1` without parsing, ignoring the expression text.
struct Cubic;

impl Evaluator for Cubic {
    type Error = Infallible;

    fn evaluate(&self, _expression: &str, _variable: &str, x: f64) -> Result<f64, Self::Error> {
        Ok(x.powi(3) - x - 1.0)
    }
}

#[test]
fn bracketing_methods_need_a_sign_change() {
    init_tracing();

    let cases = [("x^2 - 4", 3.0, 5.0), ("x^2 + 1", -2.0, 2.0), ("x - 1", 1.0, 2.0)];
    for (expression, a, b) in cases {
        let mut bisection = Bisection::default();
        assert_eq!(bisection.solve(expression, a, b), Outcome::Failed);
        assert!(bisection.iterations().is_empty());
        assert!(matches!(bisection.error(), Some(Error::NoSignChange { .. })));

        let mut false_position = FalsePosition::default();
        assert_eq!(false_position.solve(expression, a, b), Outcome::Failed);
        assert!(false_position.iterations().is_empty());
    }
}

#[test]
fn bisection_meets_iteration_bound() {
    init_tracing();

    let mut solver = Bisection::default();
    assert_eq!(solver.solve("x^2 - 4", 1.0, 3.0), Outcome::Converged);
    assert_relative_eq!(solver.root().unwrap(), 2.0, epsilon = 1e-4);

    // log2((3 - 1) / 1e-4) is about 14.3.
    assert!(solver.iterations().len() <= 15);
}

#[test]
fn open_methods_agree_on_cubic_root() {
    init_tracing();

    let mut newton = NewtonRaphson::default();
    assert_eq!(newton.solve("x^3 - x - 1", 1.5), Outcome::Converged);
    let newton_iterations = newton.iterations().len();
    assert!(newton_iterations < 10);

    let mut secant = Secant::default();
    assert_eq!(secant.solve("x^3 - x - 1", 1.0, 2.0), Outcome::Converged);
    assert!(secant.iterations().len() <= 2 * newton_iterations);

    assert_relative_eq!(newton.root().unwrap(), 1.3247, epsilon = 1e-4);
    assert_relative_eq!(secant.root().unwrap(), newton.root().unwrap(), epsilon = 1e-4);
}

#[test]
fn all_finders_report_the_same_answer_layout() {
    let mut bisection = Bisection::default();
    let mut false_position = FalsePosition::default();
    let mut secant = Secant::default();
    let mut newton = NewtonRaphson::default();
    let mut fixed_point = FixedPoint::default();

    bisection.solve("x^3 - x - 1", 1.0, 2.0);
    false_position.solve("x^3 - x - 1", 1.0, 2.0);
    secant.solve("x^3 - x - 1", 1.0, 2.0);
    newton.solve("x^3 - x - 1", 1.5);
    fixed_point.solve("cbrt(x + 1)", 1.5);

    let answers = [
        bisection.answers(),
        false_position.answers(),
        secant.answers(),
        newton.answers(),
        fixed_point.answers(),
    ];
    for answers in answers {
        assert_eq!(answers.len(), 3);
        assert!(answers[0].starts_with("Root found: 1.324"));
        assert!(answers[1].starts_with("Number of iterations: "));
        assert_eq!(answers[2], "Final tolerance: 0.0001");
    }
}

#[test]
fn repeated_solves_are_identical() {
    let mut solver = Secant::default();
    solver.solve("x^3 - x - 1", 1.0, 2.0);
    let first = solver.trace().clone();
    let first_iterations = solver.iterations().to_vec();

    solver.solve("x^3 - x - 1", 1.0, 2.0);
    assert_eq!(solver.trace(), &first);
    assert_eq!(solver.iterations(), first_iterations);

    let mut fresh = Secant::default();
    fresh.solve("x^3 - x - 1", 1.0, 2.0);
    assert_eq!(fresh.trace(), &first);
}

#[test]
fn failed_solve_clears_previous_output() {
    let mut solver = NewtonRaphson::default();
    solver.solve("x^3 - x - 1", 1.5);
    assert!(solver.root().is_some());

    assert_eq!(solver.solve("x^2 + 1", 0.0), Outcome::Failed);
    assert!(solver.root().is_none());
    assert!(solver.answers().is_empty());
    assert!(solver.trace().to_string().starts_with("Solution failed:\n"));
}

#[test]
fn custom_evaluator_plugs_in() {
    let mut solver = NewtonRaphson::with_evaluator(Config::default(), Cubic);
    assert_eq!(solver.solve("cubic", 1.5), Outcome::Converged);
    assert_relative_eq!(solver.root().unwrap(), 1.324_717_957, epsilon = 1e-6);
}

#[test]
fn trace_display_lists_steps_then_answers() {
    let mut solver = Bisection::default();
    solver.solve("x^2 - 4", 1.0, 3.0);

    let text = solver.trace().to_string();
    assert!(text.starts_with("Solution Steps:\nUsing tolerance: 0.0001\n"));
    assert!(text.ends_with(
        "\nFinal Answers:\nRoot found: 2.0000\nNumber of iterations: 1\nFinal tolerance: 0.0001\n"
    ));
}
