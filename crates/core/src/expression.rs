//! Evaluation of formulas in one free variable.
//!
//! Solvers depend only on the [`Evaluator`] trait, so any formula engine can
//! be plugged in. [`StandardEvaluator`] is the built-in engine. It accepts
//! `+ - * / ^`, parentheses, unary signs, implicit multiplication (`2x`,
//! `4cos(x)`), the constants `pi` and `e`, and the usual elementary functions
//! (`sin`, `cos`, `tan`, `exp`, `log`/`ln`, `sqrt`, `abs`, ...).

mod node;
mod parse;

use thiserror::Error;

use node::Node;

/// Evaluates a formula at a given value of its free variable.
pub trait Evaluator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates `expression` with `variable` bound to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is malformed or cannot be evaluated.
    fn evaluate(&self, expression: &str, variable: &str, value: f64) -> Result<f64, Self::Error>;
}

/// The built-in evaluator backed by [`Expression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardEvaluator;

impl Evaluator for StandardEvaluator {
    type Error = ExpressionError;

    fn evaluate(&self, expression: &str, variable: &str, value: f64) -> Result<f64, Self::Error> {
        Expression::parse(expression, variable)?.eval(value)
    }
}

/// A parsed formula bound to its free variable.
///
/// # Examples
/// ```
/// use numtrace_core::Expression;
///
/// let f = Expression::parse("x^3 - 4cos(x)", "x").unwrap();
/// assert_eq!(f.eval(0.0).unwrap(), -4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    variable: String,
    root: Node,
}

impl Expression {
    /// Parses `source` as a formula in `variable`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid syntax, trailing input, or identifiers that
    /// are neither the variable, a constant, nor a known function.
    pub fn parse(source: &str, variable: &str) -> Result<Self, ExpressionError> {
        let root = parse::parse(source)?.lower(variable)?;
        Ok(Self {
            source: source.to_owned(),
            variable: variable.to_owned(),
            root,
        })
    }

    /// Evaluates the formula at `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::DivisionByZero`] if a divisor evaluates to zero.
    pub fn eval(&self, value: f64) -> Result<f64, ExpressionError> {
        self.root.eval(value)
    }

    /// Returns the original formula text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the free variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

/// Errors that can occur when parsing or evaluating an [`Expression`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("invalid syntax: {0}")]
    Syntax(String),

    #[error("unexpected input: {0}")]
    UnconsumedInput(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("division by zero")]
    DivisionByZero,
}

/// Returns true if `name` can be used as a variable.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replaces every whole-word occurrence of `variable` with `value`.
///
/// Only complete identifiers match, so the `x` inside `exp` is left alone. The
/// value is parenthesized when it is negative or directly follows a number or
/// closing parenthesis, keeping the substituted text readable:
/// `2x` with `x = 1.5` becomes `2(1.500)`.
#[must_use]
pub fn substitute(expression: &str, variable: &str, value: &str) -> String {
    let mut out = String::with_capacity(expression.len() + value.len());
    let mut rest = expression;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_alphabetic() || c == '_' {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let (word, tail) = rest.split_at(len);
            if word == variable {
                let follows_operand = out
                    .chars()
                    .next_back()
                    .is_some_and(|p| p.is_ascii_alphanumeric() || p == '.' || p == ')');
                if value.starts_with('-') || follows_operand {
                    out.push('(');
                    out.push_str(value);
                    out.push(')');
                } else {
                    out.push_str(value);
                }
            } else {
                out.push_str(word);
            }
            rest = tail;
        } else if c.is_ascii_digit() || c == '.' {
            let (literal, tail) = rest.split_at(number_len(rest));
            out.push_str(literal);
            rest = tail;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

/// Returns the length of the number literal at the start of `text`, including
/// an exponent such as `e-3` when digits follow it.
fn number_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mantissa = bytes
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .count()
        .max(1);
    let mut exponent = mantissa;
    if matches!(bytes.get(exponent), Some(b'e' | b'E')) {
        exponent += 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            return exponent
                + bytes[exponent..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
        }
    }
    mantissa
}
