use std::fmt;

/// The step-by-step record of a solve.
///
/// `steps` describes every computation in execution order and `answers`
/// holds the final reported facts. Both are rebuilt on every solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<String>,
    answers: Vec<String>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all steps and answers.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.answers.clear();
    }

    /// Appends a step line.
    pub fn step(&mut self, line: impl Into<String>) {
        self.steps.push(line.into());
    }

    /// Appends an empty separator line.
    pub fn blank(&mut self) {
        self.steps.push(String::new());
    }

    /// Appends every line produced by `lines`.
    pub fn extend_steps<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.steps.extend(lines.into_iter().map(Into::into));
    }

    /// Appends an answer line.
    pub fn answer(&mut self, line: impl Into<String>) {
        self.answers.push(line.into());
    }

    /// Returns the recorded steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Returns the final answers in reporting order.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Returns true if the trace has no steps and no answers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.answers.is_empty()
    }
}

/// Renders the trace the way a text view shows it.
///
/// A trace with answers prints its steps under `Solution Steps:` and the
/// answers under `Final Answers:`. A trace without answers is a failed solve
/// and prints its steps under `Solution failed:`.
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.answers.is_empty() {
            writeln!(f, "Solution failed:")?;
            for line in &self.steps {
                writeln!(f, "{line}")?;
            }
            return Ok(());
        }

        writeln!(f, "Solution Steps:")?;
        for line in &self.steps {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "Final Answers:")?;
        for line in &self.answers {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A solver that exposes the trace of its most recent solve.
pub trait Traced {
    /// Returns the full trace.
    fn trace(&self) -> &Trace;

    /// Returns the recorded steps in execution order.
    fn steps(&self) -> &[String] {
        self.trace().steps()
    }

    /// Returns the final answers.
    fn answers(&self) -> &[String] {
        self.trace().answers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut trace = Trace::new();
        trace.step("first");
        trace.blank();
        trace.extend_steps(["second", "third"]);
        trace.answer("done");

        assert_eq!(trace.steps(), ["first", "", "second", "third"]);
        assert_eq!(trace.answers(), ["done"]);
    }

    #[test]
    fn clear_empties_both_sequences() {
        let mut trace = Trace::new();
        trace.step("a");
        trace.answer("b");
        trace.clear();
        assert!(trace.is_empty());
    }

    #[test]
    fn display_separates_steps_and_answers() {
        let mut trace = Trace::new();
        trace.step("x = 1");
        trace.answer("Root found: 1");

        assert_eq!(
            trace.to_string(),
            "Solution Steps:\nx = 1\n\nFinal Answers:\nRoot found: 1\n"
        );
    }

    #[test]
    fn display_reports_failure_without_answers() {
        let mut trace = Trace::new();
        trace.step("Error: singular matrix");
        assert_eq!(
            trace.to_string(),
            "Solution failed:\nError: singular matrix\n"
        );
    }
}
