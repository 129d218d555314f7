/// How a solve ended.
///
/// Callers that only need the legacy yes/no answer can use
/// [`Outcome::is_success`], which treats hitting the iteration cap as success
/// because a best-effort estimate is still reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The convergence test passed, or a direct method produced its answer.
    Converged,
    /// The iteration cap was reached; the reported value is a best effort.
    MaxIterationsReached,
    /// Validation or a domain error stopped the solve; no answer is reported.
    Failed,
}

impl Outcome {
    /// Returns true unless the solve failed.
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Outcome::Failed)
    }

    /// Returns true only if the convergence test passed.
    #[must_use]
    pub fn is_converged(self) -> bool {
        matches!(self, Outcome::Converged)
    }
}
