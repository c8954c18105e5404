//! Errors that can occur during a completion request.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Root rule is not part of the model.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// Execution fuel exhausted (too many rule visits).
    #[error("completion step limit of {0} exceeded")]
    ExecFuelExhausted(u32),

    /// Rule nesting deeper than the configured limit.
    #[error("completion recursion limit of {0} exceeded")]
    RecursionLimitExceeded(u32),
}
