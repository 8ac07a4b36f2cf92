// Typed failures of a solve call
//
// Stalling is not an error: a stalled search ends in `SolveResult::GaveUp`.
// Only a collaborator breaking the `GameState` contract, or an unusable
// configuration, aborts a solve.

/// Failure of a single solve invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The game state reported values the priority function cannot use
    ContractViolation { detail: String },
    /// Solver parameters that cannot drive a search
    InvalidConfig { detail: String },
}

impl SolveError {
    pub(crate) fn contract(detail: impl Into<String>) -> Self {
        SolveError::ContractViolation {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::ContractViolation { detail } => {
                write!(f, "game state contract violation: {detail}")
            }
            SolveError::InvalidConfig { detail } => {
                write!(f, "invalid solver configuration: {detail}")
            }
        }
    }
}

impl std::error::Error for SolveError {}
