use thiserror::Error;

/// A malformed selection string, reported before any evaluation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parsing error in selection '{text}': {expected} expected, found '{found}'")]
pub struct ParseError {
    /// The full selection text that was being parsed.
    pub text: String,
    /// The offending token ("end of input" when the text ran out).
    pub found: String,
    /// What the parser expected at this point.
    pub expected: String,
}

impl ParseError {
    pub(crate) fn new(text: &str, found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            text: text.to_string(),
            found: found.into(),
            expected: expected.into(),
        }
    }
}

/// A selection applied to a target that cannot support it, reported at
/// evaluation entry before any node is visited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Group member {number} is outside its parent structure of {atoms} atoms")]
    MemberOutOfRange { number: usize, atoms: usize },

    #[error("Coordinate table has {found} positions but the structure has {expected} atoms")]
    CoordinateCountMismatch { expected: usize, found: usize },

    #[error("Periodic distance selection requires a unit cell with positive edge lengths")]
    MissingUnitCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Usage(#[from] UsageError),
}
