/// The result of compiling a postfix expression into a Thompson NFA.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that occurred while compiling a postfix expression.
///
/// Every variant except [`Error::TooBig`] means the postfix input itself is
/// malformed. Defects in fragment construction are never reported through
/// this type; they panic instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operator was applied with fewer operands on the stack than it
    /// consumes.
    #[error(
        "operator '{operator}' at position {position} needs {needed} \
         operand(s) but only {found} available"
    )]
    MissingOperand {
        /// The operator character.
        operator: char,
        /// Zero-based index of the operator token.
        position: usize,
        /// Number of operands the operator consumes.
        needed: usize,
        /// Number of operands that were on the stack.
        found: usize,
    },
    /// The input was exhausted with anything other than exactly one operand
    /// left on the stack.
    #[error("postfix expression left {remaining} operands on the stack, expected exactly one")]
    DanglingOperands {
        /// Number of operands left on the stack.
        remaining: usize,
    },
    /// The automaton would exceed the configured state limit.
    #[error("compiled NFA exceeds the size limit of {limit} states")]
    TooBig {
        /// The configured limit.
        limit: usize,
    },
}

impl Error {
    /// Returns true if this error was caused by malformed postfix input.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MissingOperand { .. } | Error::DanglingOperands { .. })
    }
}
