//! Defines the error types for loading a program.
use thiserror::Error;

/// A malformed program. These are fatal: there is no fallback interpretation
/// of an instruction the ALU does not understand.
///
/// `line` is the 1-based source line, or 0 when the instruction was built
/// from tokens that did not come from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation { line: usize, op: String },
    #[error("line {line}: '{op}' takes {expected} operand(s), got {actual}")]
    Arity { line: usize, op: String, expected: usize, actual: usize },
    #[error("line {line}: '{token}' is not a register")]
    InvalidRegister { line: usize, token: String },
    #[error("line {line}: '{token}' is neither a register nor an integer literal")]
    InvalidLiteral { line: usize, token: String },
    #[error("failed to read program '{path}': {message}")]
    Io { path: String, message: String },
}

impl ProgramError {
    /// Re-targets a token-level error at a specific source line.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            ProgramError::UnknownOperation { op, .. } => ProgramError::UnknownOperation { line, op },
            ProgramError::Arity { op, expected, actual, .. } => ProgramError::Arity { line, op, expected, actual },
            ProgramError::InvalidRegister { token, .. } => ProgramError::InvalidRegister { line, token },
            ProgramError::InvalidLiteral { token, .. } => ProgramError::InvalidLiteral { line, token },
            io @ ProgramError::Io { .. } => io,
        }
    }
}
