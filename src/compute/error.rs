//! Errors raised when running a program over one concrete input.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputationError {
    #[error("read instruction applied without an input digit")]
    MissingInput,
    #[error("input digit {digit} is outside 1..=9")]
    DigitOutOfRange { digit: u8 },
    #[error("input position {position}: '{found}' is not a digit in 1..=9")]
    InvalidDigit { position: usize, found: char },
    #[error("program reads {expected} digit(s), input has {actual}")]
    InputLength { expected: usize, actual: usize },
}
