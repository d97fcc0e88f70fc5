//! The program store: instruction types and text loading.
pub mod error;
pub mod program;
pub mod types;

pub use error::ProgramError;
pub use program::Program;
pub use types::{BinaryOp, Instruction, Operand, Register};
