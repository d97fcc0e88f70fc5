//! Search engine for four-register ALU programs.
//!
//! Given a program over registers `w, x, y, z` that reads a sequence of
//! digits `1..=9`, finds the smallest and largest input that leaves `z` at
//! zero. Rather than enumerating inputs, [`search`] carries the set of
//! reachable register states through the program, keeping only the extreme
//! input prefixes per state.

pub mod analysis;
pub mod compute;
pub mod search;
pub mod store;

#[cfg(feature = "python")]
pub mod bindings;

pub use compute::{ComputationError, Engine, RegisterState};
pub use search::{solve, Frontier, FrontierSearch, InputRange, SearchOptions, SearchReport};
pub use store::{BinaryOp, Instruction, Operand, Program, ProgramError, Register};
