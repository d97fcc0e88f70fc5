//! Frontier search over all inputs of a program.
//!
//! Instead of enumerating the 9^n digit strings of an n-read program, the
//! search tracks the set of distinct register states reachable after each
//! instruction, keeping only the smallest and largest input prefix that
//! reaches each one.
pub mod config;
pub mod frontier;
pub mod range;
pub mod solver;

pub use config::SearchOptions;
pub use frontier::Frontier;
pub use range::InputRange;
pub use solver::{solve, FrontierSearch, SearchError, SearchReport, StepStats};
