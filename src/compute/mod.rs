//! The register-state interpreter.
pub mod engine;
pub mod error;
pub mod kernel;
pub mod state;

pub use engine::{Engine, DIGITS};
pub use error::ComputationError;
pub use state::RegisterState;
