//! state.rs
//! The four-register machine state.

use crate::store::{Operand, Register};
use serde::{Serialize, Deserialize};
use std::fmt;

/// Register values at one point of program execution.
///
/// A plain value type: equality and hashing are structural over all four
/// fields, which is what lets it key the search frontier. Updates return a
/// new state instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RegisterState {
    pub w: i64,
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl RegisterState {
    pub const ZERO: RegisterState = RegisterState { w: 0, x: 0, y: 0, z: 0 };

    pub fn new(w: i64, x: i64, y: i64, z: i64) -> Self {
        Self { w, x, y, z }
    }

    #[inline(always)]
    pub fn get(&self, reg: Register) -> i64 {
        match reg {
            Register::W => self.w,
            Register::X => self.x,
            Register::Y => self.y,
            Register::Z => self.z,
        }
    }

    #[inline(always)]
    pub fn set(&self, reg: Register, value: i64) -> Self {
        let mut next = *self;
        match reg {
            Register::W => next.w = value,
            Register::X => next.x = value,
            Register::Y => next.y = value,
            Register::Z => next.z = value,
        }
        next
    }

    /// Resolves an operand against this state: registers read their current
    /// value, literals resolve to themselves.
    #[inline(always)]
    pub fn resolve(&self, operand: Operand) -> i64 {
        match operand {
            Operand::Register(reg) => self.get(reg),
            Operand::Literal(v) => v,
        }
    }
}

impl fmt::Display for RegisterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{w={}, x={}, y={}, z={}}}", self.w, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_leaves_other_registers() {
        let s = RegisterState::new(1, 2, 3, 4);
        let t = s.set(Register::Y, 30);
        assert_eq!(t, RegisterState::new(1, 2, 30, 4));
        // Original is untouched.
        assert_eq!(s, RegisterState::new(1, 2, 3, 4));
    }

    #[test]
    fn test_each_register_resolves_to_itself() {
        let s = RegisterState::new(10, 20, 30, 40);
        let values: Vec<i64> = Register::ALL.iter().map(|r| s.resolve(Operand::Register(*r))).collect();
        assert_eq!(values, vec![10, 20, 30, 40]);
        assert_eq!(s.resolve(Operand::Literal(-7)), -7);
    }

    #[test]
    fn test_structural_equality_and_hashing() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(RegisterState::new(0, 1, 0, 0));
        set.insert(RegisterState::ZERO.set(Register::X, 1));
        set.insert(RegisterState::ZERO);
        assert_eq!(set.len(), 2);
    }
}
