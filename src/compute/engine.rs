use crate::compute::error::ComputationError;
use crate::compute::kernel;
use crate::compute::state::RegisterState;
use crate::store::{BinaryOp, Instruction, Operand, Program, Register};

/// The smallest and largest value a read instruction may supply.
pub const DIGITS: std::ops::RangeInclusive<u8> = 1..=9;

/// Stateless single-instruction evaluator.
pub struct Engine;

impl Engine {
    /// Applies one binary instruction. Only `dest` changes; the other three
    /// registers are carried over.
    #[inline(always)]
    pub fn apply_binary(state: &RegisterState, op: BinaryOp, dest: Register, src: Operand) -> RegisterState {
        let a = state.get(dest);
        let b = state.resolve(src);
        state.set(dest, kernel::execute_binary(op, a, b))
    }

    /// Applies a read instruction with an externally chosen digit.
    ///
    /// Unchecked: the caller guarantees `digit` is in [`DIGITS`]. Use
    /// [`Engine::apply`] for digits from outside the search.
    #[inline(always)]
    pub fn apply_read(state: &RegisterState, dest: Register, digit: u8) -> RegisterState {
        debug_assert!(DIGITS.contains(&digit), "input digit {} out of range", digit);
        state.set(dest, digit as i64)
    }

    /// Applies any instruction. Reads need `digit`; binary instructions
    /// ignore it.
    pub fn apply(state: &RegisterState, instruction: &Instruction, digit: Option<u8>) -> Result<RegisterState, ComputationError> {
        match *instruction {
            Instruction::Inp { dest } => {
                let d = digit.ok_or(ComputationError::MissingInput)?;
                if !DIGITS.contains(&d) {
                    return Err(ComputationError::DigitOutOfRange { digit: d });
                }
                Ok(Self::apply_read(state, dest, d))
            }
            Instruction::Binary { op, dest, src } => Ok(Self::apply_binary(state, op, dest, src)),
        }
    }

    /// Runs the whole program over one concrete input, starting from all
    /// registers at zero.
    ///
    /// The input must contain exactly one digit in `1..=9` per read
    /// instruction.
    pub fn execute(program: &Program, input: &str) -> Result<RegisterState, ComputationError> {
        let digits = Self::validate_input(program, input)?;

        let mut state = RegisterState::ZERO;
        let mut next_digit = digits.into_iter();
        for instruction in program {
            let digit = if instruction.is_read() { next_digit.next() } else { None };
            state = Self::apply(&state, instruction, digit)?;
        }
        Ok(state)
    }

    fn validate_input(program: &Program, input: &str) -> Result<Vec<u8>, ComputationError> {
        let actual = input.chars().count();
        if actual != program.input_len() {
            return Err(ComputationError::InputLength { expected: program.input_len(), actual });
        }

        input
            .chars()
            .enumerate()
            .map(|(position, c)| match c.to_digit(10) {
                Some(d) if DIGITS.contains(&(d as u8)) => Ok(d as u8),
                _ => Err(ComputationError::InvalidDigit { position, found: c }),
            })
            .collect()
    }
}
