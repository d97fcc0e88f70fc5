use super::error::ProgramError;
use super::types::*;
use serde::Serialize;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;
use std::str::FromStr;

impl Instruction {
    /// Builds an instruction from an already tokenized line: the operation
    /// name followed by its operands.
    pub fn from_tokens(tokens: &[&str]) -> Result<Self, ProgramError> {
        let (op, operands) = match tokens.split_first() {
            Some(split) => split,
            None => return Err(ProgramError::Arity { line: 0, op: String::new(), expected: 1, actual: 0 }),
        };

        let expected = match *op {
            "inp" => 1,
            other if other.parse::<BinaryOp>().is_ok() => 2,
            other => return Err(ProgramError::UnknownOperation { line: 0, op: other.to_string() }),
        };
        if operands.len() != expected {
            return Err(ProgramError::Arity {
                line: 0,
                op: op.to_string(),
                expected,
                actual: operands.len(),
            });
        }

        let dest = parse_register(operands[0])?;
        match op.parse::<BinaryOp>() {
            Err(()) => Ok(Instruction::Inp { dest }),
            Ok(bin) => {
                let src = operands[1].parse::<Operand>().map_err(|_| ProgramError::InvalidLiteral {
                    line: 0,
                    token: operands[1].to_string(),
                })?;
                Ok(Instruction::Binary { op: bin, dest, src })
            }
        }
    }
}

fn parse_register(token: &str) -> Result<Register, ProgramError> {
    token.parse::<Register>().map_err(|_| ProgramError::InvalidRegister { line: 0, token: token.to_string() })
}

/// An ordered, immutable ALU program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    instructions: Vec<Instruction>,
    // Number of `inp` instructions, i.e. the length of a complete input.
    input_len: usize,
    // 1-based source line of each instruction.
    #[serde(skip)]
    lines: Vec<usize>,
}

impl Program {
    /// Builds a program from instructions that did not come from text; the
    /// n-th instruction is reported as line n.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let lines = (1..=instructions.len()).collect();
        Self::with_lines(instructions, lines)
    }

    fn with_lines(instructions: Vec<Instruction>, lines: Vec<usize>) -> Self {
        debug_assert_eq!(instructions.len(), lines.len());
        let input_len = instructions.iter().filter(|i| i.is_read()).count();
        Self { instructions, input_len, lines }
    }

    /// Tokenizes and parses program text, one instruction per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Errors report the
    /// 1-based line they occurred on.
    pub fn parse(source: &str) -> Result<Self, ProgramError> {
        let mut instructions = Vec::new();
        let mut lines = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tokens: SmallVec<[&str; 3]> = line.split_whitespace().collect();
            let instruction = Instruction::from_tokens(&tokens).map_err(|e| e.at_line(idx + 1))?;
            instructions.push(instruction);
            lines.push(idx + 1);
        }
        Ok(Self::with_lines(instructions, lines))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ProgramError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&source)
    }

    #[inline(always)]
    pub fn instructions(&self) -> &[Instruction] { &self.instructions }
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> { self.instructions.iter() }
    pub fn len(&self) -> usize { self.instructions.len() }
    pub fn is_empty(&self) -> bool { self.instructions.is_empty() }
    pub fn input_len(&self) -> usize { self.input_len }

    /// Source line of the instruction at `index`, accounting for skipped
    /// blank and comment lines.
    pub fn source_line(&self, index: usize) -> Option<usize> { self.lines.get(index).copied() }
}

impl FromStr for Program {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
