use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// One of the four ALU registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    W,
    X,
    Y,
    Z,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::W, Register::X, Register::Y, Register::Z];

    pub fn name(&self) -> &'static str {
        match self {
            Register::W => "w",
            Register::X => "x",
            Register::Y => "y",
            Register::Z => "z",
        }
    }
}

impl FromStr for Register {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Register::W),
            "x" => Ok(Register::X),
            "y" => Ok(Register::Y),
            "z" => Ok(Register::Z),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The source side of a binary instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    Register(Register),
    Literal(i64),
}

impl FromStr for Operand {
    type Err = ();

    /// Register names take precedence; anything else must be a base-10 integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(reg) = s.parse::<Register>() {
            return Ok(Operand::Register(reg));
        }
        s.parse::<i64>().map(Operand::Literal).map_err(|_| ())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(r) => r.fmt(f),
            Operand::Literal(v) => write!(f, "{}", v),
        }
    }
}

/// The five stateless arithmetic operations. `inp` is not one of them: it
/// depends on an external digit and is modelled separately by [`Instruction::Inp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Mul,
    Div,
    Mod,
    Eql,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [BinaryOp::Add, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Mod, BinaryOp::Eql];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Eql => "eql",
        }
    }
}

impl FromStr for BinaryOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(BinaryOp::Add),
            "mul" => Ok(BinaryOp::Mul),
            "div" => Ok(BinaryOp::Div),
            "mod" => Ok(BinaryOp::Mod),
            "eql" => Ok(BinaryOp::Eql),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single ALU instruction. The shape of each variant fixes its arity, so a
/// constructed `Instruction` is always well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instruction {
    /// `inp a`: read the next input digit into `dest`.
    Inp { dest: Register },
    /// `op a b`: `dest <- dest op src`.
    Binary { op: BinaryOp, dest: Register, src: Operand },
}

impl Instruction {
    pub fn is_read(&self) -> bool {
        matches!(self, Instruction::Inp { .. })
    }

    pub fn dest(&self) -> Register {
        match self {
            Instruction::Inp { dest } | Instruction::Binary { dest, .. } => *dest,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Inp { .. } => "inp",
            Instruction::Binary { op, .. } => op.mnemonic(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Inp { dest } => write!(f, "inp {}", dest),
            Instruction::Binary { op, dest, src } => write!(f, "{} {} {}", op, dest, src),
        }
    }
}
