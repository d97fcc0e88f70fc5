use crate::search::SearchReport;
use crate::store::{BinaryOp, Instruction, Operand, Program, Register};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperandStats {
    /// Binary instructions whose source is a register.
    pub register_sources: usize,
    /// Binary instructions whose source is a literal.
    pub literal_sources: usize,
    /// `div`/`mod` by literal zero. These always produce 0.
    pub zero_divisors: usize,
    /// `mul` by literal zero, the usual way a register is cleared.
    pub clears: usize,
}

/// How the frontier evolved during a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontierStats {
    pub peak_frontier: usize,
    /// Index of the first instruction after which the peak was reached.
    pub peak_index: usize,
    pub final_frontier: usize,
    /// Successors merged into an existing state, summed over all steps.
    pub total_merges: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryReport {
    pub total_ops: usize,
    pub input_len: usize,
    pub op_counts: BTreeMap<String, usize>,
    /// Writes per destination register, keyed by register name.
    pub writes: BTreeMap<String, usize>,
    pub operands: OperandStats,
    pub frontier: Option<FrontierStats>,
}

impl TelemetryReport {
    /// Static profile of a program, without running it.
    pub fn analyze(program: &Program) -> Self {
        let mut op_counts = BTreeMap::new();
        let mut writes: BTreeMap<String, usize> =
            Register::ALL.iter().map(|r| (r.name().to_string(), 0)).collect();
        let mut operands = OperandStats::default();

        for instruction in program {
            *op_counts.entry(instruction.mnemonic().to_string()).or_insert(0) += 1;
            *writes.entry(instruction.dest().name().to_string()).or_insert(0) += 1;

            if let Instruction::Binary { op, src, .. } = instruction {
                match src {
                    Operand::Register(_) => operands.register_sources += 1,
                    Operand::Literal(v) => {
                        operands.literal_sources += 1;
                        if *v == 0 {
                            match op {
                                BinaryOp::Div | BinaryOp::Mod => operands.zero_divisors += 1,
                                BinaryOp::Mul => operands.clears += 1,
                                _ => {}
                            }
                        }
                    }
                }
            }
        }

        Self {
            total_ops: program.len(),
            input_len: program.input_len(),
            op_counts,
            writes,
            operands,
            frontier: None,
        }
    }

    /// Attaches frontier statistics from a completed search.
    pub fn with_search(mut self, report: &SearchReport) -> Self {
        let mut stats = FrontierStats {
            final_frontier: report.final_frontier,
            elapsed_ms: report.elapsed_ms,
            ..FrontierStats::default()
        };
        for step in &report.steps {
            if step.frontier_after > stats.peak_frontier {
                stats.peak_frontier = step.frontier_after;
                stats.peak_index = step.index;
            }
            stats.total_merges += step.merges;
        }
        self.frontier = Some(stats);
        self
    }
}
