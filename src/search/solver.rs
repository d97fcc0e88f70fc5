//! Drives the frontier across a whole program.
use crate::search::config::SearchOptions;
use crate::search::frontier::Frontier;
use crate::search::range::InputRange;
use crate::store::{Instruction, Program};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, info_span};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// What one instruction did to the frontier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepStats {
    /// 0-based position of the instruction in the program.
    pub index: usize,
    /// 1-based line of the instruction in the program source.
    pub line: usize,
    pub instruction: Instruction,
    /// Reads processed once this step completed.
    pub inputs_read: usize,
    pub frontier_before: usize,
    pub frontier_after: usize,
    /// Successors that landed on a state already in the new frontier.
    pub merges: usize,
    pub elapsed_us: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Smallest and largest input leaving `z == 0`, or `None` if no input does.
    pub solution: Option<InputRange>,
    /// Empty unless [`SearchOptions::record_trace`] is set.
    pub steps: Vec<StepStats>,
    pub final_frontier: usize,
    pub elapsed_ms: f64,
}

impl SearchReport {
    pub fn peak_frontier(&self) -> usize {
        self.steps.iter().map(|s| s.frontier_after).max().unwrap_or(self.final_frontier)
    }
}

/// Searches all inputs of a program at once by carrying the frontier of
/// reachable register states from one instruction to the next.
#[derive(Debug, Clone, Default)]
pub struct FrontierSearch {
    options: SearchOptions,
}

impl FrontierSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    /// Runs the program over every input and reports the extreme inputs that
    /// leave `z` at zero.
    pub fn run(&self, program: &Program) -> Result<SearchReport, SearchError> {
        match self.options.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SearchError::ThreadPool(e.to_string()))?;
                Ok(pool.install(|| self.run_in_pool(program)))
            }
            None => Ok(self.run_in_pool(program)),
        }
    }

    fn run_in_pool(&self, program: &Program) -> SearchReport {
        let span = info_span!("frontier_search", instructions = program.len(), inputs = program.input_len());
        let _enter = span.enter();

        let start = Instant::now();
        let record = self.options.record_trace;
        let mut steps = Vec::with_capacity(if record { program.len() } else { 0 });
        let mut frontier = Frontier::initial();
        let mut inputs_read = 0;

        for (index, instruction) in program.iter().enumerate() {
            let before = frontier.len();
            let produced = frontier.fan_out(instruction);
            let line = program.source_line(index).unwrap_or(index + 1);
            debug!(
                line,
                len = inputs_read,
                states = before,
                elapsed = ?start.elapsed(),
                "{}", instruction
            );

            let step_start = Instant::now();
            frontier = frontier.step(instruction, &self.options);
            if instruction.is_read() {
                inputs_read += 1;
            }

            if record {
                steps.push(StepStats {
                    index,
                    line,
                    instruction: *instruction,
                    inputs_read,
                    frontier_before: before,
                    frontier_after: frontier.len(),
                    merges: produced - frontier.len(),
                    elapsed_us: step_start.elapsed().as_micros() as u64,
                });
            }
        }

        let solution = frontier.solutions();
        let elapsed = start.elapsed();
        info!(
            states = frontier.len(),
            found = solution.is_some(),
            elapsed = ?elapsed,
            "search finished"
        );

        SearchReport {
            solution,
            steps,
            final_frontier: frontier.len(),
            elapsed_ms: elapsed.as_secs_f64() * 1e3,
        }
    }
}

/// Runs the search with default options on the global rayon pool.
pub fn solve(program: &Program) -> Option<InputRange> {
    let search = FrontierSearch::new(SearchOptions { record_trace: false, ..SearchOptions::default() });
    search.run_in_pool(program).solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Engine;
    use rstest::rstest;

    /// One stack-machine block: pushes `w + cy` onto z in base 26, or pops
    /// when `zdiv == 26` and the digit matches `top + cx`.
    fn block(zdiv: i64, cx: i64, cy: i64) -> String {
        format!(
            "inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {zdiv}\nadd x {cx}\neql x w\neql x 0\n\
             mul y 0\nadd y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {cy}\nmul y x\nadd z y\n"
        )
    }

    fn stack_program() -> Program {
        // i1 = i0 + 3, i3 = i2 - 4
        let src = [block(1, 12, 7), block(26, -4, 0), block(1, 11, 2), block(26, -6, 0)].concat();
        Program::parse(&src).unwrap()
    }

    #[rstest]
    #[case("inp x", Some(("1", "9")))]
    #[case("inp x\ninp y\neql x y", Some(("11", "99")))]
    #[case("inp z\neql z 5", Some(("1", "9")))]
    #[case("inp z\nadd z -5", Some(("5", "5")))]
    #[case("inp w\nadd z w\nadd z 1", None)]
    fn test_small_programs(#[case] src: &str, #[case] expected: Option<(&str, &str)>) {
        let program = Program::parse(src).unwrap();
        let expected = expected.map(|(min, max)| InputRange::new(min, max));
        assert_eq!(solve(&program), expected);
    }

    #[test]
    fn test_empty_program_has_empty_solution() {
        // Registers start at zero, so the empty input is valid.
        assert_eq!(solve(&Program::default()), Some(InputRange::empty()));
    }

    #[test]
    fn test_stack_program_extremes() {
        let program = stack_program();
        let solution = solve(&program).unwrap();
        assert_eq!(solution, InputRange::new("1451", "6995"));

        for input in [&solution.min, &solution.max] {
            assert_eq!(Engine::execute(&program, input).unwrap().z, 0, "input {}", input);
        }
        assert_ne!(Engine::execute(&program, "6996").unwrap().z, 0);
    }

    #[test]
    fn test_report_trace() {
        let program = stack_program();
        let report = FrontierSearch::default().run(&program).unwrap();

        assert_eq!(report.steps.len(), program.len());
        assert_eq!(report.steps.last().map(|s| s.inputs_read), Some(4));
        assert_eq!(report.final_frontier, report.steps.last().unwrap().frontier_after);
        assert!(report.peak_frontier() >= report.final_frontier);

        let first = &report.steps[0];
        assert_eq!((first.frontier_before, first.frontier_after, first.merges), (1, 9, 0));
        for s in &report.steps {
            let produced = if s.instruction.is_read() { s.frontier_before * 9 } else { s.frontier_before };
            assert_eq!(s.frontier_after + s.merges, produced);
        }
    }

    #[test]
    fn test_steps_report_source_lines() {
        let program = Program::parse("# read one digit\ninp z\n\neql z 5\n").unwrap();
        let report = FrontierSearch::new(SearchOptions::sequential()).run(&program).unwrap();
        let lines: Vec<(usize, usize)> = report.steps.iter().map(|s| (s.index, s.line)).collect();
        assert_eq!(lines, vec![(0, 2), (1, 4)]);
    }

    #[test]
    fn test_dedicated_pool_matches_default() {
        let program = stack_program();
        let options = SearchOptions { parallel_threshold: 0, ..SearchOptions::default() }.with_threads(2);
        let report = FrontierSearch::new(options).run(&program).unwrap();
        assert_eq!(report.solution, solve(&program));
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let options = SearchOptions { record_trace: false, ..SearchOptions::sequential() };
        let report = FrontierSearch::new(options).run(&stack_program()).unwrap();
        assert!(report.steps.is_empty());
        assert!(report.solution.is_some());
    }
}
