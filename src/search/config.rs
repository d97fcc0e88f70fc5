//! Tuning knobs for the frontier search.

/// Frontier size at which a step switches to the rayon path. Below this the
/// per-worker maps cost more than they save.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Steps over a frontier with at least this many entries run in parallel.
    pub parallel_threshold: usize,
    /// Worker count for a dedicated rayon pool. `None` uses the global pool.
    pub threads: Option<usize>,
    /// Collect per-instruction [`StepStats`](super::solver::StepStats).
    pub record_trace: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            threads: None,
            record_trace: true,
        }
    }
}

impl SearchOptions {
    /// Never uses rayon.
    pub fn sequential() -> Self {
        Self { parallel_threshold: usize::MAX, ..Self::default() }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}
