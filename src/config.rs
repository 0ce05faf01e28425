use std::time::Duration;

/// Solver-level knobs. `workers == 0` means one worker per hardware thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    pub workers: usize,
    /// Cancel the search externally after this long.
    pub timeout: Option<Duration>,
    pub heuristic: HeuristicConfig,
}

impl SolverConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicConfig) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Tunables for the constraint heuristic. The integer thresholds are
/// empirical; raising `penalty_divisor` trades guidance for admissibility.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicConfig {
    /// The total constraint penalty is divided by this before it is added
    /// to the Manhattan distance.
    pub penalty_divisor: u32,
    /// Penalty per non-target piece sitting on an exit cell.
    pub trap_penalty: u32,
    /// A trap at or above this severity marks the board unsolvable.
    pub impossible_threshold: u32,
    /// Penalty per immobile piece stuck in a corner zone.
    pub dead_end_penalty: u32,
    /// One-off penalty when free cells run short.
    pub space_penalty: u32,
    /// Base severity for a pair of large pieces crowding each other.
    pub conflict_base: u32,
    /// Minimum cell count for a piece to count as large.
    pub large_piece_min: usize,
    /// Free cells must be at least total piece cells divided by this.
    pub space_margin_divisor: u32,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            penalty_divisor: 3,
            trap_penalty: 7,
            impossible_threshold: 9,
            dead_end_penalty: 5,
            space_penalty: 8,
            conflict_base: 6,
            large_piece_min: 3,
            space_margin_divisor: 5,
        }
    }
}
