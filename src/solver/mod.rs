mod a_star;
mod parallel;

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use separator::Separatable;

use crate::board::Board;
use crate::config::SolverConfig;
use crate::moves::Moves;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverErr {
    /// A broken internal invariant; indicates a bug, never swallowed.
    Internal(String),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::Internal(ref msg) => write!(f, "Internal solver error: {}", msg),
        }
    }
}

impl std::error::Error for SolverErr {}

/// Outcome of a search. "No solution" and cancellation are reported here,
/// not as errors; `message` tells them apart.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub found: bool,
    pub moves: Moves,
    pub nodes_explored: u64,
    pub nodes_generated: u64,
    pub max_open_set_size: u64,
    pub elapsed: Duration,
    pub message: String,
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution found: {}", self.found)?;
        writeln!(f, "Message: {}", self.message)?;
        writeln!(f, "Time taken: {:?}", self.elapsed)?;
        writeln!(f, "Nodes explored: {}", self.nodes_explored.separated_string())?;
        writeln!(f, "Nodes generated: {}", self.nodes_generated.separated_string())?;
        writeln!(
            f,
            "Max open set size: {}",
            self.max_open_set_size.separated_string()
        )?;

        if self.found {
            writeln!(f, "Solution length: {} moves", self.moves.len())?;
            if self.moves.is_empty() {
                writeln!(f, "\nSolution path: already at goal!")?;
            } else {
                writeln!(f, "\nSolution path:")?;
                for (i, mov) in self.moves.iter().enumerate() {
                    writeln!(f, "{}. {}", i + 1, mov)?;
                }
                writeln!(
                    f,
                    "\nEfficiency: {:.2} nodes explored per move",
                    self.nodes_explored as f64 / self.moves.len() as f64
                )?;
            }
        }
        Ok(())
    }
}

/// Runs the parallel A* search on `board`.
pub fn solve(board: &Board, config: &SolverConfig) -> Result<SolveResult, SolverErr> {
    parallel::solve(board, config)
}
