// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod board;
pub mod config;
pub mod data;
pub mod hash;
pub mod heuristic;
pub mod moves;
pub mod queue;
pub mod solver;

mod parser;
mod vec2d;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::board::Board;
use crate::config::SolverConfig;
use crate::solver::{SolveResult, SolverErr};

pub use crate::parser::ParserErr;

pub trait LoadBoard {
    fn load_board(&self) -> Result<Board, Box<dyn Error>>;
}

impl<P: AsRef<Path>> LoadBoard for P {
    fn load_board(&self) -> Result<Board, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        let board = text.parse::<Board>()?;
        Ok(board)
    }
}

pub trait Solve {
    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolverErr>;
}

impl Solve for Board {
    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolverErr> {
        solver::solve(self, config)
    }
}
