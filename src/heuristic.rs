use std::fmt::{self, Display, Formatter};

use crate::board::{Board, Cell, Piece, TARGET_ID};
use crate::config::HeuristicConfig;
use crate::data::{Pos, DIRECTIONS};

/// Sentinel for unsolvable positions, larger than any reachable `g + h`.
pub const H_IMPOSSIBLE: u32 = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PathBlocking,
    SizeConflict,
    PositionalTrap,
    DeadEnd,
    InsufficientSpace,
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ConstraintKind::PathBlocking => write!(f, "path blocking"),
            ConstraintKind::SizeConflict => write!(f, "size conflict"),
            ConstraintKind::PositionalTrap => write!(f, "positional trap"),
            ConstraintKind::DeadEnd => write!(f, "dead end"),
            ConstraintKind::InsufficientSpace => write!(f, "insufficient space"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub severity: u32,
    pub pieces: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub target_distance: u32,
    pub constraints: Vec<Constraint>,
    pub total_penalty: u32,
    pub estimate: u32,
    pub impossible: bool,
}

/// The scalar heuristic used as `h` by the search.
pub fn estimate(board: &Board, config: &HeuristicConfig) -> u32 {
    analyze(board, config).estimate
}

/// Full constraint analysis of a board state.
pub fn analyze(board: &Board, config: &HeuristicConfig) -> Analysis {
    let mut constraints = Vec::new();
    path_blocking(board, &mut constraints);
    size_conflicts(board, config, &mut constraints);
    positional_traps(board, config, &mut constraints);
    dead_ends(board, config, &mut constraints);
    insufficient_space(board, config, &mut constraints);

    let total_penalty = constraints.iter().map(|c| c.severity).sum();
    let impossible = constraints.iter().any(|c| {
        c.kind == ConstraintKind::PositionalTrap && c.severity >= config.impossible_threshold
    });

    let target_distance = u32::from(board.target_center().dist(board.exit_center()).unsigned_abs());
    let estimate = if impossible {
        H_IMPOSSIBLE
    } else {
        target_distance + total_penalty / config.penalty_divisor.max(1)
    };

    Analysis {
        target_distance,
        constraints,
        total_penalty,
        estimate,
        impossible,
    }
}

/// Pieces sitting in the target's column range between it and the exit row.
fn path_blocking(board: &Board, constraints: &mut Vec<Constraint>) {
    let target = board.target();
    let min_col = target.positions.iter().map(|p| p.c).min().unwrap_or(0);
    let max_col = target.positions.iter().map(|p| p.c).max().unwrap_or(0);
    let exit_row = board.exit_center().r;

    let target_row = if exit_row >= board.target_center().r {
        target.positions.iter().map(|p| p.r).max().unwrap_or(0)
    } else {
        target.positions.iter().map(|p| p.r).min().unwrap_or(0)
    };
    let (from, to) = if target_row <= exit_row {
        (target_row + 1, exit_row)
    } else {
        (exit_row + 1, target_row)
    };

    for r in from..to {
        for c in min_col..=max_col {
            let pos = Pos::new(r, c);
            let id = match board.grid[pos] {
                Cell::Piece(id) if id != TARGET_ID => id,
                _ => continue,
            };
            let row_distance = (exit_row - r).unsigned_abs() as i32;
            let base = (10 - row_distance).max(0) as u32;
            constraints.push(Constraint {
                kind: ConstraintKind::PathBlocking,
                severity: base + piece_size_class(&board.pieces()[&id]),
                pieces: vec![id, TARGET_ID],
            });
        }
    }
}

/// Pairs of large pieces close enough to get in each other's way.
fn size_conflicts(board: &Board, config: &HeuristicConfig, constraints: &mut Vec<Constraint>) {
    let large: Vec<&Piece> = board
        .pieces()
        .values()
        .filter(|p| p.size() >= config.large_piece_min)
        .collect();

    for (i, p1) in large.iter().enumerate() {
        for p2 in large.iter().skip(i + 1) {
            if pieces_adjacent(p1, p2) {
                constraints.push(Constraint {
                    kind: ConstraintKind::SizeConflict,
                    severity: config.conflict_base + p1.size() as u32 + p2.size() as u32,
                    pieces: vec![p1.id, p2.id],
                });
            }
        }
    }
}

fn pieces_adjacent(p1: &Piece, p2: &Piece) -> bool {
    p1.positions
        .iter()
        .any(|&a| p2.positions.iter().any(|&b| a.chebyshev(b) <= 2))
}

/// Non-target pieces on exit cells.
fn positional_traps(board: &Board, config: &HeuristicConfig, constraints: &mut Vec<Constraint>) {
    for piece in board.pieces().values() {
        if piece.id == TARGET_ID {
            continue;
        }
        if piece.positions.iter().any(|&pos| board.is_exit(pos)) {
            constraints.push(Constraint {
                kind: ConstraintKind::PositionalTrap,
                severity: config.trap_penalty,
                pieces: vec![piece.id, TARGET_ID],
            });
        }
    }
}

/// Immobile pieces stuck in a corner zone of the board.
fn dead_ends(board: &Board, config: &HeuristicConfig, constraints: &mut Vec<Constraint>) {
    let rows = board.grid.rows();
    let cols = board.grid.cols();
    for piece in board.pieces().values() {
        if piece.id == TARGET_ID {
            continue;
        }
        let in_corner = piece.positions.iter().any(|&pos| {
            (pos.r <= 1 || pos.r >= rows - 2) && (pos.c <= 1 || pos.c >= cols - 2)
        });
        if in_corner && DIRECTIONS.iter().all(|&dir| board.max_slide(piece, dir) == 0) {
            constraints.push(Constraint {
                kind: ConstraintKind::DeadEnd,
                severity: config.dead_end_penalty,
                pieces: vec![piece.id],
            });
        }
    }
}

/// Too few free cells for the pieces to maneuver.
fn insufficient_space(board: &Board, config: &HeuristicConfig, constraints: &mut Vec<Constraint>) {
    let empty = board
        .grid
        .positions()
        .filter(|&pos| board.grid[pos] == Cell::Empty && !board.is_exit(pos))
        .count() as u32;
    let piece_cells: u32 = board.pieces().values().map(|p| p.size() as u32).sum();

    let required = piece_cells / config.space_margin_divisor.max(1);
    if empty < required {
        constraints.push(Constraint {
            kind: ConstraintKind::InsufficientSpace,
            severity: config.space_penalty,
            pieces: vec![],
        });
    }
}

fn piece_size_class(piece: &Piece) -> u32 {
    piece.size().min(3) as u32
}
