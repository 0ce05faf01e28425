use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::board::{Board, Cell, TARGET_ID};
use crate::data::Pos;
use crate::vec2d::Vec2d;

/// Reserved markers; everything else alphanumeric is a piece id.
const WALL: char = 'O';
const EMPTY: char = '0';
const EXIT: char = 'X';
const TARGET_ON_EXIT: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Cell(usize, usize),
    NonRectangular(usize),
    EmptyBoard,
    NoTarget,
    NoExit,
    SplitExit,
    DisconnectedPiece(char),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Cell(r, c) => write!(f, "Invalid marker at [{}, {}]", r, c),
            ParserErr::NonRectangular(l) => write!(f, "Wrong line length on line {}", l),
            ParserErr::EmptyBoard => write!(f, "Empty board"),
            ParserErr::NoTarget => write!(f, "No target piece '{}'", TARGET_ID),
            ParserErr::NoExit => write!(f, "No exit region"),
            ParserErr::SplitExit => write!(f, "Exit region is not contiguous"),
            ParserErr::DisconnectedPiece(id) => {
                write!(f, "Piece '{}' is not a connected region", id)
            }
        }
    }
}

impl std::error::Error for ParserErr {}

impl FromStr for Board {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses a board description, one marker per cell.
pub(crate) fn parse(board: &str) -> Result<Board, ParserErr> {
    // trim so boards can be specified with raw strings more easily
    let board = board.trim_matches('\n').trim_end();
    if board.is_empty() {
        return Err(ParserErr::EmptyBoard);
    }

    let mut grid: Vec<Vec<Cell>> = Vec::new();
    let mut exit = Vec::new();
    for (r, line) in board.lines().enumerate() {
        let line = line.trim_end();
        let mut row = Vec::new();
        for (c, marker) in line.chars().enumerate() {
            let pos = Pos::new(r as i16, c as i16);
            let cell = match marker {
                WALL => Cell::Wall,
                EMPTY => Cell::Empty,
                EXIT => {
                    exit.push(pos);
                    Cell::Empty
                }
                TARGET_ON_EXIT => {
                    exit.push(pos);
                    Cell::Piece(TARGET_ID)
                }
                id if id.is_ascii_alphanumeric() => Cell::Piece(id),
                _ => return Err(ParserErr::Cell(r, c)),
            };
            row.push(cell);
        }
        if !grid.is_empty() && row.len() != grid[0].len() {
            return Err(ParserErr::NonRectangular(r));
        }
        grid.push(row);
    }

    Board::new(Vec2d::new(&grid), exit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_eq!("".parse::<Board>().unwrap_err(), ParserErr::EmptyBoard);
    }

    #[test]
    fn fail_bad_marker() {
        let board = r"
OOOO
Ob?O
OOXO
";
        assert_eq!(board.parse::<Board>().unwrap_err(), ParserErr::Cell(1, 2));
    }

    #[test]
    fn fail_ragged_rows() {
        let board = r"
OOOO
Ob0
OOXO
";
        assert_eq!(
            board.parse::<Board>().unwrap_err(),
            ParserErr::NonRectangular(1)
        );
    }

    #[test]
    fn fail_no_target() {
        let board = r"
OOOO
Oa0O
OOXO
";
        assert_eq!(board.parse::<Board>().unwrap_err(), ParserErr::NoTarget);
    }

    #[test]
    fn fail_no_exit() {
        let board = r"
OOOO
Ob0O
OOOO
";
        assert_eq!(board.parse::<Board>().unwrap_err(), ParserErr::NoExit);
    }

    #[test]
    fn fail_split_exit() {
        let board = r"
OOOOO
Ob00O
OXOXO
";
        assert_eq!(board.parse::<Board>().unwrap_err(), ParserErr::SplitExit);
    }

    #[test]
    fn fail_disconnected_piece() {
        let board = r"
OOOOO
Oa0aO
Ob0XO
OOOOO
";
        assert_eq!(
            board.parse::<Board>().unwrap_err(),
            ParserErr::DisconnectedPiece('a')
        );
    }

    #[test]
    fn parses_the_classic_instance() {
        let board: Board = r"
OOOOOOO
OabbbcO
OaadccO
OeedffO
OeegffO
OhhgiiO
OjjmkkO
Ol000nO
OOXXXOO
"
        .parse()
        .unwrap();

        assert_eq!(board.pieces().len(), 14);
        assert_eq!(board.target().size(), 3);
        assert_eq!(board.exit().len(), 3);
        assert!(!board.is_goal());
    }

    #[test]
    fn target_on_exit_marker() {
        let board: Board = r"
OOOOO
O000O
OO*OO
OOOOO
"
        .parse()
        .unwrap();
        assert!(board.is_exit(crate::data::Pos::new(2, 2)));
        assert!(board.is_goal());
    }
}
