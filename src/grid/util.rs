use std::slice::Iter;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        DIRS.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position in the given direction, if it is still inside
    /// a grid of `rows` x `cols`
    pub fn step(&self, dir: Direction, rows: usize, cols: usize) -> Option<Position> {
        match dir {
            Direction::Up => {
                if self.row != 0 {
                    Some(Position::new(self.row - 1, self.col))
                } else {
                    None
                }
            }
            Direction::Down => {
                if self.row + 1 < rows {
                    Some(Position::new(self.row + 1, self.col))
                } else {
                    None
                }
            }
            Direction::Left => {
                if self.col != 0 {
                    Some(Position::new(self.row, self.col - 1))
                } else {
                    None
                }
            }
            Direction::Right => {
                if self.col + 1 < cols {
                    Some(Position::new(self.row, self.col + 1))
                } else {
                    None
                }
            }
        }
    }

    /// Returns all the valid adjacent positions to this position
    pub fn adjacent(&self, rows: usize, cols: usize) -> impl Iterator<Item = Position> + '_ {
        Direction::iter().filter_map(move |&d| self.step(d, rows, cols))
    }

    /// True when the two positions differ by exactly one step along one axis
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Converts the row/col to a 1d index
    pub fn as_index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}
