//! Board coordinates and coordinate pairs
//!
//! Rows are labelled with letters (A-Z) and columns with a single hex symbol
//! (0-9, a-f), so a cell reads like `D2`.

use serde::{Deserialize, Serialize};
use std::fmt;

const ROW_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const COL_SYMBOLS: &str = "0123456789abcdef";
const SEPARATORS: &[char] = &[' ', ',', '.', ':', ';', '-', '_'];

fn strip_separators(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(c))
        .collect()
}

fn symbol_index(symbols: &str, c: char) -> Option<i32> {
    symbols.find(c).map(|i| i as i32)
}

/// A cell address on the board
///
/// Signed so that neighbours of edge cells can be represented and rejected
/// by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Row letter, or '?' when the row has no symbol
    pub fn row_char(&self) -> char {
        usize::try_from(self.row)
            .ok()
            .and_then(|r| ROW_SYMBOLS.chars().nth(r))
            .unwrap_or('?')
    }

    /// Column symbol, or '?' when the column has no symbol
    pub fn col_char(&self) -> char {
        usize::try_from(self.col)
            .ok()
            .and_then(|c| COL_SYMBOLS.chars().nth(c))
            .unwrap_or('?')
    }

    /// Two-character label such as `B3`
    pub fn label(&self) -> String {
        format!("{}{}", self.row_char(), self.col_char())
    }

    /// Parse a label such as `b3` or ` B-3 `
    pub fn parse(s: &str) -> Option<Self> {
        let stripped = strip_separators(s);
        let mut chars = stripped.chars();
        let (r, c) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        Self::from_symbols(r, c)
    }

    fn from_symbols(r: char, c: char) -> Option<Self> {
        let row = symbol_index(ROW_SYMBOLS, r.to_ascii_uppercase())?;
        let col = symbol_index(COL_SYMBOLS, c.to_ascii_lowercase())?;
        Some(Self::new(row, col))
    }

    /// Is this coordinate on a `dim` x `dim` board?
    pub fn is_within(&self, dim: usize) -> bool {
        let dim = dim as i32;
        (0..dim).contains(&self.row) && (0..dim).contains(&self.col)
    }

    /// Orthogonal neighbours in fixed order: up, left, down, right
    ///
    /// Move enumeration depends on this order.
    pub fn adjacent(&self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col + 1),
        ]
    }

    /// The 8 cells around this one (orthogonal and diagonal)
    pub fn surrounding(&self) -> impl Iterator<Item = Coord> {
        let centre = *self;
        self.iter_range(1).filter(move |c| *c != centre)
    }

    /// Cells of the square of radius `dist` centred here, row-major
    pub fn iter_range(&self, dist: i32) -> RectIter {
        CoordPair::new(
            Coord::new(self.row - dist, self.col - dist),
            Coord::new(self.row + dist, self.col + dist),
        )
        .iter_rectangle()
    }

    /// Is `other` one orthogonal step away?
    pub fn is_adjacent_to(&self, other: &Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_char(), self.col_char())
    }
}

/// A move (src -> dst) or a rectangle (top-left, bottom-right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CoordPair {
    pub src: Coord,
    pub dst: Coord,
}

impl CoordPair {
    pub fn new(src: Coord, dst: Coord) -> Self {
        Self { src, dst }
    }

    pub fn from_quad(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self::new(Coord::new(row0, col0), Coord::new(row1, col1))
    }

    /// Rectangle covering a whole `dim` x `dim` board
    pub fn from_dim(dim: usize) -> Self {
        let md = dim as i32 - 1;
        Self::from_quad(0, 0, md, md)
    }

    /// The self-destruct move for a cell
    pub fn self_move(coord: Coord) -> Self {
        Self::new(coord, coord)
    }

    pub fn is_self_move(&self) -> bool {
        self.src == self.dst
    }

    /// Parse a move such as `A3 B2`, `a3b2` or `A3-B2`
    pub fn parse(s: &str) -> Option<Self> {
        let stripped = strip_separators(s);
        let chars: Vec<char> = stripped.chars().collect();
        if chars.len() != 4 {
            return None;
        }
        Some(Self::new(
            Coord::from_symbols(chars[0], chars[1])?,
            Coord::from_symbols(chars[2], chars[3])?,
        ))
    }

    /// Row-major cells from src to dst inclusive
    pub fn iter_rectangle(&self) -> RectIter {
        RectIter {
            rect: *self,
            next: if self.src.row <= self.dst.row && self.src.col <= self.dst.col {
                Some(self.src)
            } else {
                None
            },
        }
    }
}

impl fmt::Display for CoordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}

/// Lazy row-major walk over a rectangle; clone it to restart
#[derive(Debug, Clone)]
pub struct RectIter {
    rect: CoordPair,
    next: Option<Coord>,
}

impl Iterator for RectIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let current = self.next?;
        self.next = if current.col < self.rect.dst.col {
            Some(Coord::new(current.row, current.col + 1))
        } else if current.row < self.rect.dst.row {
            Some(Coord::new(current.row + 1, self.rect.src.col))
        } else {
            None
        };
        Some(current)
    }
}
