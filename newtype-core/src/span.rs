//! Source position utilities.
//!
//! The Newtype grammar is layout sensitive, so every token carries a
//! line and column in addition to delimiting a region of source text.
//! Columns are what the parser inspects when it decides whether a
//! token continues the current statement or dedents out of it.

/// A single position in the source, with 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Pos {
        Pos { line, column }
    }

    /// The position of the first character of a file.
    pub fn start() -> Pos {
        Pos { line: 1, column: 1 }
    }
}

/// A half-open region `[start, end)` of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Span {
        Span { start, end }
    }

    /// A zero-width span at the given position.
    pub fn empty(pos: Pos) -> Span {
        Span {
            start: pos,
            end: pos,
        }
    }
}
