//! Edge socket strings and the two edge connection tests
//!
//! A socket is the sequence of symbols along one tile edge. Two tiles fit
//! side by side when the facing socket strings are identical, symbol by
//! symbol and without reversal. An edge made only of [`BLANK_SYMBOL`] carries
//! no connection.

use std::fmt;

use crate::io::configuration::BLANK_SYMBOL;
use crate::spatial::direction::Direction;

/// The four socket strings of a tile, stored up, right, down, left
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sockets {
    edges: [String; 4],
}

impl Sockets {
    /// Build sockets from the four edge strings
    pub fn new(
        up: impl Into<String>,
        right: impl Into<String>,
        down: impl Into<String>,
        left: impl Into<String>,
    ) -> Self {
        Self {
            edges: [up.into(), right.into(), down.into(), left.into()],
        }
    }

    /// Sockets with every edge blank
    pub fn blank(socket_count: usize) -> Self {
        let edge: String = std::iter::repeat_n(BLANK_SYMBOL, socket_count).collect();
        Self::new(edge.clone(), edge.clone(), edge.clone(), edge)
    }

    /// Socket string on the given edge
    pub fn get(&self, direction: Direction) -> &str {
        self.edges.get(direction.index()).map_or("", String::as_str)
    }

    /// All edges in storage order
    pub const fn edges(&self) -> &[String; 4] {
        &self.edges
    }

    /// Whether the edge is made only of blank symbols
    pub fn is_blank(&self, direction: Direction) -> bool {
        self.get(direction).chars().all(|symbol| symbol == BLANK_SYMBOL)
    }

    /// Whether every edge is blank
    pub fn is_all_blank(&self) -> bool {
        Direction::ALL.iter().all(|&direction| self.is_blank(direction))
    }

    /// Quarter turn clockwise
    ///
    /// Each edge takes the string of the edge before it: up gets left, right
    /// gets up, down gets right, left gets down.
    pub fn rotate(&mut self) {
        self.edges.rotate_right(1);
    }

    /// A rotated copy, `quarter_turns` times clockwise
    #[must_use]
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        let mut sockets = self.clone();
        for _ in 0..quarter_turns % 4 {
            sockets.rotate();
        }
        sockets
    }

    /// Plain edge match: our `direction` edge equals their opposite edge
    pub fn can_connect(&self, direction: Direction, other: &Self) -> bool {
        self.get(direction) == other.get(direction.opposite())
    }

    /// Edge match that refuses blank edges
    ///
    /// Two facing blank edges match under [`Self::can_connect`] but never form
    /// a link here.
    pub fn can_connect_with_blank(&self, direction: Direction, other: &Self) -> bool {
        !self.is_blank(direction) && self.can_connect(direction, other)
    }
}

impl fmt::Display for Sockets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Up: {}, Right: {}, Down: {}, Left: {}",
            self.get(Direction::Up),
            self.get(Direction::Right),
            self.get(Direction::Down),
            self.get(Direction::Left)
        )
    }
}
