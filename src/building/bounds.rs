//! Grid positions, growing bounding boxes and house rectangles
//!
//! All three share the lot sub-cell coordinate space. A [`MinMax`] is
//! inclusive on both ends; a [`Rect`] is half-open, so a box of one cell has
//! width 1.

use std::fmt;

/// Integer position in lot sub-cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl GridPos {
    /// Create a position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inclusive bounding box that only ever grows
///
/// Starts as an empty sentinel with min at `i32::MAX` and max at `i32::MIN`,
/// so the first point folded in becomes the whole box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinMax {
    /// Smallest x seen
    pub min_x: i32,
    /// Smallest y seen
    pub min_y: i32,
    /// Largest x seen
    pub max_x: i32,
    /// Largest y seen
    pub max_y: i32,
}

impl Default for MinMax {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl MinMax {
    /// The empty sentinel
    pub const EMPTY: Self = Self {
        min_x: i32::MAX,
        min_y: i32::MAX,
        max_x: i32::MIN,
        max_y: i32::MIN,
    };

    /// A box holding exactly one point
    pub const fn from_point(pos: GridPos) -> Self {
        Self {
            min_x: pos.x,
            min_y: pos.y,
            max_x: pos.x,
            max_y: pos.y,
        }
    }

    /// Whether nothing has been folded in yet
    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow to include a point
    pub fn include_point(&mut self, pos: GridPos) {
        self.min_x = self.min_x.min(pos.x);
        self.min_y = self.min_y.min(pos.y);
        self.max_x = self.max_x.max(pos.x);
        self.max_y = self.max_y.max(pos.y);
    }

    /// Grow to include another box; an empty box changes nothing
    pub fn include(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Whether a point lies inside, bounds included
    pub const fn contains_point(&self, pos: GridPos) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }

    /// Whether `other` lies entirely inside; the empty box is inside everything
    pub const fn contains(&self, other: &Self) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.max_x <= self.max_x
                && other.min_y >= self.min_y
                && other.max_y <= self.max_y)
    }

    /// Cell count across, zero when empty
    ///
    /// Widened to `i64`: a box spanning the whole `i32` range holds
    /// 2<sup>32</sup> cells.
    pub const fn width(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.max_x as i64 - self.min_x as i64 + 1
        }
    }

    /// Cell count down, zero when empty
    pub const fn height(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.max_y as i64 - self.min_y as i64 + 1
        }
    }
}

impl fmt::Display for MinMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        write!(
            f,
            "min: {}, {} max: {}, {}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Half-open integer rectangle `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Cells across
    pub width: i32,
    /// Cells down
    pub height: i32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering an inclusive bounding box
    ///
    /// `None` when the box is empty or a side exceeds `i32::MAX` cells.
    pub const fn from_bounds(bounds: &MinMax) -> Option<Self> {
        let (width, height) = (bounds.width(), bounds.height());
        if bounds.is_empty() || width > i32::MAX as i64 || height > i32::MAX as i64 {
            return None;
        }
        Some(Self::new(
            bounds.min_x,
            bounds.min_y,
            width as i32,
            height as i32,
        ))
    }

    /// Covered cell count
    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// One past the right edge
    const fn end_x(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// One past the bottom edge
    const fn end_y(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether a cell lies inside
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= self.x
            && (pos.x as i64) < self.end_x()
            && pos.y >= self.y
            && (pos.y as i64) < self.end_y()
    }

    /// Whether the two rectangles share at least one cell
    pub const fn overlaps(&self, other: &Self) -> bool {
        (self.x as i64) < other.end_x()
            && (other.x as i64) < self.end_x()
            && (self.y as i64) < other.end_y()
            && (other.y as i64) < self.end_y()
    }
}
