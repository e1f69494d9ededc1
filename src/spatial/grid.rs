//! Rectangular grid of tile cells with bounds-checked neighbour lookup
//!
//! Cells are addressed by `(row, column)`. Row 0 is the top edge, so
//! [`Direction::Up`] decreases the row. A cell is either open, holding the
//! variants it may still become, or collapsed to a single tile.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::TileInstance;

/// Collapse state of a single cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellState {
    /// Still undecided; an empty set means the cell hit a contradiction
    Open(TileBitset),
    /// Committed to one tile
    Collapsed(TileInstance),
}

/// One addressable cell
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Row index (the y coordinate)
    pub row: usize,
    /// Column index (the x coordinate)
    pub col: usize,
    /// Open candidates or the placed tile
    pub state: CellState,
}

impl GridCell {
    /// Whether a tile has been placed
    pub const fn is_collapsed(&self) -> bool {
        matches!(self.state, CellState::Collapsed(_))
    }

    /// The placed tile, if any
    pub const fn tile(&self) -> Option<&TileInstance> {
        match &self.state {
            CellState::Collapsed(tile) => Some(tile),
            CellState::Open(_) => None,
        }
    }

    /// Mutable access to the placed tile
    pub fn tile_mut(&mut self) -> Option<&mut TileInstance> {
        match &mut self.state {
            CellState::Collapsed(tile) => Some(tile),
            CellState::Open(_) => None,
        }
    }

    /// Remaining candidates of an open cell
    pub const fn possibilities(&self) -> Option<&TileBitset> {
        match &self.state {
            CellState::Open(possibilities) => Some(possibilities),
            CellState::Collapsed(_) => None,
        }
    }

    /// Remaining candidate count; zero once collapsed
    pub fn possibility_count(&self) -> usize {
        self.possibilities().map_or(0, TileBitset::count)
    }

    /// Open with nothing left to choose from
    pub fn is_contradiction(&self) -> bool {
        self.possibilities().is_some_and(TileBitset::is_empty)
    }

    /// Place a tile, discarding any remaining candidates
    pub fn collapse(&mut self, tile: TileInstance) {
        self.state = CellState::Collapsed(tile);
    }
}

/// The tile map being solved
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<GridCell>,
}

impl Grid {
    /// Create a grid with every cell open to every variant
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the maximum
    /// grid dimension.
    pub fn new(rows: usize, cols: usize, variant_count: usize) -> Result<Self> {
        for (parameter, value) in [("rows", rows), ("columns", cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| GridCell {
            row,
            col,
            state: CellState::Open(TileBitset::all(variant_count)),
        });

        Ok(Self { cells })
    }

    /// Create a square grid
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn square(columns: usize, variant_count: usize) -> Result<Self> {
        Self::new(columns, columns, variant_count)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Total cell count
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells (never true for a constructed grid)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell lookup that tolerates out-of-range positions
    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get((row, col))
    }

    /// Mutable cell lookup that tolerates out-of-range positions
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut GridCell> {
        self.cells.get_mut((row, col))
    }

    /// Cell lookup for positions the caller has already bounds-checked
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid.
    #[allow(clippy::panic)]
    pub fn cell(&self, row: usize, col: usize) -> &GridCell {
        let (rows, cols) = (self.rows(), self.cols());
        self.cells
            .get((row, col))
            .unwrap_or_else(|| panic!("cell ({row}, {col}) outside {rows}x{cols} grid"))
    }

    /// Mutable lookup for positions the caller has already bounds-checked
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid.
    #[allow(clippy::panic)]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut GridCell {
        let (rows, cols) = (self.rows(), self.cols());
        self.cells
            .get_mut((row, col))
            .unwrap_or_else(|| panic!("cell ({row}, {col}) outside {rows}x{cols} grid"))
    }

    /// Position one step away in `direction`, if it is inside the grid
    pub fn neighbour(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let (d_row, d_col) = direction.offset();
        let next_row = row.checked_add_signed(d_row)?;
        let next_col = col.checked_add_signed(d_col)?;
        (next_row < self.rows() && next_col < self.cols()).then_some((next_row, next_col))
    }

    /// In-bounds neighbours of a position, in socket order
    pub fn neighbours(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (Direction, (usize, usize))> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| {
                self.neighbour(row, col, direction)
                    .map(|position| (direction, position))
            })
    }

    /// Row-major iteration over all cells
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.iter()
    }

    /// Row-major mutable iteration over all cells
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GridCell> + '_ {
        self.cells.iter_mut()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Positions of open cells with no candidates left
    pub fn contradictions(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|cell| cell.is_contradiction())
            .map(|cell| (cell.row, cell.col))
            .collect()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.iter().all(GridCell::is_collapsed)
    }
}
