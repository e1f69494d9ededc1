use crate::{
    algorithm::bitset::TileBitset,
    spatial::direction::Direction,
    spatial::grid::{CellState, Grid},
    spatial::tiles::TileRegistry,
};

/// Result of constraining the neighbours of one collapsed cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Candidates removed across all neighbours
    pub removed: usize,
    /// Neighbours left with no candidates
    pub contradictions: Vec<(usize, usize)>,
}

/// Remove neighbour candidates that don't fit the tile placed at `(row, col)`
///
/// Each open 4-neighbour keeps only the variants whose facing socket equals
/// the placed tile's socket on the shared edge. Only direct neighbours are
/// touched. Does nothing if the cell is not collapsed.
///
/// # Panics
///
/// Panics if `(row, col)` is outside the grid.
pub fn propagate_from(
    grid: &mut Grid,
    registry: &TileRegistry,
    row: usize,
    col: usize,
) -> PropagationReport {
    let mut report = PropagationReport::default();

    let Some(placed) = grid.cell(row, col).tile().map(|tile| tile.variant) else {
        return report;
    };

    let neighbours: Vec<_> = grid.neighbours(row, col).collect();
    for (direction, (n_row, n_col)) in neighbours {
        let CellState::Open(possibilities) = &mut grid.cell_mut(n_row, n_col).state else {
            continue;
        };

        let allowed = compatible_variants(registry, placed, direction);
        report.removed += possibilities.retain(|candidate| allowed.contains(candidate));

        if possibilities.is_empty() {
            report.contradictions.push((n_row, n_col));
        }
    }

    report
}

/// Variants that may sit on the `direction` side of `placed`
pub fn compatible_variants(
    registry: &TileRegistry,
    placed: usize,
    direction: Direction,
) -> TileBitset {
    let mut allowed = TileBitset::new(registry.variant_count());
    for candidate in 0..registry.variant_count() {
        if registry.can_connect(placed, direction, candidate) {
            allowed.insert(candidate);
        }
    }
    allowed
}
