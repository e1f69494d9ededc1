use crate::{
    algorithm::bitset::TileBitset, math::random::RandomSource, spatial::grid::Grid,
    spatial::tiles::TileRegistry,
};

/// Outcome of scanning the grid for the next cell to collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSelection {
    /// Open cell with the fewest remaining candidates
    Candidate {
        /// Row of the selected cell
        row: usize,
        /// Column of the selected cell
        col: usize,
    },
    /// The most constrained open cell has no candidates left
    Contradiction {
        /// Row of the dead cell
        row: usize,
        /// Column of the dead cell
        col: usize,
    },
    /// Every cell is collapsed
    Exhausted,
}

/// Find the open cell with the fewest remaining candidates
///
/// Scans row-major and only replaces the current pick on a strictly smaller
/// count, so ties go to the first cell found.
pub fn select_least_constrained(grid: &Grid) -> CellSelection {
    let mut best: Option<(usize, usize, usize)> = None;

    for cell in grid.iter() {
        let Some(possibilities) = cell.possibilities() else {
            continue;
        };
        let count = possibilities.count();
        if best.is_none_or(|(_, _, best_count)| count < best_count) {
            best = Some((cell.row, cell.col, count));
            // Nothing can beat an empty set
            if count == 0 {
                break;
            }
        }
    }

    match best {
        None => CellSelection::Exhausted,
        Some((row, col, 0)) => CellSelection::Contradiction { row, col },
        Some((row, col, _)) => CellSelection::Candidate { row, col },
    }
}

/// Draw one candidate variant, weighted by spawn weight
///
/// A single candidate is returned without touching the random source.
pub fn choose_variant(
    possibilities: &TileBitset,
    registry: &TileRegistry,
    random: &mut RandomSource,
) -> Option<usize> {
    let candidates = possibilities.to_vec();
    if candidates.len() <= 1 {
        return candidates.first().copied();
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&variant| registry.variant(variant).map_or(0.0, |v| v.weight))
        .collect();

    random
        .weighted_choice(&weights)
        .and_then(|index| candidates.get(index).copied())
}
