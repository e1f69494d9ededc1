//! Building lots derived from a solved map
//!
//! Every collapsed tile whose four edges are blank is a lot. A lot covers
//! `resolution × resolution` sub-cells, each one an occupant of the lot. Lots
//! first claim their own sub-cells, then the edge sub-cells of the lot to the
//! right and the lot below touch them, which merges touching lots into one
//! cluster.

use log::debug;

use crate::building::bounds::GridPos;
use crate::building::cluster::{EntityId, OccupantId};
use crate::building::registry::ClusterRegistry;
use crate::io::configuration::MAX_LOT_RESOLUTION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileInstance;

/// Whether a placed tile is free space for building
pub fn is_lot(tile: &TileInstance) -> bool {
    tile.sockets.is_all_blank()
}

/// Entity id of the lot at a map cell
pub const fn lot_entity(grid_cols: usize, row: usize, col: usize) -> EntityId {
    EntityId((row * grid_cols + col) as u64)
}

/// Register every lot of a solved map and replay their contacts
///
/// Lots are registered in row-major order, so cluster ids follow the map
/// layout. Open or contradictory cells are never lots.
///
/// # Errors
///
/// Returns an error if `resolution` is zero or larger than
/// [`MAX_LOT_RESOLUTION`].
pub fn build_lot_clusters(grid: &Grid, resolution: usize) -> Result<ClusterRegistry> {
    if resolution == 0 || resolution > MAX_LOT_RESOLUTION {
        return Err(invalid_parameter(
            "lot_resolution",
            &resolution,
            &format!("must be between 1 and {MAX_LOT_RESOLUTION}"),
        ));
    }

    let lots: Vec<(usize, usize)> = grid
        .iter()
        .filter(|cell| cell.tile().is_some_and(is_lot))
        .map(|cell| (cell.row, cell.col))
        .collect();

    let layout = LotLayout {
        cols: grid.cols(),
        resolution,
    };
    let mut registry = ClusterRegistry::new();

    for &(row, col) in &lots {
        registry.register(layout.entity(row, col), layout.position(row, col, 0, 0));
    }

    for &(row, col) in &lots {
        let observer = layout.entity(row, col);

        for j in 0..resolution {
            for i in 0..resolution {
                registry.contact(
                    observer,
                    layout.occupant(row, col, i, j),
                    observer,
                    layout.position(row, col, i, j),
                )?;
            }
        }

        for direction in [Direction::Right, Direction::Down] {
            let Some((n_row, n_col)) = grid.neighbour(row, col, direction) else {
                continue;
            };
            if !grid.cell(n_row, n_col).tile().is_some_and(is_lot) {
                continue;
            }

            let owner = layout.entity(n_row, n_col);
            for k in 0..resolution {
                let (i, j) = match direction {
                    Direction::Right => (0, k),
                    _ => (k, 0),
                };
                registry.contact(
                    observer,
                    layout.occupant(n_row, n_col, i, j),
                    owner,
                    layout.position(n_row, n_col, i, j),
                )?;
            }
        }
    }

    debug!(
        "Derived {} clusters from {} lots at resolution {resolution}",
        registry.len(),
        lots.len()
    );
    Ok(registry)
}

struct LotLayout {
    cols: usize,
    resolution: usize,
}

impl LotLayout {
    const fn entity(&self, row: usize, col: usize) -> EntityId {
        lot_entity(self.cols, row, col)
    }

    const fn occupant(&self, row: usize, col: usize, i: usize, j: usize) -> OccupantId {
        let base = (row * self.cols + col) * self.resolution * self.resolution;
        OccupantId((base + j * self.resolution + i) as u64)
    }

    const fn position(&self, row: usize, col: usize, i: usize, j: usize) -> GridPos {
        GridPos::new(
            (col * self.resolution + i) as i32,
            (row * self.resolution + j) as i32,
        )
    }
}
