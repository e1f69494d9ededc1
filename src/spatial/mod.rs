//! Spatial data structures for the tile map
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and neighbour offsets
//! - Socket strings and the edge connection tests
//! - Tile definitions, rotation variants and the validated registry
//! - The bounds-checked cell grid

/// Cardinal directions in socket order
pub mod direction;
/// Grid of open and collapsed cells
pub mod grid;
/// Edge socket strings and connection tests
pub mod sockets;
/// Tile definitions, rotations and the registry
pub mod tiles;

pub use direction::Direction;
pub use grid::{CellState, Grid, GridCell};
pub use sockets::Sockets;
pub use tiles::{TileDefinition, TileInstance, TileRegistry, TileVariant};
