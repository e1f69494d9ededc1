//! Socket-matching tile collapse map generator with cluster-based house partitioning
//!
//! A tile catalog describes square tiles by the symbols along their four edges.
//! The solver fills a grid so that every pair of touching edges matches, one
//! least-constrained cell at a time. Blank tiles on the finished map become
//! building lots; touching lots merge into clusters, and each cluster's
//! bounding box is cut into houses by a randomized binary space partition.

#![forbid(unsafe_code)]

/// Tile collapse solver: possibility sets, selection, propagation and the run loop
pub mod algorithm;
/// Lot clusters, bounding boxes and house partitioning
pub mod building;
/// Input/output operations, configuration and error handling
pub mod io;
/// Seeded random source shared by every stage
pub mod math;
/// Directions, sockets, tiles and the cell grid
pub mod spatial;

pub use io::error::{GenerationError, Result};
