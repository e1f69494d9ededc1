//! Cluster merging and house partitioning
//!
//! Lots found on a solved map become entities. Touching entities merge into
//! clusters with a shared bounding box, and each cluster's box is cut into
//! houses.

/// Sentinel bounding boxes, positions and rectangles
pub mod bounds;
/// Clusters, build cells and houses
pub mod cluster;
/// Lot entities and contacts derived from a solved map
pub mod lots;
/// Randomized binary space partition into houses
pub mod partition;
/// Cluster registry with merge and id remapping
pub mod registry;

pub use bounds::{GridPos, MinMax, Rect};
pub use cluster::{BuildCell, Cluster, ClusterId, EntityId, House, OccupantId};
pub use lots::build_lot_clusters;
pub use partition::PartitionConfig;
pub use registry::{ClusterRegistry, ClusterSummary, ContactOutcome};
