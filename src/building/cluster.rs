use std::collections::BTreeMap;
use std::fmt;

use crate::building::bounds::{GridPos, MinMax, Rect};

/// Stable identity of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub u32);

/// A host object that owns occupants and belongs to one cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// One touchable volume of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccupantId(pub u64);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grid position claimed by an occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildCell {
    /// Where the occupant sits
    pub position: GridPos,
    /// The occupant itself
    pub occupant: OccupantId,
    /// Entity the occupant belongs to
    pub owner: EntityId,
}

/// A finished house and the cells it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    /// Footprint
    pub rect: Rect,
    /// Cells of the owning cluster inside the footprint
    pub cells: Vec<BuildCell>,
}

/// Group of touching cells sharing one bounding box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    id: ClusterId,
    cells: BTreeMap<OccupantId, BuildCell>,
    bounds: MinMax,
    houses: Vec<House>,
}

impl Cluster {
    /// Create an empty cluster
    pub fn new(id: ClusterId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
            bounds: MinMax::EMPTY,
            houses: Vec::new(),
        }
    }

    /// Identity
    pub const fn id(&self) -> ClusterId {
        self.id
    }

    /// Whether an occupant is already part of the cluster
    pub fn contains(&self, occupant: OccupantId) -> bool {
        self.cells.contains_key(&occupant)
    }

    /// Insert a cell; the first cell stored for an occupant wins
    ///
    /// Returns false, leaving the cluster unchanged, if the occupant was
    /// already present.
    pub fn add(&mut self, occupant: OccupantId, cell: BuildCell) -> bool {
        if self.cells.contains_key(&occupant) {
            return false;
        }
        self.cells.insert(occupant, cell);
        true
    }

    /// Cells ordered by occupant id
    pub fn cells(&self) -> impl Iterator<Item = &BuildCell> + Clone + '_ {
        self.cells.values()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been added
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current bounding box
    pub const fn bounds(&self) -> &MinMax {
        &self.bounds
    }

    /// Grow the bounding box to include a point
    pub fn include_point(&mut self, pos: GridPos) {
        self.bounds.include_point(pos);
    }

    /// Take over every cell and the bounds of another cluster
    ///
    /// Occupants already present keep their existing cell.
    pub fn absorb(&mut self, other: Self) {
        for (occupant, cell) in other.cells {
            self.cells.entry(occupant).or_insert(cell);
        }
        self.bounds.include(&other.bounds);
    }

    /// Houses from the last partition, empty until then
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// Replace the house list
    pub fn set_houses(&mut self, houses: Vec<House>) {
        self.houses = houses;
    }
}
