//! Cluster registry driven by registration and contact events
//!
//! Every root entity starts in its own cluster. When an occupant of one
//! cluster touches an entity of another, the two clusters merge: the
//! observer's cluster absorbs the other, the absorbed id is retired, and every
//! entity pointing at it is rewritten on the spot. Lookups by entity or by a
//! retired id are single map reads afterwards.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

use crate::building::bounds::{GridPos, MinMax};
use crate::building::cluster::{BuildCell, Cluster, ClusterId, EntityId, OccupantId};
use crate::building::partition::{PartitionConfig, generate_houses};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::math::random::RandomSource;

/// What a contact event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The observer's cluster already held the occupant
    AlreadyPresent,
    /// The clusters merged and the occupant arrived with the absorbed cluster
    Merged,
    /// The occupant was added as a new cell
    Added,
}

/// Snapshot of one cluster for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSummary {
    /// Live id
    pub id: ClusterId,
    /// Bounding box
    pub bounds: MinMax,
    /// Number of cells
    pub cells: usize,
    /// Number of houses, zero before partitioning
    pub houses: usize,
}

impl fmt::Display for ClusterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cluster {} [{}] cells: {} houses: {}",
            self.id, self.bounds, self.cells, self.houses
        )
    }
}

/// Owner of all live clusters and of the entity to cluster mapping
#[derive(Debug, Clone, Default)]
pub struct ClusterRegistry {
    clusters: BTreeMap<ClusterId, Cluster>,
    membership: BTreeMap<EntityId, ClusterId>,
    retired: HashMap<ClusterId, ClusterId>,
    next_id: u32,
}

impl ClusterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a root entity its own cluster seeded with its position
    ///
    /// Registering an entity twice returns its existing cluster.
    pub fn register(&mut self, entity: EntityId, position: GridPos) -> ClusterId {
        if let Some(&existing) = self.membership.get(&entity) {
            return existing;
        }

        let id = ClusterId(self.next_id);
        self.next_id += 1;

        let mut cluster = Cluster::new(id);
        cluster.include_point(position);
        self.clusters.insert(id, cluster);
        self.membership.insert(entity, id);
        id
    }

    /// Make `entity` share the cluster of an already registered `root`
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is unknown or `entity` is already registered.
    pub fn attach(&mut self, entity: EntityId, root: EntityId) -> Result<ClusterId> {
        let id = self.cluster_of(root)?;
        if self.membership.contains_key(&entity) {
            return Err(invalid_parameter(
                "entity",
                &entity.0,
                &"already belongs to a cluster",
            ));
        }
        self.membership.insert(entity, id);
        Ok(id)
    }

    /// Canonical cluster of an entity
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the entity was never registered or attached.
    pub fn cluster_of(&self, entity: EntityId) -> Result<ClusterId> {
        self.membership
            .get(&entity)
            .copied()
            .ok_or(GenerationError::UnknownEntity { entity: entity.0 })
    }

    /// Map any id ever handed out to its live cluster id
    pub fn resolve(&self, id: ClusterId) -> Option<ClusterId> {
        if self.clusters.contains_key(&id) {
            return Some(id);
        }
        self.retired.get(&id).copied()
    }

    /// Cluster by id, following retired ids to their survivor
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.resolve(id).and_then(|live| self.clusters.get(&live))
    }

    /// Live clusters ordered by id
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.clusters.values()
    }

    /// Number of live clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether no cluster exists
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Per-cluster summaries ordered by id
    pub fn summaries(&self) -> Vec<ClusterSummary> {
        self.clusters
            .values()
            .map(|cluster| ClusterSummary {
                id: cluster.id(),
                bounds: *cluster.bounds(),
                cells: cluster.len(),
                houses: cluster.houses().len(),
            })
            .collect()
    }

    /// Handle an occupant of `owner` touching `observer`
    ///
    /// Merges the two entities' clusters if they differ, then adds the
    /// occupant to the observer's cluster unless it is already there. A newly
    /// added occupant always grows the bounding box.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if either entity is unregistered.
    pub fn contact(
        &mut self,
        observer: EntityId,
        occupant: OccupantId,
        owner: EntityId,
        position: GridPos,
    ) -> Result<ContactOutcome> {
        let observer_cluster = self.cluster_of(observer)?;
        if self.live(observer_cluster).is_some_and(|c| c.contains(occupant)) {
            return Ok(ContactOutcome::AlreadyPresent);
        }

        let owner_cluster = self.cluster_of(owner)?;
        if owner_cluster != observer_cluster {
            self.merge_clusters(observer_cluster, owner_cluster);
            if self.live(observer_cluster).is_some_and(|c| c.contains(occupant)) {
                return Ok(ContactOutcome::Merged);
            }
        }

        if let Some(cluster) = self.clusters.get_mut(&observer_cluster) {
            cluster.add(
                occupant,
                BuildCell {
                    position,
                    occupant,
                    owner,
                },
            );
            cluster.include_point(position);
        }
        Ok(ContactOutcome::Added)
    }

    /// Merge the cluster of `b` into the cluster of `a`
    ///
    /// Returns the surviving id. Merging an entity's cluster with itself
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if either entity is unregistered.
    pub fn merge(&mut self, a: EntityId, b: EntityId) -> Result<ClusterId> {
        let keep = self.cluster_of(a)?;
        let absorb = self.cluster_of(b)?;
        self.merge_clusters(keep, absorb);
        Ok(keep)
    }

    /// Partition every live cluster into houses, in cluster id order
    ///
    /// Returns the total number of houses.
    ///
    /// # Errors
    ///
    /// Returns an error if the partition configuration is invalid.
    pub fn generate_houses(
        &mut self,
        config: &PartitionConfig,
        random: &mut RandomSource,
    ) -> Result<usize> {
        config.validate()?;

        let mut total = 0;
        for cluster in self.clusters.values_mut() {
            let houses = generate_houses(cluster, config, random);
            total += houses.len();
            cluster.set_houses(houses);
        }
        Ok(total)
    }

    fn live(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    fn merge_clusters(&mut self, keep: ClusterId, absorb: ClusterId) {
        if keep == absorb {
            return;
        }
        let Some(absorbed) = self.clusters.remove(&absorb) else {
            return;
        };
        let Some(survivor) = self.clusters.get_mut(&keep) else {
            self.clusters.insert(absorb, absorbed);
            return;
        };

        let moved = absorbed.len();
        survivor.absorb(absorbed);

        for id in self.membership.values_mut() {
            if *id == absorb {
                *id = keep;
            }
        }
        for id in self.retired.values_mut() {
            if *id == absorb {
                *id = keep;
            }
        }
        self.retired.insert(absorb, keep);

        debug!("Cluster {absorb} merged into {keep} ({moved} cells moved)");
    }
}
