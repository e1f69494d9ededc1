//! Randomized binary space partition of a cluster's bounding box into houses
//!
//! Rectangles are taken from a FIFO work queue. Each one is either kept as a
//! house or cut in two along its longer side, with both halves at least
//! `min_room_size` wide. Once enough splits have happened, small and roughly
//! square rectangles may stop early, but only when a random roll hits the stop
//! sentinel, which keeps the layout irregular.

use std::collections::VecDeque;

use log::warn;

use crate::building::bounds::{MinMax, Rect};
use crate::building::cluster::{BuildCell, Cluster, House};
use crate::io::configuration::{
    DEFAULT_MAX_AREA, DEFAULT_MAX_SIDE_DIFFERENCE, DEFAULT_MIN_HOUSES, DEFAULT_MIN_ROOM_SIZE,
    DEFAULT_SPLIT_CHANCE, STOP_SENTINEL,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::random::RandomSource;

/// House partition parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Smallest side a split may produce
    pub min_room_size: i32,
    /// Splits that must have happened before any rectangle may stop early
    pub min_houses: u32,
    /// Rectangles must have a smaller area than this to stop early
    pub max_area: i32,
    /// Largest width/height difference of a rectangle that stops early
    pub max_side_difference: i32,
    /// Stop roll is drawn from `[0, split_chance)`
    pub split_chance: i32,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            min_houses: DEFAULT_MIN_HOUSES,
            max_area: DEFAULT_MAX_AREA,
            max_side_difference: DEFAULT_MAX_SIDE_DIFFERENCE,
            split_chance: DEFAULT_SPLIT_CHANCE,
        }
    }
}

impl PartitionConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum room size is below 1 or any other
    /// parameter is negative.
    pub fn validate(&self) -> Result<()> {
        if self.min_room_size < 1 {
            return Err(invalid_parameter(
                "min_room_size",
                &self.min_room_size,
                &"must be at least 1",
            ));
        }
        for (parameter, value) in [
            ("max_area", self.max_area),
            ("max_side_difference", self.max_side_difference),
            ("split_chance", self.split_chance),
        ] {
            if value < 0 {
                return Err(invalid_parameter(parameter, &value, &"must not be negative"));
            }
        }
        Ok(())
    }
}

/// Cut a bounding box into non-overlapping rectangles that tile it exactly
///
/// An empty box yields no rectangles, as does a box with a side longer than
/// `i32::MAX` cells. A box too small to split on its limiting side comes back
/// whole.
pub fn partition(
    bounds: &MinMax,
    config: &PartitionConfig,
    random: &mut RandomSource,
) -> Vec<Rect> {
    let Some(canvas) = Rect::from_bounds(bounds) else {
        if !bounds.is_empty() {
            warn!("Bounding box [{bounds}] is too wide to partition");
        }
        return Vec::new();
    };

    let mut queue = VecDeque::from([canvas]);
    let mut houses = Vec::new();
    let mut splits: u32 = 0;

    while let Some(rect) = queue.pop_front() {
        let may_stop = splits > config.min_houses
            && rect.area() < i64::from(config.max_area)
            && (rect.width - rect.height).abs() <= config.max_side_difference;

        if may_stop && random.range(0, config.split_chance) == STOP_SENTINEL {
            houses.push(rect);
            continue;
        }

        match split(rect, config.min_room_size, random) {
            Some((first, second)) => {
                queue.push_back(first);
                queue.push_back(second);
                splits += 2;
            }
            None => houses.push(rect),
        }
    }

    houses
}

/// Split along the longer side, or across the width when square
///
/// The first part gets `side - r` where `r` is drawn from
/// `[min_room_size, side - min_room_size)`, so both parts keep at least
/// `min_room_size`.
fn split(rect: Rect, min_room_size: i32, random: &mut RandomSource) -> Option<(Rect, Rect)> {
    if rect.width < rect.height && can_divide(rect.height, min_room_size) {
        let cut = rect.height - random.range(min_room_size, rect.height - min_room_size);
        return Some((
            Rect::new(rect.x, rect.y, rect.width, cut),
            Rect::new(rect.x, rect.y + cut, rect.width, rect.height - cut),
        ));
    }

    if can_divide(rect.width, min_room_size) {
        let cut = rect.width - random.range(min_room_size, rect.width - min_room_size);
        return Some((
            Rect::new(rect.x, rect.y, cut, rect.height),
            Rect::new(rect.x + cut, rect.y, rect.width - cut, rect.height),
        ));
    }

    None
}

const fn can_divide(side: i32, min_room_size: i32) -> bool {
    side - min_room_size >= min_room_size
}

/// Attach to each rectangle the cells it contains
pub fn assign_cells<'a>(
    rects: Vec<Rect>,
    cells: impl Iterator<Item = &'a BuildCell> + Clone,
) -> Vec<House> {
    rects
        .into_iter()
        .map(|rect| House {
            rect,
            cells: cells
                .clone()
                .filter(|cell| rect.contains(cell.position))
                .copied()
                .collect(),
        })
        .collect()
}

/// Partition a cluster's bounding box and fill in each house's cells
pub fn generate_houses(
    cluster: &Cluster,
    config: &PartitionConfig,
    random: &mut RandomSource,
) -> Vec<House> {
    let rects = partition(cluster.bounds(), config, random);
    assign_cells(rects, cluster.cells())
}
