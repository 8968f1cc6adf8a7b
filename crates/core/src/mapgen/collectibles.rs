//! Treasure chests and pickups on the platforms left free by ladders and doors.

use log::debug;

use crate::content::get_collectible_stats;
use crate::random::RandomSource;
use crate::types::CollectibleKind;

use super::floors::FloorLayout;
use super::ladders::DoorPosition;
use super::model::{ChestPlacement, CollectiblePlacement};

pub const COLLECTIBLES_PER_FLOOR: (usize, usize) = (2, 3);
/// Bonus floors fill every `BONUS_SPACING`th free column.
pub const BONUS_SPACING: usize = 2;

/// Occupancy facts for one floor at the time items are placed on it.
pub struct FloorItemContext<'a> {
    pub layout: &'a FloorLayout,
    pub ladder_columns: &'a [usize],
    pub door: Option<&'a DoorPosition>,
    pub taken: &'a [usize],
}

impl FloorItemContext<'_> {
    pub fn is_free(&self, column: usize) -> bool {
        self.layout.has_platform_at(column)
            && !self.ladder_columns.contains(&column)
            && !self
                .door
                .is_some_and(|door| door.floor == self.layout.index && door.excludes(column))
            && !self.taken.contains(&column)
    }

    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.layout.width).filter(|&column| self.is_free(column)).collect()
    }
}

/// One chest somewhere in `floors`, or `None` when no floor has room.
pub fn place_chest(
    floors: &[FloorItemContext<'_>],
    rng: &mut dyn RandomSource,
) -> Option<ChestPlacement> {
    let mut order: Vec<usize> = (0..floors.len()).collect();
    rng.shuffle(&mut order);
    for index in order {
        let context = &floors[index];
        let free = context.free_columns();
        if let Some(pick) = rng.pick_index(free.len()) {
            return Some(ChestPlacement { floor: context.layout.index, column: free[pick] });
        }
    }
    debug!("no free column for a treasure chest on {} floors", floors.len());
    None
}

/// One chest on this floor, if any column is free.
pub fn place_floor_chest(
    context: &FloorItemContext<'_>,
    rng: &mut dyn RandomSource,
) -> Option<ChestPlacement> {
    let free = context.free_columns();
    let Some(pick) = rng.pick_index(free.len()) else {
        debug!("floor {}: no free column for a bonus chest", context.layout.index);
        return None;
    };
    Some(ChestPlacement { floor: context.layout.index, column: free[pick] })
}

pub fn place_collectibles(
    context: &FloorItemContext<'_>,
    kinds: &[CollectibleKind],
    is_bonus_level: bool,
    rng: &mut dyn RandomSource,
) -> Vec<CollectiblePlacement> {
    if kinds.is_empty() {
        return Vec::new();
    }
    let mut free = context.free_columns();

    let columns: Vec<usize> = if is_bonus_level {
        free.into_iter().step_by(BONUS_SPACING).collect()
    } else {
        let (min, max) = COLLECTIBLES_PER_FLOOR;
        let wanted = rng.range_inclusive(min, max);
        let mut picked = Vec::with_capacity(wanted);
        while picked.len() < wanted {
            let Some(index) = rng.pick_index(free.len()) else {
                debug!(
                    "floor {}: room for only {} of {wanted} collectibles",
                    context.layout.index,
                    picked.len()
                );
                break;
            };
            picked.push(free.swap_remove(index));
        }
        picked.sort_unstable();
        picked
    };

    let weights: Vec<f64> =
        kinds.iter().map(|&kind| get_collectible_stats(kind).spawn_weight).collect();
    columns
        .into_iter()
        .filter_map(|column| {
            let kind = kinds[rng.weighted_index(&weights)?];
            Some(CollectiblePlacement { kind, floor: context.layout.index, column })
        })
        .collect()
}
