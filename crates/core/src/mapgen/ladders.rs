//! Ladder placement between adjacent floors.

use log::debug;
use serde::Serialize;

use crate::random::RandomSource;
use crate::settings::GeneratorSettings;

use super::floors::FloorLayout;
use super::grid::{FloorSection, near_any, within_radius};

/// Ladder columns connecting `floor` to `floor + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LadderRecord {
    pub floor: usize,
    pub columns: Vec<usize>,
}

impl LadderRecord {
    pub fn top_floor(&self) -> usize {
        self.floor + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DoorPosition {
    pub floor: usize,
    pub column: usize,
    pub exclusion_radius: usize,
}

impl DoorPosition {
    pub fn excludes(&self, column: usize) -> bool {
        within_radius(column, self.column, self.exclusion_radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderRules {
    pub anti_stack_radius: usize,
    pub ground_separation: usize,
    pub ground_min_separation: usize,
}

impl LadderRules {
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self {
            anti_stack_radius: settings.anti_stack_radius,
            ground_separation: settings.ground_ladder_separation,
            ground_min_separation: settings.ground_ladder_min_separation,
        }
    }
}

impl Default for LadderRules {
    fn default() -> Self {
        Self::from_settings(&GeneratorSettings::default())
    }
}

pub struct LadderRequest<'a> {
    pub floor_index: usize,
    pub below: &'a FloorLayout,
    pub above: &'a FloorLayout,
    pub doors: &'a [DoorPosition],
    pub door_floor: Option<usize>,
    /// Ladders arriving at `below` from the floor under it.
    pub previous: Option<&'a LadderRecord>,
}

/// Ladder columns that reach `floor` from below or leave it upwards.
pub fn columns_touching(ladders: &[LadderRecord], floor: usize) -> Vec<usize> {
    let mut columns: Vec<usize> = ladders
        .iter()
        .filter(|record| record.floor == floor || record.top_floor() == floor)
        .flat_map(|record| record.columns.iter().copied())
        .collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

/// Columns solid on both floors and clear of every door on either of them.
pub fn valid_ladder_columns(
    below: &FloorLayout,
    above: &FloorLayout,
    doors: &[DoorPosition],
) -> Vec<usize> {
    let relevant_doors: Vec<&DoorPosition> = doors
        .iter()
        .filter(|door| door.floor == below.index || door.floor == above.index)
        .collect();
    below
        .platform_columns()
        .filter(|&column| above.has_platform_at(column))
        .filter(|&column| !relevant_doors.iter().any(|door| door.excludes(column)))
        .collect()
}

pub fn plan_ladders(
    request: &LadderRequest<'_>,
    rules: &LadderRules,
    rng: &mut dyn RandomSource,
) -> LadderRecord {
    let floor = request.floor_index;
    if request.door_floor.is_some_and(|door_floor| floor >= door_floor) {
        return LadderRecord { floor, columns: Vec::new() };
    }

    let valid = valid_ladder_columns(request.below, request.above, request.doors);
    if valid.is_empty() {
        debug!("no valid ladder column between floors {floor} and {}", floor + 1);
        return LadderRecord { floor, columns: Vec::new() };
    }

    let columns = if floor == 0 {
        plan_ground_ladders(&valid, rules, rng)
    } else {
        let below_columns = request.previous.map_or(&[][..], |record| record.columns.as_slice());
        vec![plan_upper_ladder(&valid, below_columns, request.below, rules, rng)]
    };
    LadderRecord { floor, columns }
}

fn plan_ground_ladders(
    valid: &[usize],
    rules: &LadderRules,
    rng: &mut dyn RandomSource,
) -> Vec<usize> {
    if valid.len() == 1 {
        return vec![valid[0]];
    }

    let mut spread_pairs = Vec::new();
    for (i, &left) in valid.iter().enumerate() {
        for &right in &valid[i + 1..] {
            if right - left >= rules.ground_separation {
                spread_pairs.push((left, right));
            }
        }
    }
    if let Some(index) = rng.pick_index(spread_pairs.len()) {
        let (left, right) = spread_pairs[index];
        return vec![left, right];
    }

    let (first, last) = (valid[0], valid[valid.len() - 1]);
    if last - first >= rules.ground_min_separation {
        return vec![first, last];
    }
    let index = rng.pick_index(valid.len()).unwrap_or(0);
    vec![valid[index]]
}

/// One ladder, preferring columns away from the ladder below and in another third.
fn plan_upper_ladder(
    valid: &[usize],
    below_columns: &[usize],
    below: &FloorLayout,
    rules: &LadderRules,
    rng: &mut dyn RandomSource,
) -> usize {
    let used_sections: Vec<FloorSection> =
        below_columns.iter().map(|&column| FloorSection::of(column, below.width)).collect();
    let fresh_anchors: Vec<usize> = FloorSection::ALL
        .into_iter()
        .filter(|section| !used_sections.contains(section))
        .flat_map(|section| below.anchor_columns_in(section))
        .collect();
    let unstacked: Vec<usize> = valid
        .iter()
        .copied()
        .filter(|&column| !near_any(column, below_columns, rules.anti_stack_radius))
        .collect();
    let fresh_section: Vec<usize> =
        unstacked.iter().copied().filter(|column| fresh_anchors.contains(column)).collect();

    let pool = [fresh_section.as_slice(), unstacked.as_slice(), valid]
        .into_iter()
        .find(|pool| !pool.is_empty())
        .unwrap_or(valid);
    let index = rng.pick_index(pool.len()).unwrap_or(0);
    pool[index]
}
