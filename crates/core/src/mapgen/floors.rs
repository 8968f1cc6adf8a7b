//! Per-floor platform layout: where the gap is and which columns are solid.

use std::ops::Range;

use serde::Serialize;

use crate::random::RandomSource;

use super::grid::FloorSection;

pub const GAP_MIN_START: usize = 2;
/// Distance from the right wall to the last column a gap may start in.
pub const GAP_END_MARGIN: usize = 5;
pub const GAP_SIZES: [usize; 2] = [2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FloorGap {
    pub start: usize,
    pub size: usize,
}

impl FloorGap {
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn columns(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.columns().contains(&column)
    }
}

/// Created once per floor and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FloorLayout {
    pub index: usize,
    pub width: usize,
    pub gap: Option<FloorGap>,
}

impl FloorLayout {
    pub fn solid(index: usize, width: usize) -> Self {
        Self { index, width, gap: None }
    }

    pub fn with_gap(index: usize, width: usize, gap: FloorGap) -> Self {
        Self { index, width, gap: Some(gap) }
    }

    /// Gap start column, or -1 when the floor is whole.
    pub fn gap_start(&self) -> i32 {
        self.gap.map_or(-1, |gap| gap.start as i32)
    }

    pub fn gap_size(&self) -> usize {
        self.gap.map_or(0, |gap| gap.size)
    }

    pub fn has_platform_at(&self, column: usize) -> bool {
        column < self.width && !self.gap.is_some_and(|gap| gap.contains(column))
    }

    pub fn platform_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(|&column| self.has_platform_at(column))
    }

    /// Spike columns; exactly the gap.
    pub fn hazard_columns(&self) -> Range<usize> {
        self.gap.map_or(0..0, |gap| gap.columns())
    }

    /// Contiguous solid stretches either side of the gap.
    pub fn solid_ranges(&self) -> Vec<Range<usize>> {
        match self.gap {
            None => vec![0..self.width],
            Some(gap) => [0..gap.start, gap.end()..self.width]
                .into_iter()
                .filter(|range| !range.is_empty())
                .collect(),
        }
    }

    /// Columns a ladder can stand on, grouped by floor third.
    pub fn anchor_columns_in(&self, section: FloorSection) -> Vec<usize> {
        self.solid_ranges()
            .into_iter()
            .flatten()
            .filter(|&column| FloorSection::of(column, self.width) == section)
            .collect()
    }
}

pub fn build_floor(
    floor_index: usize,
    width: usize,
    is_bonus_level: bool,
    gap_chance: f64,
    rng: &mut dyn RandomSource,
) -> FloorLayout {
    if floor_index == 0 || is_bonus_level || width < GAP_MIN_START + GAP_END_MARGIN {
        return FloorLayout::solid(floor_index, width);
    }
    if !rng.chance(gap_chance) {
        return FloorLayout::solid(floor_index, width);
    }

    let start = rng.range_inclusive(GAP_MIN_START, width - GAP_END_MARGIN);
    let size = GAP_SIZES[rng.range_inclusive(0, GAP_SIZES.len() - 1)];
    FloorLayout::with_gap(floor_index, width, FloorGap { start, size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn ground_floor_is_always_whole() {
        let mut rng = ScriptedRandom::constant(0.0);
        let floor = build_floor(0, 24, false, 1.0, &mut rng);
        assert_eq!(floor.gap, None);
        assert_eq!(floor.gap_start(), -1);
        assert_eq!(floor.gap_size(), 0);
        assert_eq!(floor.platform_columns().count(), 24);
    }

    #[test]
    fn bonus_floors_never_have_gaps() {
        let mut rng = ScriptedRandom::constant(0.0);
        for index in 1..5 {
            assert_eq!(build_floor(index, 24, true, 1.0, &mut rng).gap, None);
        }
    }

    #[test]
    fn scripted_rolls_place_gap_at_lowest_start_with_smallest_size() {
        let mut rng = ScriptedRandom::constant(0.0);
        let floor = build_floor(3, 24, false, 0.7, &mut rng);
        assert_eq!(floor.gap, Some(FloorGap { start: 2, size: 2 }));
        assert_eq!(floor.hazard_columns(), 2..4);
        assert!(!floor.has_platform_at(2));
        assert!(floor.has_platform_at(4));
    }

    #[test]
    fn failed_gap_roll_leaves_floor_whole() {
        let mut rng = ScriptedRandom::constant(0.9);
        assert_eq!(build_floor(3, 24, false, 0.7, &mut rng).gap, None);
    }

    #[test]
    fn gaps_stay_inside_the_floor() {
        let mut rng = SeededRandom::new(99);
        for width in [24, 32, 40] {
            for index in 1..200 {
                let floor = build_floor(index, width, false, 0.7, &mut rng);
                if let Some(gap) = floor.gap {
                    assert!(gap.start >= GAP_MIN_START);
                    assert!(gap.start <= width - GAP_END_MARGIN);
                    assert!(GAP_SIZES.contains(&gap.size));
                    assert!(gap.end() <= width);
                }
            }
        }
    }

    #[test]
    fn solid_ranges_skip_the_gap() {
        let floor = FloorLayout::with_gap(1, 24, FloorGap { start: 10, size: 3 });
        assert_eq!(floor.solid_ranges(), vec![0..10, 13..24]);
        assert_eq!(floor.platform_columns().count(), 21);
        assert_eq!(floor.anchor_columns_in(FloorSection::Middle), vec![8, 9, 13, 14, 15]);
    }
}
