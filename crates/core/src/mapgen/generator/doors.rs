//! Exit door placement on the top floor of a discrete level.

use log::debug;

use crate::random::RandomSource;

use super::super::floors::FloorLayout;
use super::super::ladders::DoorPosition;

const LEFT_MARGIN: usize = 3;
const RIGHT_MARGIN: usize = 4;

/// A random column in `[3, width - 4]`, moved to the nearest platform if it sits over the gap.
pub(super) fn place_door(
    layout: &FloorLayout,
    exclusion_radius: usize,
    rng: &mut dyn RandomSource,
) -> Option<DoorPosition> {
    let width = layout.width;
    let preferred = if width > LEFT_MARGIN + RIGHT_MARGIN {
        rng.range_inclusive(LEFT_MARGIN, width - RIGHT_MARGIN)
    } else {
        width / 2
    };

    let column = if layout.has_platform_at(preferred) {
        Some(preferred)
    } else {
        layout.platform_columns().min_by_key(|&column| (column.abs_diff(preferred), column))
    };
    let Some(column) = column else {
        debug!("floor {}: no platform for the exit door", layout.index);
        return None;
    };
    Some(DoorPosition { floor: layout.index, column, exclusion_radius })
}
