//! Column-space primitives shared by floors, ladders, collectibles, and spawning.

use serde::Serialize;

/// Left, middle, or right third of a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorSection {
    Left,
    Middle,
    Right,
}

impl FloorSection {
    pub const ALL: [FloorSection; 3] =
        [FloorSection::Left, FloorSection::Middle, FloorSection::Right];

    pub fn of(column: usize, width: usize) -> Self {
        let third = width.div_ceil(3).max(1);
        match column / third {
            0 => FloorSection::Left,
            1 => FloorSection::Middle,
            _ => FloorSection::Right,
        }
    }
}

pub(super) fn within_radius(column: usize, center: usize, radius: usize) -> bool {
    column.abs_diff(center) <= radius
}

pub(super) fn near_any(column: usize, centers: &[usize], radius: usize) -> bool {
    centers.iter().any(|&center| within_radius(column, center, radius))
}

/// Tile x of a column's center, in tile units.
pub(super) fn column_center(column: usize) -> f64 {
    column as f64 + 0.5
}

/// Playable horizontal span in tile units for a floor of `width` columns.
pub(super) fn walkable_span(width: usize) -> (f64, f64) {
    (0.5, width as f64 - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_split_floor_into_thirds() {
        assert_eq!(FloorSection::of(0, 24), FloorSection::Left);
        assert_eq!(FloorSection::of(7, 24), FloorSection::Left);
        assert_eq!(FloorSection::of(8, 24), FloorSection::Middle);
        assert_eq!(FloorSection::of(15, 24), FloorSection::Middle);
        assert_eq!(FloorSection::of(16, 24), FloorSection::Right);
        assert_eq!(FloorSection::of(23, 24), FloorSection::Right);
    }

    #[test]
    fn radius_is_inclusive() {
        assert!(within_radius(10, 12, 2));
        assert!(!within_radius(9, 12, 2));
        assert!(near_any(5, &[1, 8], 3));
        assert!(!near_any(5, &[], 3));
    }
}
