//! Zone-based enemy selection and placement for one floor.

use log::{debug, trace};
use serde::Serialize;

use crate::content::movement_class;
use crate::random::RandomSource;
use crate::types::{Direction, EnemyKind, MovementClass, PatrolBounds};

use super::floors::FloorLayout;
use super::grid::{column_center, walkable_span};
use super::model::EnemyPlacement;
use super::progression::{TierProfile, enemy_count_range};

/// The rhino's charge animation clips the ladder hatch on the first floor.
const ANIMATION_DEFECT_EXCLUSION: (EnemyKind, usize) = (EnemyKind::Rhino, 1);
const EDGE_RUNNER_COLUMN_OFFSET: usize = 1;
const POSITION_JITTER: f64 = 1.0;

const UNBIASED: f64 = 0.5;
const TOWARD_CENTER_BIAS: f64 = 0.7;
const EDGE_INWARD_BIAS: f64 = 0.8;
const INTERIOR_ALTERNATING_BIAS: f64 = 0.65;
const DIRECTION_NOISE: f64 = 0.15;
const MIN_BIAS: f64 = 0.1;
const MAX_BIAS: f64 = 0.9;
/// Enemies this close to a wall count as edge-positioned.
const EDGE_BAND_TILES: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EnemySpawnZone {
    pub start: usize,
    pub end: usize,
    pub center: usize,
}

impl EnemySpawnZone {
    fn overlaps_any(&self, columns: &[usize]) -> bool {
        columns.iter().any(|&column| (self.start..=self.end).contains(&column))
    }
}

/// Equal segments of `zone_size` columns; the last one absorbs any remainder.
pub fn spawn_zones(width: usize, zone_size: usize) -> Vec<EnemySpawnZone> {
    let zone_size = zone_size.max(1);
    let count = width / zone_size;
    (0..count)
        .map(|index| {
            let start = index * zone_size;
            let end = if index + 1 == count { width - 1 } else { start + zone_size - 1 };
            EnemySpawnZone { start, end, center: (start + end) / 2 }
        })
        .collect()
}

pub struct FloorSpawnContext<'a> {
    pub floor_index: usize,
    pub layout: &'a FloorLayout,
    pub level: u32,
    pub profile: &'a TierProfile,
    pub is_bonus_level: bool,
    pub door_floor: Option<usize>,
    /// Ladders reaching this floor from below or leaving it upwards.
    pub ladder_columns: &'a [usize],
    pub chest_columns: &'a [usize],
}

impl FloorSpawnContext<'_> {
    /// Bonus levels, the ground floor and the door floor itself stay empty;
    /// `door_floor - 1` is a regular spawning floor.
    fn skips_floor(&self) -> bool {
        self.is_bonus_level || self.floor_index == 0 || self.door_floor == Some(self.floor_index)
    }
}

pub fn spawn_floor(
    context: &FloorSpawnContext<'_>,
    rng: &mut dyn RandomSource,
) -> Vec<EnemyPlacement> {
    if context.skips_floor() {
        return Vec::new();
    }

    let width = context.layout.width;
    let zones = spawn_zones(width, context.profile.zone_size);
    if zones.is_empty() {
        return Vec::new();
    }

    let count_range = enemy_count_range(context.level);
    let count = rng
        .range_inclusive(*count_range.start(), *count_range.end())
        .min(zones.len());
    let kinds = select_kinds(context, count, rng);

    let mut zone_order: Vec<usize> = (0..zones.len()).collect();
    rng.shuffle(&mut zone_order);

    let (left, right) = walkable_span(width);
    let bounds = PatrolBounds { left, right };
    let blocked_columns: Vec<usize> =
        context.ladder_columns.iter().chain(context.chest_columns).copied().collect();

    let edge_runners =
        kinds.iter().filter(|&&kind| movement_class(kind) == MovementClass::EdgeRunner).count();
    let lone_runner_goes_left = edge_runners == 1 && rng.chance(0.5);
    let mut edge_slot = 0;

    let mut placements = Vec::with_capacity(kinds.len());
    for (slot, &kind) in kinds.iter().enumerate() {
        let zone_index = zone_order[slot];
        let x = match movement_class(kind) {
            MovementClass::EdgeRunner => {
                let goes_left =
                    if edge_runners == 1 { lone_runner_goes_left } else { edge_slot % 2 == 0 };
                edge_slot += 1;
                let column = if goes_left {
                    EDGE_RUNNER_COLUMN_OFFSET
                } else {
                    width - EDGE_RUNNER_COLUMN_OFFSET
                };
                column_center(column)
            }
            MovementClass::Blocker => {
                match conflict_free_zone(&zones, zone_index, &blocked_columns) {
                    Some(zone) => column_center(zone.center),
                    None => {
                        debug!(
                            "floor {}: no ladder-free zone for {}, skipping",
                            context.floor_index,
                            kind.key()
                        );
                        continue;
                    }
                }
            }
            MovementClass::Patrol | MovementClass::Bouncer => {
                column_center(zones[zone_index].center)
                    + rng.uniform(-POSITION_JITTER, POSITION_JITTER)
            }
        };
        let x = x.clamp(left, right);
        let mut placement = EnemyPlacement::new(kind, context.floor_index, x, bounds);
        placement.behavior.set_speed_multiplier(context.profile.speed_multiplier);
        placements.push(placement);
    }

    assign_initial_directions(&mut placements, width, rng);
    trace!("floor {}: {} enemies", context.floor_index, placements.len());
    placements
}

fn select_kinds(
    context: &FloorSpawnContext<'_>,
    count: usize,
    rng: &mut dyn RandomSource,
) -> Vec<EnemyKind> {
    let mut pool: Vec<(EnemyKind, f64)> =
        context.profile.spawn_weights().iter().copied().filter(|&(_, w)| w > 0.0).collect();

    let bouncers: Vec<EnemyKind> = pool
        .iter()
        .map(|&(kind, _)| kind)
        .filter(|&kind| movement_class(kind) == MovementClass::Bouncer)
        .collect();
    if bouncers.len() >= 2 {
        let keep = if rng.chance(0.5) { bouncers[0] } else { bouncers[1] };
        pool.retain(|&(kind, _)| movement_class(kind) != MovementClass::Bouncer || kind == keep);
    }

    pool.retain(|&(kind, _)| (kind, context.floor_index) != ANIMATION_DEFECT_EXCLUSION);
    let blocker_cap = context.profile.blocker_max_per_floor;
    if blocker_cap == 0 {
        pool.retain(|&(kind, _)| movement_class(kind) != MovementClass::Blocker);
    }

    let mut kinds = Vec::with_capacity(count);
    let mut blockers = 0;
    for _ in 0..count {
        let weights: Vec<f64> = pool.iter().map(|&(_, w)| w).collect();
        let Some(index) = rng.weighted_index(&weights) else {
            break;
        };
        let kind = pool[index].0;
        kinds.push(kind);
        if movement_class(kind) == MovementClass::Blocker {
            blockers += 1;
            if blockers >= blocker_cap {
                pool.remove(index);
            }
        }
    }
    kinds
}

/// The assigned zone if it is clear, else the next clear zone in scan order.
fn conflict_free_zone(
    zones: &[EnemySpawnZone],
    assigned: usize,
    blocked_columns: &[usize],
) -> Option<EnemySpawnZone> {
    (0..zones.len())
        .map(|offset| zones[(assigned + offset) % zones.len()])
        .find(|zone| !zone.overlaps_any(blocked_columns))
}

fn assign_initial_directions(
    placements: &mut [EnemyPlacement],
    width: usize,
    rng: &mut dyn RandomSource,
) {
    let count = placements.len();
    for (index, placement) in placements.iter_mut().enumerate() {
        let bias = right_bias(index, count, placement.x, width);
        let noise = rng.uniform(-DIRECTION_NOISE, DIRECTION_NOISE);
        let noisy = (bias + noise).clamp(MIN_BIAS, MAX_BIAS);
        let direction = if rng.chance(noisy) { Direction::Right } else { Direction::Left };
        placement.behavior.set_initial_direction(direction);
    }
}

/// Probability of starting to the right before noise is applied.
fn right_bias(index: usize, count: usize, x: f64, width: usize) -> f64 {
    let center = width as f64 / 2.0;
    match count {
        0 | 1 => UNBIASED,
        2 => {
            if x < center {
                TOWARD_CENTER_BIAS
            } else {
                1.0 - TOWARD_CENTER_BIAS
            }
        }
        _ => {
            if x <= EDGE_BAND_TILES {
                EDGE_INWARD_BIAS
            } else if x >= width as f64 - EDGE_BAND_TILES {
                1.0 - EDGE_INWARD_BIAS
            } else if index % 2 == 0 {
                INTERIOR_ALTERNATING_BIAS
            } else {
                1.0 - INTERIOR_ALTERNATING_BIAS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::floors::FloorGap;
    use crate::random::{ScriptedRandom, SeededRandom};

    fn context<'a>(
        floor_index: usize,
        layout: &'a FloorLayout,
        level: u32,
        profile: &'a TierProfile,
        ladder_columns: &'a [usize],
    ) -> FloorSpawnContext<'a> {
        FloorSpawnContext {
            floor_index,
            layout,
            level,
            profile,
            is_bonus_level: false,
            door_floor: None,
            ladder_columns,
            chest_columns: &[],
        }
    }

    #[test]
    fn zones_partition_the_floor() {
        let zones = spawn_zones(24, 6);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0], EnemySpawnZone { start: 0, end: 5, center: 2 });
        assert_eq!(zones[3], EnemySpawnZone { start: 18, end: 23, center: 20 });

        let zones = spawn_zones(24, 5);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[3], EnemySpawnZone { start: 15, end: 23, center: 19 });
    }

    #[test]
    fn level_one_floor_two_spawns_one_tutorial_enemy() {
        let layout = FloorLayout::solid(2, 24);
        let profile = TierProfile::for_level(1);
        for seed in 0..100 {
            let mut rng = SeededRandom::new(seed);
            let enemies = spawn_floor(&context(2, &layout, 1, &profile, &[]), &mut rng);
            assert_eq!(enemies.len(), 1, "seed {seed}");
            assert!(matches!(
                enemies[0].kind,
                EnemyKind::Caterpillar | EnemyKind::Beetle | EnemyKind::BlueCaterpillar
            ));
        }
    }

    #[test]
    fn ground_bonus_and_door_floors_stay_empty() {
        let layout = FloorLayout::solid(0, 24);
        let profile = TierProfile::for_level(30);
        let mut rng = SeededRandom::new(1);
        assert!(spawn_floor(&context(0, &layout, 30, &profile, &[]), &mut rng).is_empty());

        let layout = FloorLayout::solid(3, 24);
        let mut bonus = context(3, &layout, 30, &profile, &[]);
        bonus.is_bonus_level = true;
        assert!(spawn_floor(&bonus, &mut rng).is_empty());

        let mut door = context(3, &layout, 30, &profile, &[]);
        door.door_floor = Some(3);
        assert!(spawn_floor(&door, &mut rng).is_empty());

        let mut under_door = context(3, &layout, 30, &profile, &[]);
        under_door.door_floor = Some(4);
        assert!(!spawn_floor(&under_door, &mut rng).is_empty());
    }

    #[test]
    fn spawned_enemies_stay_within_bounds_and_caps() {
        for level in [2_u32, 9, 15, 22, 33, 45, 50, 64] {
            let width = if level < 25 { 24 } else if level < 50 { 32 } else { 40 };
            let profile = TierProfile::for_level(level);
            let layout = FloorLayout::with_gap(4, width, FloorGap { start: 9, size: 3 });
            for seed in 0..60 {
                let mut rng = SeededRandom::new(seed * 31 + u64::from(level));
                let enemies = spawn_floor(&context(4, &layout, level, &profile, &[6]), &mut rng);
                assert!(!enemies.is_empty() || profile.max_enemies_per_floor == 0);
                assert!(enemies.len() <= profile.max_enemies_per_floor);

                let blockers = enemies.iter().filter(|e| e.kind == EnemyKind::Blu).count();
                assert!(blockers <= profile.blocker_max_per_floor, "level {level}");
                let has_frog = enemies.iter().any(|e| e.kind == EnemyKind::Frog);
                let has_flea = enemies.iter().any(|e| e.kind == EnemyKind::Flea);
                assert!(!(has_frog && has_flea), "level {level} seed {seed}");

                for enemy in &enemies {
                    assert!(enemy.left_bound() <= enemy.x && enemy.x <= enemy.right_bound());
                    assert!(enemy.left_bound() >= 0.5);
                    assert!(enemy.right_bound() <= width as f64 - 0.5);
                    assert_eq!(enemy.behavior.speed_multiplier(), profile.speed_multiplier);
                }
            }
        }
    }

    #[test]
    fn edge_runners_spawn_against_a_wall() {
        let profile = TierProfile::for_level(45);
        let layout = FloorLayout::solid(5, 32);
        let mut seen = 0;
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            for enemy in spawn_floor(&context(5, &layout, 45, &profile, &[]), &mut rng) {
                if enemy.kind == EnemyKind::Rhino {
                    seen += 1;
                    assert!(enemy.x == 1.5 || enemy.x == 31.5, "rhino at {}", enemy.x);
                }
            }
        }
        assert!(seen > 0, "rhinos should appear at level 45");
    }

    #[test]
    fn several_edge_runners_alternate_walls() {
        let profile = TierProfile::for_level(45);
        let layout = FloorLayout::solid(5, 32);
        for seed in 0..400 {
            let mut rng = SeededRandom::new(seed);
            let rhinos: Vec<f64> = spawn_floor(&context(5, &layout, 45, &profile, &[]), &mut rng)
                .into_iter()
                .filter(|enemy| enemy.kind == EnemyKind::Rhino)
                .map(|enemy| enemy.x)
                .collect();
            if rhinos.len() >= 2 {
                assert_eq!(rhinos[0], 1.5);
                assert_eq!(rhinos[1], 31.5);
            }
        }
    }

    #[test]
    fn blockers_avoid_ladder_and_chest_zones() {
        let profile = TierProfile::for_level(45);
        let layout = FloorLayout::solid(6, 32);
        let zones = spawn_zones(32, profile.zone_size);
        let ladders = [3_usize, 17];
        let chests = [26_usize];
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            let mut ctx = context(6, &layout, 45, &profile, &ladders);
            ctx.chest_columns = &chests;
            for enemy in spawn_floor(&ctx, &mut rng) {
                if enemy.kind != EnemyKind::Blu {
                    continue;
                }
                let zone = zones
                    .iter()
                    .find(|zone| (zone.start..=zone.end).contains(&enemy.column()))
                    .expect("blocker sits in a zone");
                assert!(!zone.overlaps_any(&[3, 17, 26]), "seed {seed}: {zone:?}");
            }
        }
    }

    #[test]
    fn blocker_is_skipped_when_every_zone_has_a_ladder() {
        let zones = spawn_zones(24, 6);
        assert_eq!(conflict_free_zone(&zones, 1, &[1, 7, 13, 19]), None);
        assert_eq!(conflict_free_zone(&zones, 1, &[7]), Some(zones[2]));
        assert_eq!(conflict_free_zone(&zones, 3, &[19]), Some(zones[0]));
    }

    #[test]
    fn rhinos_never_spawn_on_the_excluded_floor() {
        let profile = TierProfile::for_level(45);
        let layout = FloorLayout::solid(1, 32);
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            let enemies = spawn_floor(&context(1, &layout, 45, &profile, &[]), &mut rng);
            assert!(enemies.iter().all(|enemy| enemy.kind != EnemyKind::Rhino));
        }
    }

    #[test]
    fn direction_bias_table() {
        assert_eq!(right_bias(0, 1, 3.5, 24), 0.5);
        assert_eq!(right_bias(0, 2, 3.5, 24), 0.7);
        assert!((right_bias(1, 2, 20.5, 24) - 0.3).abs() < 1e-12);
        assert_eq!(right_bias(2, 4, 1.5, 24), 0.8);
        assert!((right_bias(2, 4, 23.5, 24) - 0.2).abs() < 1e-12);
        assert_eq!(right_bias(2, 4, 10.5, 24), 0.65);
        assert!((right_bias(3, 4, 10.5, 24) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn noisy_bias_is_clamped_before_the_coin_flip() {
        let layout = FloorLayout::solid(2, 24);
        let profile = TierProfile::for_level(1);
        // Every roll at the top of the range: noise pushes the bias to 0.65 and
        // the final coin flip (0.99...) lands above it.
        let mut rng = ScriptedRandom::constant(0.999_999);
        let enemies = spawn_floor(&context(2, &layout, 1, &profile, &[]), &mut rng);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].initial_direction(), Direction::Left);

        let mut rng = ScriptedRandom::constant(0.0);
        let enemies = spawn_floor(&context(2, &layout, 1, &profile, &[]), &mut rng);
        assert_eq!(enemies[0].initial_direction(), Direction::Right);
    }
}
