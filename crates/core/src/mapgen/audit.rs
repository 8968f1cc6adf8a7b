//! Structural checks every generated level must pass.

use thiserror::Error;

use crate::content::movement_class;
use crate::types::MovementClass;

use super::model::GeneratedLevel;
use super::progression::{blocker_max_per_floor, speed_multiplier};
use super::tiles::VARIANT_COUNT;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Violation {
    #[error("ground floor is not a full platform")]
    BrokenGround,
    #[error("floor {floor}: gap {start}+{size} leaves the {width}-column floor")]
    GapOutOfBounds { floor: usize, start: usize, size: usize, width: usize },
    #[error("floor {floor}: hazards {found:?} do not match the gap")]
    HazardMismatch { floor: usize, found: Vec<usize> },
    #[error("ladder at column {column} from floor {floor} lacks a platform at one end")]
    FloatingLadder { floor: usize, column: usize },
    #[error("ladder at column {column} from floor {floor} crowds the door")]
    LadderAtDoor { floor: usize, column: usize },
    #[error("ladder from floor {floor} leads past the door floor")]
    LadderPastDoor { floor: usize },
    #[error("floor {floor} column {column}: platform tile missing or out of range")]
    BadTile { floor: usize, column: usize },
    #[error("floor {floor}: enemy at {x} outside bounds [{left}, {right}]")]
    EnemyOutOfBounds { floor: usize, x: f64, left: f64, right: f64 },
    #[error("floor {floor}: enemies are not allowed here")]
    ForbiddenEnemyFloor { floor: usize },
    #[error("floor {floor}: {count} blockers exceed the cap")]
    BlockerCap { floor: usize, count: usize },
    #[error("floor {floor}: both bouncing kinds spawned")]
    BounceExclusivity { floor: usize },
    #[error("floor {floor}: speed multiplier {found} differs from the level's")]
    SpeedMismatch { floor: usize, found: f64 },
}

/// Every rule the level breaks; empty for a sound level.
pub fn audit_level(level: &GeneratedLevel) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_floors(level, &mut violations);
    check_ladders(level, &mut violations);
    check_tiles(level, &mut violations);
    check_enemies(level, &mut violations);
    violations
}

fn check_floors(level: &GeneratedLevel, violations: &mut Vec<Violation>) {
    if let Some(ground) = level.floors.first()
        && (ground.gap_start() != -1 || ground.platform_columns().count() != ground.width)
    {
        violations.push(Violation::BrokenGround);
    }

    for floor in &level.floors {
        if let Some(gap) = floor.gap
            && gap.end() > floor.width
        {
            violations.push(Violation::GapOutOfBounds {
                floor: floor.index,
                start: gap.start,
                size: gap.size,
                width: floor.width,
            });
        }
        let found: Vec<usize> = level
            .hazards()
            .filter(|&(hazard_floor, _)| hazard_floor == floor.index)
            .map(|(_, column)| column)
            .collect();
        let expected: Vec<usize> = floor.gap.map_or(Vec::new(), |gap| gap.columns().collect());
        if found != expected {
            violations.push(Violation::HazardMismatch { floor: floor.index, found });
        }
    }
}

fn check_ladders(level: &GeneratedLevel, violations: &mut Vec<Violation>) {
    let door_floor = level.config.door_floor();
    for record in &level.ladders {
        if door_floor.is_some_and(|top| record.floor >= top) && !record.columns.is_empty() {
            violations.push(Violation::LadderPastDoor { floor: record.floor });
        }
        let below = level.floors.get(record.floor);
        let above = level.floors.get(record.top_floor());
        for &column in &record.columns {
            let grounded = below.is_some_and(|floor| floor.has_platform_at(column))
                && above.is_some_and(|floor| floor.has_platform_at(column));
            if !grounded {
                violations.push(Violation::FloatingLadder { floor: record.floor, column });
            }
            let crowds_door = level.door.is_some_and(|door| {
                (door.floor == record.floor || door.floor == record.top_floor())
                    && door.excludes(column)
            });
            if crowds_door {
                violations.push(Violation::LadderAtDoor { floor: record.floor, column });
            }
        }
    }
}

fn check_tiles(level: &GeneratedLevel, violations: &mut Vec<Violation>) {
    for floor in &level.floors {
        for column in floor.platform_columns() {
            let sound = level
                .tile_at(column, floor.index)
                .is_some_and(|tile| usize::from(tile.variant) < VARIANT_COUNT);
            if !sound {
                violations.push(Violation::BadTile { floor: floor.index, column });
            }
        }
    }
}

fn check_enemies(level: &GeneratedLevel, violations: &mut Vec<Violation>) {
    let width = level.world_width() as f64;
    let expected_speed = speed_multiplier(level.config.level);
    let blocker_cap = blocker_max_per_floor(level.config.level);

    for floor in &level.floors {
        let enemies: Vec<_> = level.enemies_on(floor.index).collect();
        if enemies.is_empty() {
            continue;
        }
        let forbidden = level.config.is_bonus()
            || floor.index == 0
            || level.config.door_floor() == Some(floor.index);
        if forbidden {
            violations.push(Violation::ForbiddenEnemyFloor { floor: floor.index });
        }

        let mut blockers = 0;
        let mut bouncers = Vec::new();
        for enemy in &enemies {
            let bounds = enemy.behavior.patrol_bounds();
            let (left, right) = (bounds.left, bounds.right);
            if !(bounds.contains(enemy.x) && left >= 0.5 && right <= width - 0.5) {
                violations.push(Violation::EnemyOutOfBounds {
                    floor: floor.index,
                    x: enemy.x,
                    left,
                    right,
                });
            }
            match movement_class(enemy.kind) {
                MovementClass::Blocker => blockers += 1,
                MovementClass::Bouncer if !bouncers.contains(&enemy.kind) => {
                    bouncers.push(enemy.kind)
                }
                _ => {}
            }
            let found = enemy.behavior.speed_multiplier();
            if found != expected_speed {
                violations.push(Violation::SpeedMismatch { floor: floor.index, found });
            }
        }
        if blockers > blocker_cap {
            violations.push(Violation::BlockerCap { floor: floor.index, count: blockers });
        }
        if bouncers.len() > 1 {
            violations.push(Violation::BounceExclusivity { floor: floor.index });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::floors::FloorGap;
    use crate::mapgen::generator::LevelGenerator;
    use crate::random::SeededRandom;
    use crate::state::GameProgressState;

    fn build(level: u32, seed: u64) -> GeneratedLevel {
        let mut rng = SeededRandom::new(seed);
        LevelGenerator::default()
            .build(&GameProgressState::at_level(level), &mut rng)
            .expect("valid level")
    }

    #[test]
    fn generated_levels_pass_the_audit() {
        for level in [1, 6, 14, 15, 29, 41, 50, 75] {
            let generated = build(level, u64::from(level) * 97);
            assert_eq!(audit_level(&generated), Vec::new(), "level {level}");
        }
    }

    #[test]
    fn tampering_is_reported() {
        let mut generated = build(18, 4);
        generated.floors[0].gap = Some(FloorGap { start: 3, size: 2 });
        let violations = audit_level(&generated);
        assert!(violations.contains(&Violation::BrokenGround));

        let mut generated = build(18, 4);
        let record = generated
            .ladders
            .iter_mut()
            .find(|record| !record.columns.is_empty())
            .expect("some floor has a ladder");
        let floor = record.floor;
        record.columns.push(99);
        let violations = audit_level(&generated);
        assert!(violations.contains(&Violation::FloatingLadder { floor, column: 99 }));
    }
}
