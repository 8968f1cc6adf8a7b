//! Public data models for generated levels and the placement command stream.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::content::{TREASURE_CHEST_POINTS, get_collectible_stats, get_enemy_stats};
use crate::types::{CollectibleKind, Direction, EnemyKind, GridPos, MovementClass, PatrolBounds};

use super::floors::FloorLayout;
use super::ladders::{DoorPosition, LadderRecord, columns_touching};
use super::level_config::LevelConfig;
use super::tiles::{TileGridEntry, TileVariantPicker};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Motion {
    pub base_speed: f64,
    pub speed_multiplier: f64,
    pub bounds: PatrolBounds,
    pub direction: Direction,
}

/// Movement behaviour, fixed by the enemy kind when the placement is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyBehavior {
    Patrol(Motion),
    EdgeRunner(Motion),
    Bouncer(Motion),
    Blocker(Motion),
}

impl EnemyBehavior {
    pub fn for_kind(kind: EnemyKind, bounds: PatrolBounds) -> Self {
        let stats = get_enemy_stats(kind);
        let motion = Motion {
            base_speed: stats.base_speed,
            speed_multiplier: 1.0,
            bounds,
            direction: Direction::Right,
        };
        match stats.movement {
            MovementClass::Patrol => EnemyBehavior::Patrol(motion),
            MovementClass::EdgeRunner => EnemyBehavior::EdgeRunner(motion),
            MovementClass::Bouncer => EnemyBehavior::Bouncer(motion),
            MovementClass::Blocker => EnemyBehavior::Blocker(motion),
        }
    }

    pub fn class(&self) -> MovementClass {
        match self {
            EnemyBehavior::Patrol(_) => MovementClass::Patrol,
            EnemyBehavior::EdgeRunner(_) => MovementClass::EdgeRunner,
            EnemyBehavior::Bouncer(_) => MovementClass::Bouncer,
            EnemyBehavior::Blocker(_) => MovementClass::Blocker,
        }
    }

    fn motion(&self) -> &Motion {
        match self {
            EnemyBehavior::Patrol(motion)
            | EnemyBehavior::EdgeRunner(motion)
            | EnemyBehavior::Bouncer(motion)
            | EnemyBehavior::Blocker(motion) => motion,
        }
    }

    fn motion_mut(&mut self) -> &mut Motion {
        match self {
            EnemyBehavior::Patrol(motion)
            | EnemyBehavior::EdgeRunner(motion)
            | EnemyBehavior::Bouncer(motion)
            | EnemyBehavior::Blocker(motion) => motion,
        }
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.motion_mut().speed_multiplier = multiplier;
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.motion().speed_multiplier
    }

    /// Tiles per second after the level multiplier.
    pub fn speed(&self) -> f64 {
        let motion = self.motion();
        motion.base_speed * motion.speed_multiplier
    }

    pub fn patrol_bounds(&self) -> PatrolBounds {
        self.motion().bounds
    }

    pub fn set_initial_direction(&mut self, direction: Direction) {
        self.motion_mut().direction = direction;
    }

    pub fn initial_direction(&self) -> Direction {
        self.motion().direction
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub floor: usize,
    /// Tile units; the caller projects to pixels.
    pub x: f64,
    pub behavior: EnemyBehavior,
}

impl EnemyPlacement {
    pub fn new(kind: EnemyKind, floor: usize, x: f64, bounds: PatrolBounds) -> Self {
        Self { kind, floor, x, behavior: EnemyBehavior::for_kind(kind, bounds) }
    }

    pub fn left_bound(&self) -> f64 {
        self.behavior.patrol_bounds().left
    }

    pub fn right_bound(&self) -> f64 {
        self.behavior.patrol_bounds().right
    }

    pub fn initial_direction(&self) -> Direction {
        self.behavior.initial_direction()
    }

    pub fn column(&self) -> usize {
        self.x.max(0.0) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChestPlacement {
    pub floor: usize,
    pub column: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CollectiblePlacement {
    pub kind: CollectibleKind,
    pub floor: usize,
    pub column: usize,
}

/// One instruction for the rendering/physics side; tile units throughout.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PlacementCommand {
    Platform { column: usize, floor: usize, variant: u8, flip_x: bool },
    Hazard { column: usize, floor: usize },
    Ladder { column: usize, bottom_floor: usize, top_floor: usize },
    Door { column: usize, floor: usize },
    Chest { column: usize, floor: usize },
    Collectible { kind: CollectibleKind, column: usize, floor: usize },
    Enemy {
        kind: EnemyKind,
        floor: usize,
        x: f64,
        left_bound: f64,
        right_bound: f64,
        direction: Direction,
        speed: f64,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedLevel {
    pub config: LevelConfig,
    pub floors: Vec<FloorLayout>,
    pub ladders: Vec<LadderRecord>,
    pub door: Option<DoorPosition>,
    pub chests: Vec<ChestPlacement>,
    pub collectibles: Vec<CollectiblePlacement>,
    pub enemies: Vec<EnemyPlacement>,
    #[serde(skip)]
    pub(super) tiles: TileVariantPicker,
}

impl GeneratedLevel {
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn world_width(&self) -> usize {
        self.config.world_width
    }

    /// Ladders leading up from `floor`.
    pub fn ladders_from(&self, floor: usize) -> &[usize] {
        self.ladders
            .iter()
            .find(|record| record.floor == floor)
            .map_or(&[][..], |record| record.columns.as_slice())
    }

    /// Ladder columns that reach `floor` from below or leave it upwards.
    pub fn ladder_columns_touching(&self, floor: usize) -> Vec<usize> {
        columns_touching(&self.ladders, floor)
    }

    pub fn tile_at(&self, column: usize, floor: usize) -> Option<TileGridEntry> {
        self.tiles.entry_at(column as i32, floor as i32)
    }

    pub fn tile_entries(&self) -> impl Iterator<Item = (GridPos, TileGridEntry)> + '_ {
        self.tiles.entries()
    }

    pub fn enemies_on(&self, floor: usize) -> impl Iterator<Item = &EnemyPlacement> + '_ {
        self.enemies.iter().filter(move |enemy| enemy.floor == floor)
    }

    /// Points on offer from every enemy, pickup and chest in the level.
    pub fn points_available(&self) -> u64 {
        let enemies: u64 =
            self.enemies.iter().map(|enemy| u64::from(get_enemy_stats(enemy.kind).points)).sum();
        let pickups: u64 = self
            .collectibles
            .iter()
            .map(|item| u64::from(get_collectible_stats(item.kind).points))
            .sum();
        let chests = self.chests.len() as u64 * u64::from(TREASURE_CHEST_POINTS);
        enemies + pickups + chests
    }

    /// Spike tiles as `(floor, column)`.
    pub fn hazards(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.floors
            .iter()
            .flat_map(|floor| floor.hazard_columns().map(move |column| (floor.index, column)))
    }

    pub fn commands(&self) -> Vec<PlacementCommand> {
        let mut commands = Vec::new();
        for floor in &self.floors {
            for column in floor.platform_columns() {
                if let Some(tile) = self.tile_at(column, floor.index) {
                    commands.push(PlacementCommand::Platform {
                        column,
                        floor: floor.index,
                        variant: tile.variant,
                        flip_x: tile.flip_x,
                    });
                }
            }
            for column in floor.hazard_columns() {
                commands.push(PlacementCommand::Hazard { column, floor: floor.index });
            }
        }
        for record in &self.ladders {
            for &column in &record.columns {
                commands.push(PlacementCommand::Ladder {
                    column,
                    bottom_floor: record.floor,
                    top_floor: record.top_floor(),
                });
            }
        }
        if let Some(door) = self.door {
            commands.push(PlacementCommand::Door { column: door.column, floor: door.floor });
        }
        for chest in &self.chests {
            commands.push(PlacementCommand::Chest { column: chest.column, floor: chest.floor });
        }
        for item in &self.collectibles {
            commands.push(PlacementCommand::Collectible {
                kind: item.kind,
                column: item.column,
                floor: item.floor,
            });
        }
        for enemy in &self.enemies {
            commands.push(PlacementCommand::Enemy {
                kind: enemy.kind,
                floor: enemy.floor,
                x: enemy.x,
                left_bound: enemy.left_bound(),
                right_bound: enemy.right_bound(),
                direction: enemy.initial_direction(),
                speed: enemy.behavior.speed(),
            });
        }
        commands
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.config.level.to_le_bytes());
        bytes.push(u8::from(self.config.is_bonus()));
        bytes.extend((self.config.world_width as u32).to_le_bytes());
        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            bytes.extend(floor.gap_start().to_le_bytes());
            bytes.push(floor.gap_size() as u8);
        }
        for (pos, tile) in self.tiles.entries() {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
            bytes.push(tile.variant);
            bytes.push(u8::from(tile.flip_x));
        }
        for record in &self.ladders {
            bytes.extend((record.floor as u32).to_le_bytes());
            for &column in &record.columns {
                bytes.push(column as u8);
            }
        }
        if let Some(door) = self.door {
            bytes.extend((door.floor as u32).to_le_bytes());
            bytes.push(door.column as u8);
        }
        for chest in &self.chests {
            bytes.extend((chest.floor as u32).to_le_bytes());
            bytes.push(chest.column as u8);
        }
        for item in &self.collectibles {
            bytes.push(item.kind as u8);
            bytes.extend((item.floor as u32).to_le_bytes());
            bytes.push(item.column as u8);
        }
        bytes.extend((self.enemies.len() as u32).to_le_bytes());
        for enemy in &self.enemies {
            bytes.push(enemy.kind as u8);
            bytes.extend((enemy.floor as u32).to_le_bytes());
            bytes.extend(enemy.x.to_le_bytes());
            bytes.push(u8::from(enemy.initial_direction() == Direction::Right));
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
