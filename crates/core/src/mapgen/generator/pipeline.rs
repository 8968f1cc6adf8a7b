//! Level-construction pipeline that threads each phase's output into the next.

use log::{debug, trace};

use crate::random::RandomSource;
use crate::settings::GeneratorSettings;

use super::super::collectibles::{
    FloorItemContext, place_chest, place_collectibles, place_floor_chest,
};
use super::super::floors::{FloorLayout, build_floor};
use super::super::ladders::{
    DoorPosition, LadderRecord, LadderRequest, LadderRules, columns_touching, plan_ladders,
};
use super::super::level_config::LevelConfig;
use super::super::model::{ChestPlacement, CollectiblePlacement, EnemyPlacement, GeneratedLevel};
use super::super::spawns::{FloorSpawnContext, spawn_floor};
use super::super::tiles::TileVariantPicker;
use super::doors::place_door;

pub(super) fn build_level(
    settings: &GeneratorSettings,
    config: LevelConfig,
    rng: &mut dyn RandomSource,
) -> GeneratedLevel {
    debug!(
        "building level {} ({:?}): tier {}, {} floors, {} columns",
        config.display_level(),
        config.kind,
        config.difficulty.tier.name(),
        config.floor_count,
        config.world_width
    );

    let mut floors = Vec::with_capacity(config.floor_count);
    for floor_index in 0..config.floor_count {
        floors.push(build_floor(
            floor_index,
            config.world_width,
            config.is_bonus(),
            settings.gap_chance,
            rng,
        ));
    }

    let door = config
        .door_floor()
        .and_then(|floor| place_door(&floors[floor], settings.door_exclusion_radius, rng));
    let doors: Vec<DoorPosition> = door.into_iter().collect();

    let rules = LadderRules::from_settings(settings);
    let mut ladders: Vec<LadderRecord> = Vec::with_capacity(floors.len().saturating_sub(1));
    for pair in floors.windows(2) {
        let request = LadderRequest {
            floor_index: pair[0].index,
            below: &pair[0],
            above: &pair[1],
            doors: &doors,
            door_floor: config.door_floor(),
            previous: ladders.last(),
        };
        let record = plan_ladders(&request, &rules, rng);
        ladders.push(record);
    }

    let mut tiles = TileVariantPicker::new();
    for floor in &floors {
        paint_floor(&mut tiles, floor, rng);
    }

    let chests = place_chests(&config, &floors, &ladders, door.as_ref(), rng);
    let mut collectibles = Vec::new();
    for floor in floors.iter().skip(1) {
        collectibles.extend(place_floor_collectibles(
            &config,
            floor,
            &ladders,
            door.as_ref(),
            &chests,
            rng,
        ));
    }

    let mut enemies = Vec::new();
    for floor in &floors {
        let spawned = spawn_enemies_on(&config, floor, &ladders, &chests, rng);
        trace!(
            "floor {}: gap {:?}, ladders up {:?}, {} enemies",
            floor.index,
            floor.gap,
            ladders.get(floor.index).map(|record| record.columns.as_slice()),
            spawned.len()
        );
        enemies.extend(spawned);
    }

    GeneratedLevel { config, floors, ladders, door, chests, collectibles, enemies, tiles }
}

/// Appends one floor to an endless level together with its ladder, tiles, items and enemies.
pub(super) fn extend_endless(
    settings: &GeneratorSettings,
    level: &mut GeneratedLevel,
    rng: &mut dyn RandomSource,
) {
    if !level.config.is_endless() {
        return;
    }

    let floor_index = level.floors.len();
    let floor = build_floor(floor_index, level.config.world_width, false, settings.gap_chance, rng);
    if let Some(below) = level.floors.last() {
        let previous = level.ladders.iter().find(|record| record.top_floor() == below.index);
        let request = LadderRequest {
            floor_index: below.index,
            below,
            above: &floor,
            doors: &[],
            door_floor: None,
            previous,
        };
        let record = plan_ladders(&request, &LadderRules::from_settings(settings), rng);
        level.ladders.push(record);
    }

    paint_floor(&mut level.tiles, &floor, rng);
    let collectibles =
        place_floor_collectibles(&level.config, &floor, &level.ladders, None, &[], rng);
    let enemies = spawn_enemies_on(&level.config, &floor, &level.ladders, &[], rng);
    trace!("endless floor {floor_index}: gap {:?}, {} enemies", floor.gap, enemies.len());

    level.collectibles.extend(collectibles);
    level.enemies.extend(enemies);
    level.floors.push(floor);
}

fn paint_floor(tiles: &mut TileVariantPicker, floor: &FloorLayout, rng: &mut dyn RandomSource) {
    for column in floor.platform_columns() {
        tiles.select_variant(column as i32, floor.index as i32, rng);
    }
}

fn place_chests(
    config: &LevelConfig,
    floors: &[FloorLayout],
    ladders: &[LadderRecord],
    door: Option<&DoorPosition>,
    rng: &mut dyn RandomSource,
) -> Vec<ChestPlacement> {
    if !config.treasure_chests_enabled {
        return Vec::new();
    }

    let touching: Vec<Vec<usize>> =
        floors.iter().map(|floor| columns_touching(ladders, floor.index)).collect();
    let contexts: Vec<FloorItemContext<'_>> = floors
        .iter()
        .zip(&touching)
        .skip(1)
        .map(|(layout, ladder_columns)| FloorItemContext {
            layout,
            ladder_columns,
            door,
            taken: &[],
        })
        .collect();

    if config.is_bonus() {
        return contexts.iter().filter_map(|context| place_floor_chest(context, rng)).collect();
    }

    // Regular and endless levels hide a single chest below the door floor.
    let last_eligible = config.door_floor().unwrap_or(floors.len()).saturating_sub(1);
    let eligible = &contexts[..last_eligible.min(contexts.len())];
    place_chest(eligible, rng).into_iter().collect()
}

fn place_floor_collectibles(
    config: &LevelConfig,
    floor: &FloorLayout,
    ladders: &[LadderRecord],
    door: Option<&DoorPosition>,
    chests: &[ChestPlacement],
    rng: &mut dyn RandomSource,
) -> Vec<CollectiblePlacement> {
    let ladder_columns = columns_touching(ladders, floor.index);
    let taken = chest_columns_on(chests, floor.index);
    let context =
        FloorItemContext { layout: floor, ladder_columns: &ladder_columns, door, taken: &taken };
    place_collectibles(&context, &config.collectible_kinds, config.is_bonus(), rng)
}

fn spawn_enemies_on(
    config: &LevelConfig,
    floor: &FloorLayout,
    ladders: &[LadderRecord],
    chests: &[ChestPlacement],
    rng: &mut dyn RandomSource,
) -> Vec<EnemyPlacement> {
    if !config.enemies_enabled() {
        return Vec::new();
    }
    let ladder_columns = columns_touching(ladders, floor.index);
    let chest_columns = chest_columns_on(chests, floor.index);
    spawn_floor(
        &FloorSpawnContext {
            floor_index: floor.index,
            layout: floor,
            level: config.level,
            profile: &config.difficulty,
            is_bonus_level: config.is_bonus(),
            door_floor: config.door_floor(),
            ladder_columns: &ladder_columns,
            chest_columns: &chest_columns,
        },
        rng,
    )
}

fn chest_columns_on(chests: &[ChestPlacement], floor: usize) -> Vec<usize> {
    chests.iter().filter(|chest| chest.floor == floor).map(|chest| chest.column).collect()
}
