use levelgen::mapgen::floors::FloorLayout;
use levelgen::mapgen::progression::speed_multiplier;
use levelgen::mapgen::spawns::{FloorSpawnContext, spawn_floor};
use levelgen::mapgen::tiles::{TileGridEntry, TileVariantPicker};
use levelgen::mapgen::{TierProfile, audit_level, derive_level_seed};
use levelgen::{
    EnemyKind, GameProgressState, LevelConfig, LevelGenerator, SeededRandom, generate_level,
};
use proptest::prelude::*;

#[test]
fn level_one_config_matches_the_tutorial_layout() {
    let config = LevelConfig::for_level(1).expect("level 1 is valid");
    assert_eq!(config.floor_count, 10);
    assert_eq!(config.world_width, 24);
    assert!(!config.is_endless());
}

#[test]
fn level_fifty_one_is_endless_at_level_fifty_difficulty() {
    let config = LevelConfig::for_level(51).expect("level 51 is valid");
    assert!(config.is_endless());
    assert_eq!(config.difficulty, TierProfile::for_level(50));
    assert_eq!(speed_multiplier(51), 1.25);
}

#[test]
fn level_one_floor_two_fields_a_single_tutorial_enemy() {
    let layout = FloorLayout::solid(2, 24);
    let profile = TierProfile::for_level(1);
    for seed in 0..200 {
        let mut rng = SeededRandom::new(seed);
        let enemies = spawn_floor(
            &FloorSpawnContext {
                floor_index: 2,
                layout: &layout,
                level: 1,
                profile: &profile,
                is_bonus_level: false,
                door_floor: Some(9),
                ladder_columns: &[4],
                chest_columns: &[],
            },
            &mut rng,
        );
        assert_eq!(enemies.len(), 1);
        assert!(matches!(
            enemies[0].kind,
            EnemyKind::Caterpillar | EnemyKind::Beetle | EnemyKind::BlueCaterpillar
        ));
    }
}

#[test]
fn speed_multiplier_never_decreases() {
    for level in 1..200 {
        assert!(speed_multiplier(level + 1) >= speed_multiplier(level), "level {level}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn generated_levels_satisfy_every_structural_rule(
        run_seed in any::<u64>(),
        level in 1_u32..=70,
        bonus in any::<bool>(),
    ) {
        let mut progress = GameProgressState::at_level(level);
        progress.in_bonus_level = bonus && level % 10 == 0 && level <= 50;
        let generated = generate_level(run_seed, &progress).expect("levels from 1 are valid");
        let violations = audit_level(&generated);
        prop_assert!(
            violations.is_empty(),
            "seed={run_seed}, level={level}, bonus={}: {violations:?}",
            progress.in_bonus_level
        );
    }

    #[test]
    fn endless_growth_keeps_every_rule(run_seed in any::<u64>(), extra in 1_usize..20) {
        let generator = LevelGenerator::default();
        let progress = GameProgressState::at_level(64);
        let mut rng = SeededRandom::new(derive_level_seed(run_seed, 64, false));
        let mut level = generator.build(&progress, &mut rng).expect("valid level");
        for _ in 0..extra {
            generator.extend_endless(&mut level, &mut rng);
        }
        let violations = audit_level(&level);
        prop_assert!(violations.is_empty(), "seed={run_seed}: {violations:?}");
    }

    #[test]
    fn tile_selection_is_idempotent(
        seed in any::<u64>(),
        cells in proptest::collection::vec((0_i32..40, 0_i32..30), 1..64),
    ) {
        let mut picker = TileVariantPicker::new();
        let mut rng = SeededRandom::new(seed);
        let mut select = |&(x, y): &(i32, i32)| picker.select_variant(x, y, &mut rng);
        let first: Vec<TileGridEntry> = cells.iter().map(&mut select).collect();
        let second: Vec<TileGridEntry> = cells.iter().map(&mut select).collect();
        prop_assert_eq!(first, second);
    }
}
