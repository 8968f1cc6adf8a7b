use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use levelgen::mapgen::{DifficultyTier, derive_level_seed};
use levelgen::{GameProgressState, GeneratedLevel, GeneratorSettings, LevelGenerator, SeededRandom};
use log::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One line per floor plus a digest
    Summary,
    /// The full generated level
    Json,
    /// The flattened placement command stream
    Commands,
}

/// Build one level and print it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Build the bonus stage that follows `level`
    #[arg(long)]
    bonus: bool,
    /// TOML file overriding the generator defaults
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
    /// Floors to append after the initial build (endless levels only)
    #[arg(long, default_value_t = 0)]
    extra_floors: usize,
}

struct FloorLine {
    floor: usize,
    surface_px: f64,
    gap: Option<(usize, usize)>,
    ladders_up: Vec<usize>,
    enemies: Vec<String>,
    collectibles: usize,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => GeneratorSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => GeneratorSettings::default(),
    };
    let generator = LevelGenerator::new(settings);

    let mut progress = GameProgressState::at_level(args.level);
    progress.in_bonus_level = args.bonus;
    let mut rng = SeededRandom::new(derive_level_seed(args.seed, args.level, args.bonus));
    let mut level = generator
        .build(&progress, &mut rng)
        .with_context(|| format!("Failed to build level {}", args.level))?;
    for _ in 0..args.extra_floors {
        generator.extend_endless(&mut level, &mut rng);
    }
    info!(
        "built level {} with {} floors, {} enemies",
        level.config.display_level(),
        level.floor_count(),
        level.enemies.len()
    );

    match args.format {
        OutputFormat::Summary => print_summary(&level, generator.settings()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&level).context("Failed to serialize level")?;
            println!("{json}");
        }
        OutputFormat::Commands => {
            let json = serde_json::to_string_pretty(&level.commands())
                .context("Failed to serialize placement commands")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn floor_lines(level: &GeneratedLevel, settings: &GeneratorSettings) -> Vec<FloorLine> {
    level
        .floors
        .iter()
        .map(|floor| FloorLine {
            floor: floor.index,
            surface_px: settings.floor_to_px(floor.index),
            gap: floor.gap.map(|gap| (gap.start, gap.size)),
            ladders_up: level.ladders_from(floor.index).to_vec(),
            enemies: level
                .enemies_on(floor.index)
                .map(|enemy| {
                    format!("{}@{:.0}px", enemy.kind.key(), settings.column_to_px(enemy.x))
                })
                .collect(),
            collectibles: level
                .collectibles
                .iter()
                .filter(|item| item.floor == floor.index)
                .count(),
        })
        .collect()
}

fn tier_span(tier: DifficultyTier) -> String {
    let levels = tier.levels();
    if *levels.end() == u32::MAX {
        format!("{}+", levels.start())
    } else {
        format!("{}-{}", levels.start(), levels.end())
    }
}

fn print_summary(level: &GeneratedLevel, settings: &GeneratorSettings) {
    let config = &level.config;
    println!(
        "Level {} ({:?}), tier {} (levels {}), {} columns wide",
        config.display_level(),
        config.kind,
        config.difficulty.tier.name(),
        tier_span(config.difficulty.tier),
        config.world_width
    );
    println!("Speed multiplier: {:.3}", config.difficulty.speed_multiplier);
    if let Some(door) = level.door {
        println!(
            "Door: floor {} column {} at ({:.0}, {:.0}) px",
            door.floor,
            door.column,
            settings.column_to_px(door.column as f64),
            settings.floor_to_px(door.floor)
        );
    }
    for line in floor_lines(level, settings).iter().rev() {
        let gap = line.gap.map_or("-".to_string(), |(start, size)| format!("{start}+{size}"));
        println!(
            "{:>3} | y {:>6.0}px | gap {:>5} | ladders {:?} | items {} | enemies {:?}",
            line.floor, line.surface_px, gap, line.ladders_up, line.collectibles, line.enemies
        );
    }
    println!("Chests: {}", level.chests.len());
    println!("Points available: {}", level.points_available());
    println!("Fingerprint: {:016x}", level.fingerprint());
}
