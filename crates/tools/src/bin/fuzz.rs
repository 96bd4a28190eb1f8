use anyhow::{Result, bail};
use clap::Parser;
use promethean::{LevelConfig, LevelGenerator};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{init_tracing, invariants::check_level};
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1000)]
    levels: u64,
    #[arg(short, long)]
    verbose: bool,
}

fn pick(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + (rng.next_u64() as usize % (max - min + 1))
}

/// Random but always structurally valid config.
fn random_config(rng: &mut ChaCha8Rng) -> LevelConfig {
    let min_room_width = pick(rng, 1, 6);
    let min_room_height = pick(rng, 1, 6);
    let mut config = LevelConfig {
        level_width: pick(rng, 12, 80),
        level_height: pick(rng, 12, 80),
        min_room_width,
        max_room_width: min_room_width + pick(rng, 0, 5),
        min_room_height,
        max_room_height: min_room_height + pick(rng, 0, 5),
        number_of_rooms: pick(rng, 0, 40),
        border: pick(rng, 0, 3),
        room_border: pick(rng, 0, 2),
        overlap_rooms: pick(rng, 0, 4) == 0,
        rooms_square: pick(rng, 0, 1) == 0,
        rooms_rectangle: pick(rng, 0, 1) == 0,
        rooms_cross: pick(rng, 0, 1) == 0,
        rooms_diamond: pick(rng, 0, 1) == 0,
        reposition_rooms: pick(rng, 0, 1) == 0,
        ..LevelConfig::default()
    };
    if config.enabled_shapes().is_empty() {
        config.rooms_rectangle = true;
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("Starting level fuzz on seed {} for {} levels...", args.seed, args.levels);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut connected = 0_u64;

    for iteration in 0..args.levels {
        let config = random_config(&mut rng);
        let level_seed = rng.next_u64();
        let level = LevelGenerator::new(config.clone())?.generate_seeded(level_seed);
        debug!(iteration, level_seed, rooms = level.statistics().rooms_count(), "level checked");

        if let Err(violation) = check_level(&config, &level) {
            bail!("Invariant failed on level seed {level_seed}: {violation:?}\n{config:#?}");
        }
        if level.statistics().all_corridors() {
            connected += 1;
        }
    }

    println!("Fuzz complete. {connected} of {} levels fully connected.", args.levels);
    Ok(())
}
