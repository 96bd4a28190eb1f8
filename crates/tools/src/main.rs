use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use promethean::{LevelConfig, LevelGenerator};
use tools::{config_file, init_tracing, invariants, report};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level config file (.toml or .json); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    rooms: Option<usize>,
    /// Room width bounds; given in either order
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    room_width: Option<Vec<usize>>,
    /// Room height bounds; given in either order
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    room_height: Option<Vec<usize>>,
    /// Allow rooms to overlap
    #[arg(long)]
    overlap: bool,
    /// Write the effective config to this path before generating
    #[arg(long)]
    save_config: Option<PathBuf>,
    /// Print the ASCII view of the level
    #[arg(long)]
    ascii: bool,
    /// Print the statistics as JSON instead of the text summary
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn level_config(&self) -> Result<LevelConfig> {
        let mut config = match &self.config {
            Some(path) => config_file::load(path)?,
            None => LevelConfig::default(),
        };
        if let Some(width) = self.width {
            config.level_width = width;
        }
        if let Some(height) = self.height {
            config.level_height = height;
        }
        if let Some(rooms) = self.rooms {
            config.number_of_rooms = rooms;
        }
        if self.room_width.is_some() || self.room_height.is_some() {
            let width = bound_pair(self.room_width.as_deref())
                .unwrap_or((config.min_room_width, config.max_room_width));
            let height = bound_pair(self.room_height.as_deref())
                .unwrap_or((config.min_room_height, config.max_room_height));
            config = config.with_room_size(width, height);
        }
        config.overlap_rooms |= self.overlap;
        Ok(config)
    }
}

fn bound_pair(values: Option<&[usize]>) -> Option<(usize, usize)> {
    match values? {
        &[first, second] => Some((first, second)),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.level_config()?;
    if let Some(path) = &args.save_config {
        config_file::write_atomic(&config, path)?;
        info!(path = %path.display(), "config saved");
    }

    let generator =
        LevelGenerator::new(config.clone()).context("Level configuration is invalid")?;
    let level = generator.generate_seeded(args.seed);

    if args.json {
        let json = serde_json::to_string_pretty(level.statistics())
            .context("Failed to serialize level statistics")?;
        println!("{json}");
    } else {
        println!("{}", report::summary(&config, args.seed, &level));
    }
    if args.ascii {
        print!("{level}");
    }

    if let Err(violation) = invariants::check_level(&config, &level) {
        bail!("Generated level violates an invariant: {violation:?}");
    }
    Ok(())
}
