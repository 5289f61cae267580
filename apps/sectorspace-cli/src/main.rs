use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::DVec2;
use sectorspace_common::Dimensions;
use sectorspace_index::{SectorConfig, SectorTree, UpdateTimer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sectorspace-cli", about = "CLI tool for sector tree operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default settings
    Info,
    /// Walk through partitioning with coincident entities
    Demo,
    /// Load a config file (JSON or YAML) and optionally index a JSON array of entities
    Validate {
        /// Path to the tree configuration
        config: PathBuf,
        /// JSON file holding an array of entity records
        #[arg(short, long)]
        entities: Option<PathBuf>,
    },
    /// Time insert, query, update and remove on random 2D points
    Bench {
        /// Number of entities to insert
        #[arg(short, long, default_value = "10000")]
        entities: usize,
        /// Sector capacity
        #[arg(short, long, default_value = "16")]
        capacity: usize,
        /// Number of move + update passes
        #[arg(short, long, default_value = "20")]
        ticks: usize,
        /// RNG seed for reproducible layouts
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("sectorspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("index: {}", sectorspace_index::crate_info());
            println!(
                "defaults: child_extent={} coordinate_resolution={}",
                sectorspace_index::DEFAULT_CHILD_EXTENT,
                sectorspace_index::DEFAULT_COORDINATE_RESOLUTION
            );
        }
        Commands::Demo => run_demo()?,
        Commands::Validate { config, entities } => run_validate(&config, entities.as_deref())?,
        Commands::Bench {
            entities,
            capacity,
            ticks,
            seed,
        } => run_bench(entities, capacity, ticks, seed)?,
    }

    Ok(())
}

fn run_demo() -> Result<()> {
    let config = SectorConfig::new(Dimensions::xy(), 5).with_child_extent(100.0);
    let mut tree = SectorTree::new(config)?;

    println!("Inserting 6 coincident entities at (0, 0) with capacity 5");
    for _ in 0..6 {
        tree.insert(DVec2::ZERO)?;
    }
    println!("{}", tree.stats());

    println!("Inserting one entity at (100, 100)");
    let far = tree.insert(DVec2::new(100.0, 100.0))?;
    println!("{}", tree.stats());

    let root = tree.sector(tree.root()).context("root sector missing")?;
    for (key, child) in root.children() {
        if let Some(info) = tree.describe(child) {
            println!("  cell {key}: {info}");
        }
    }

    println!("Moving it to (-450, 20) and running update");
    if let Some(p) = tree.get_mut(far) {
        *p = DVec2::new(-450.0, 20.0);
    }
    let moved = tree.update()?;
    println!("relocated={moved} {}", tree.stats());

    let near = tree.neighbors_within_distance(&[-440.0, 20.0], 15.0)?;
    println!("neighbors of (-440, 20) within 15: {}", near.len());
    Ok(())
}

fn load_config(path: &Path) -> Result<SectorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: SectorConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML config {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON config {}", path.display()))?,
    };
    Ok(config)
}

fn run_validate(config_path: &Path, entities: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut tree: SectorTree<serde_json::Value> = SectorTree::new(config)?;
    println!(
        "config OK: dimensions={} capacity={}",
        tree.dimensions(),
        tree.capacity()
    );

    if let Some(path) = entities {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let records: Vec<serde_json::Value> = serde_json::from_str(&text)
            .with_context(|| format!("parsing entities {}", path.display()))?;
        for (i, record) in records.into_iter().enumerate() {
            tree.insert(record)
                .with_context(|| format!("entity #{i} in {}", path.display()))?;
        }
        println!("{}", tree.stats());
    }
    Ok(())
}

fn run_bench(entities: usize, capacity: usize, ticks: usize, seed: u64) -> Result<()> {
    let config = SectorConfig::new(Dimensions::xy(), capacity);
    let mut tree = SectorTree::new(config)?;
    let mut rng = SplitMix64(seed);
    const SPAN: f64 = 10_000.0;

    let start = Instant::now();
    let mut keys = Vec::with_capacity(entities);
    for _ in 0..entities {
        keys.push(tree.insert(DVec2::new(rng.next_f64() * SPAN, rng.next_f64() * SPAN))?);
    }
    println!("insert: {:?} total, {}", start.elapsed(), tree.stats());

    let start = Instant::now();
    let hits = tree.query(&[2_500.0, 2_500.0], &[7_500.0, 7_500.0])?;
    println!("range query: {} hits in {:?}", hits.len(), start.elapsed());

    let start = Instant::now();
    let near = tree.neighbors_within_distance(&[SPAN / 2.0, SPAN / 2.0], SPAN / 20.0)?;
    println!("radius query: {} hits in {:?}", near.len(), start.elapsed());

    let mut timer = UpdateTimer::new(ticks);
    for _ in 0..ticks {
        for key in keys.iter().step_by(8) {
            if let Some(p) = tree.get_mut(*key) {
                p.x = (p.x + (rng.next_f64() - 0.5) * 200.0).clamp(0.0, SPAN);
                p.y = (p.y + (rng.next_f64() - 0.5) * 200.0).clamp(0.0, SPAN);
            }
        }
        timer.run(&mut tree)?;
    }
    println!("{timer}");
    if let Some(slowest) = timer.slowest() {
        println!(
            "slowest pass: {:?} moving {} entities",
            slowest.elapsed, slowest.relocated
        );
    }

    let start = Instant::now();
    for key in keys {
        tree.remove(key);
    }
    println!("remove: {:?} total, {}", start.elapsed(), tree.stats());
    Ok(())
}

/// Splitmix64 generator, so a seed reproduces the same layout on every platform.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
