//! Galaxy allocation CLI.
//!
//! Usage:
//!   cargo run -- 6
//!   cargo run -- 4 --seed 42 --format text
//!   cargo run -- 5 --json

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use ti4_galaxy_allocator::allocator::engine::allocate;
use ti4_galaxy_allocator::format::{
    load_default_profiles, load_profiles, render_allocation, AllocationReport,
};

#[derive(Parser)]
#[command(name = "ti4-galaxy-allocator", about = "Allocate galaxy tiles for TI4")]
struct Cli {
    /// Number of players (4, 5, or 6)
    num_players: u32,

    /// Random seed (drawn from entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Format profile name: "html", "text", or a name from the profiles file
    #[arg(long, default_value = "html")]
    format: String,

    /// Path to format_profiles.toml (default: auto-discover)
    #[arg(long, env = "TI4_FORMAT_PROFILES")]
    profiles: Option<PathBuf>,

    /// Emit the allocation as JSON instead of templated text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = allocate(cli.num_players, &mut rng)?;

    if cli.json {
        let report = AllocationReport::from_state(&state);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path).map_err(|e| format!("Failed to load profiles: {}", e))?,
        None => load_default_profiles(),
    };
    let profile = profiles
        .resolve(&cli.format)
        .ok_or_else(|| format!("Unknown format profile: {}", cli.format))?;

    println!("{}", render_allocation(&state, &profile));
    Ok(())
}
