#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a scripted Tunneler session.

mod script;

use std::{fs, io, path::PathBuf, thread};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use tunneler_core::GameConfig;
use tunneler_rendering::{Frame, RenderingBackend, TextBackend, Viewport};
use tunneler_system_bootstrap::Arena;

/// Runs a headless Tunneler session from a move script.
#[derive(Debug, Parser)]
#[command(name = "tunneler", version, about)]
struct Cli {
    /// JSON file holding a game configuration; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Side length of the square grid.
    #[arg(long)]
    size: Option<u32>,
    /// Number of players.
    #[arg(long)]
    players: Option<u32>,
    /// Health of every dirt cell at the start.
    #[arg(long)]
    dirt_health: Option<u8>,
    /// Ticks per second when pacing in real time.
    #[arg(long)]
    fps: Option<u32>,
    /// Sleep one tick interval between ticks instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Moves to play, e.g. "0w,1e;0w": ticks split by ';', moves by ','.
    #[arg(long, default_value = "")]
    script: String,
    /// Print the whole grid instead of one viewport per player.
    #[arg(long)]
    full: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(health) = self.dirt_health {
            config.dirt_health = health;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        Ok(config)
    }
}

/// Entry point for the Tunneler command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.game_config()?;
    let ticks = script::parse(&cli.script).context("invalid move script")?;
    let mut arena = Arena::new(config).context("failed to set up the arena")?;
    info!(
        "arena ready with {} players on a {}-cell grid",
        arena.players().len(),
        arena.grid().size()
    );
    debug!(
        "screen would be {}x{} px",
        arena.config().screen_width(),
        arena.config().screen_height()
    );

    let tick_limit = usize::try_from(arena.config().tick_limit).unwrap_or(usize::MAX);
    if ticks.len() > tick_limit {
        info!("script truncated to {tick_limit} ticks");
    }
    let pace = cli.realtime.then(|| arena.config().tick_interval());
    for moves in ticks.iter().take(tick_limit) {
        if let Some(interval) = pace {
            thread::sleep(interval);
        }
        for report in arena.tick(moves) {
            match report.result {
                Ok(outcome) => debug!(
                    "tick {}: player {} {:?} -> {outcome:?}",
                    arena.tick_index(),
                    report.player.get(),
                    report.direction
                ),
                Err(error) => info!(
                    "tick {}: player {} {:?} rejected: {error}",
                    arena.tick_index(),
                    report.player.get(),
                    report.direction
                ),
            }
        }
    }

    let mut backend = TextBackend::new(io::stdout().lock());
    if cli.full {
        let frame = Frame::capture(
            arena.grid(),
            Viewport::whole(arena.grid()),
            format!("tick {}", arena.tick_index()),
        );
        return backend.present(&frame);
    }

    for player in arena.players() {
        let viewport = Viewport::centred_on(
            player.coord(),
            arena.config().viewport_units,
            arena.grid().size(),
        );
        let title = format!(
            "player {} at ({}, {})",
            player.id().get(),
            player.coord().column(),
            player.coord().row()
        );
        backend.present(&Frame::capture(arena.grid(), viewport, title))?;
    }
    Ok(())
}
