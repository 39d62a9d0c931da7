//! Session configuration supplied by the embedding layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Side length of the square grid when no override is supplied.
pub const DEFAULT_GRID_SIZE: u32 = 40;
/// Number of players taking part when no override is supplied.
pub const DEFAULT_PLAYER_COUNT: u32 = 2;
/// Tunnelling attempts a freshly placed dirt cell absorbs.
pub const DEFAULT_DIRT_HEALTH: u8 = 1;
/// Side length of a player's base.
pub const DEFAULT_BASE_SIZE: u32 = 7;

const DEFAULT_FPS: u32 = 30;
const DEFAULT_TICK_LIMIT: u32 = 50;
const DEFAULT_PIXELS_PER_UNIT: u32 = 29;
const DEFAULT_VIEWPORT_UNITS: u32 = 11;
const DEFAULT_HUD_HEIGHT: u32 = 80;

/// Tunable parameters for a single arena session.
///
/// Every field falls back to its default when omitted from a serialized
/// configuration, so partial documents are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid in cells.
    pub grid_size: u32,
    /// Number of players to place. Grid construction accepts but ignores it.
    pub player_count: u32,
    /// Health assigned to every dirt cell at construction.
    pub dirt_health: u8,
    /// Side length of each player's base in cells.
    pub base_size: u32,
    /// Simulation ticks per second.
    pub fps: u32,
    /// Maximum number of ticks a scripted session runs.
    pub tick_limit: u32,
    /// Edge length of a rendered cell in pixels.
    pub pixels_per_unit: u32,
    /// Number of cells visible along each viewport edge.
    pub viewport_units: u32,
    /// Height of the heads-up display strip in pixels.
    pub hud_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            player_count: DEFAULT_PLAYER_COUNT,
            dirt_health: DEFAULT_DIRT_HEALTH,
            base_size: DEFAULT_BASE_SIZE,
            fps: DEFAULT_FPS,
            tick_limit: DEFAULT_TICK_LIMIT,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            viewport_units: DEFAULT_VIEWPORT_UNITS,
            hud_height: DEFAULT_HUD_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Viewport width in pixels.
    #[must_use]
    pub const fn viewport_width(&self) -> u32 {
        self.viewport_units * self.pixels_per_unit
    }

    /// Viewport height in pixels.
    #[must_use]
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_units * self.pixels_per_unit
    }

    /// Window width in pixels.
    #[must_use]
    pub const fn screen_width(&self) -> u32 {
        self.viewport_width()
    }

    /// Window height in pixels, HUD included.
    #[must_use]
    pub const fn screen_height(&self) -> u32 {
        self.viewport_height() + self.hud_height
    }

    /// Wall-clock time between two ticks. Zero when `fps` is zero.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        if self.fps == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(1) / self.fps
    }
}
