#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map setup and per-tick move application for a Tunneler session.

use std::collections::BTreeSet;

use log::{debug, warn};
use thiserror::Error;
use tunneler_core::{CellCoord, Direction, GameConfig, GridError, PlayerId};
use tunneler_system_movement::{MoveOutcome, Player};
use tunneler_world::{Grid, Structure};

/// Largest number of players that fit into the corner layout.
pub const MAX_PLAYERS: u32 = 4;

const BASE_MARGIN: u32 = 2;

/// Reasons an arena cannot be prepared.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// More players were requested than there are base corners.
    #[error("{requested} players requested, at most {max} are supported")]
    TooManyPlayers {
        /// Requested head count.
        requested: u32,
        /// Supported head count.
        max: u32,
    },
    /// The grid cannot hold two bases side by side with their margins.
    #[error("a {grid_size}-cell grid cannot hold {base_size}-cell bases")]
    GridTooSmall {
        /// Configured grid side length.
        grid_size: u32,
        /// Configured base side length.
        base_size: u32,
    },
    /// A grid operation failed while building the map.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result of one requested move within a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Player that requested the move.
    pub player: PlayerId,
    /// Direction requested.
    pub direction: Direction,
    /// What happened, or why the request failed.
    pub result: Result<MoveOutcome, GridError>,
}

/// A prepared session: the grid, one base per player and the players themselves.
#[derive(Debug)]
pub struct Arena {
    config: GameConfig,
    grid: Grid,
    players: Vec<Player>,
    tick_index: u64,
}

impl Arena {
    /// Builds a dirt-filled grid, stamps every base and spawns each player at
    /// the centre of its base.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        if config.player_count > MAX_PLAYERS {
            warn!(
                "rejecting arena for {} players, at most {MAX_PLAYERS} supported",
                config.player_count
            );
            return Err(SetupError::TooManyPlayers {
                requested: config.player_count,
                max: MAX_PLAYERS,
            });
        }

        let needed = config
            .base_size
            .saturating_add(2 * BASE_MARGIN)
            .saturating_mul(2);
        if config.grid_size < needed {
            warn!(
                "rejecting {}-cell grid, {} cells needed for the bases",
                config.grid_size, needed
            );
            return Err(SetupError::GridTooSmall {
                grid_size: config.grid_size,
                base_size: config.base_size,
            });
        }

        let mut grid = Grid::from_config(&config)?;
        let mut players = Vec::new();
        for index in 0..config.player_count {
            let id = PlayerId::new(index);
            let anchor = base_anchor(index, config.grid_size, config.base_size);
            let base = Structure::base(id, anchor, config.base_size).map_err(GridError::from)?;
            grid.replace(&base)?;
            players.push(Player::spawn(id, base.centre(), &mut grid)?);
        }

        debug!(
            "arena ready: {0}x{0} grid, {1} players",
            config.grid_size, config.player_count
        );
        Ok(Self {
            config,
            grid,
            players,
            tick_index: 0,
        })
    }

    /// Applies at most one move per player, in the order given.
    ///
    /// Requests for unknown players and repeated requests from a player that
    /// already moved this tick are dropped.
    pub fn tick(&mut self, moves: &[(PlayerId, Direction)]) -> Vec<MoveReport> {
        self.tick_index = self.tick_index.saturating_add(1);
        let mut moved = BTreeSet::new();
        let mut reports = Vec::with_capacity(moves.len());

        for &(id, direction) in moves {
            if !moved.insert(id) {
                debug!("tick {}: player {} already moved", self.tick_index, id.get());
                continue;
            }
            let Some(player) = self.players.iter_mut().find(|player| player.id() == id) else {
                warn!("tick {}: unknown player {}", self.tick_index, id.get());
                continue;
            };

            let result = player.move_in(&mut self.grid, direction);
            reports.push(MoveReport {
                player: id,
                direction,
                result,
            });
        }

        reports
    }

    /// Configuration the arena was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only access to the authoritative grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Players in ascending identifier order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by identifier.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub const fn tick_index(&self) -> u64 {
        self.tick_index
    }
}

/// Top-left corner of the base for the player at `index`.
///
/// Players 0 and 1 face each other across the north-west/south-east
/// diagonal, players 2 and 3 across the north-east/south-west one.
fn base_anchor(index: u32, grid_size: u32, base_size: u32) -> CellCoord {
    let near = BASE_MARGIN;
    let far = grid_size - BASE_MARGIN - base_size;
    match index {
        0 => CellCoord::new(near, near),
        1 => CellCoord::new(far, far),
        2 => CellCoord::new(far, near),
        _ => CellCoord::new(near, far),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_sit_in_opposite_corners() {
        assert_eq!(base_anchor(0, 40, 7), CellCoord::new(2, 2));
        assert_eq!(base_anchor(1, 40, 7), CellCoord::new(31, 31));
        assert_eq!(base_anchor(2, 40, 7), CellCoord::new(31, 2));
        assert_eq!(base_anchor(3, 40, 7), CellCoord::new(2, 31));
    }
}
