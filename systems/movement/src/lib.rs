#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player movement: turns a directional intent into tunnelling or a step.
//!
//! A [`Player`] never owns the grid. Each call to [`Player::move_in`]
//! borrows the authoritative [`Grid`] for the duration of the decision, reads
//! the neighbouring cell and then either erodes dirt, relocates through the
//! grid's checked move, or reports that the way is blocked.

use log::debug;
use tunneler_core::{Cell, CellCoord, CellKind, Direction, Erosion, GridError, PlayerId};
use tunneler_world::{Grid, Movable};

/// Result of a single accepted move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player dug into dirt and stayed in place.
    Tunneled {
        /// Dirt cell that absorbed the attempt.
        target: CellCoord,
        /// Health left after the attempt.
        erosion: Erosion,
    },
    /// The player stepped onto empty space.
    Moved {
        /// Cell vacated by the player.
        from: CellCoord,
        /// Cell now occupied by the player.
        to: CellCoord,
    },
    /// The neighbouring cell cannot be entered or dug; nothing changed.
    Blocked {
        /// Cell that rejected the move.
        target: CellCoord,
        /// Occupant found there.
        kind: CellKind,
    },
}

/// Avatar of a player inside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    coord: CellCoord,
}

impl Player {
    /// Places the avatar for `id` at `coord`, overwriting whatever was there.
    pub fn spawn(id: PlayerId, coord: CellCoord, grid: &mut Grid) -> Result<Self, GridError> {
        let player = Self { id, coord };
        grid.set(coord, player.occupant())?;
        debug!("player {} spawned at {coord:?}", id.get());
        Ok(player)
    }

    /// Identifier of the player.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Position the player last recorded for itself.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Attempts a single step in `direction`.
    ///
    /// Dirt ahead is eroded and the turn ends with the player in place; empty
    /// space ahead is entered; anything else blocks the move without side
    /// effects. Stepping off the grid fails with [`GridError::OutOfBounds`]
    /// and leaves the player where it was.
    pub fn move_in(
        &mut self,
        grid: &mut Grid,
        direction: Direction,
    ) -> Result<MoveOutcome, GridError> {
        let (column, row) = self.coord.probe(direction);
        let target = grid.coord_at(column, row)?;
        let ahead = grid.get(target)?.kind();

        match ahead {
            CellKind::Dirt { .. } => {
                let erosion = grid.tunnel(target)?;
                debug!("player {} tunnels {direction:?} into {target:?}", self.id.get());
                Ok(MoveOutcome::Tunneled { target, erosion })
            }
            CellKind::Empty => {
                let from = self.coord;
                grid.move_obj(target, self)?;
                Ok(MoveOutcome::Moved { from, to: target })
            }
            CellKind::Wall | CellKind::BaseFragment { .. } | CellKind::Player { .. } => {
                Ok(MoveOutcome::Blocked {
                    target,
                    kind: ahead,
                })
            }
        }
    }
}

impl Movable for Player {
    fn coord(&self) -> CellCoord {
        self.coord
    }

    fn relocate(&mut self, to: CellCoord) {
        self.coord = to;
    }

    fn occupant(&self) -> Cell {
        Cell::player(self.coord, self.id)
    }
}
