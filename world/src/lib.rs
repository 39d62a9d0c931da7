#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid state for the Tunneler arena.

mod structure;

pub use structure::Structure;

use log::debug;
use tunneler_core::{Cell, CellCoord, Erosion, Fill, FootprintError, GameConfig, GridError};

/// Anything that occupies a single cell and can be relocated by the grid.
pub trait Movable {
    /// Position the mover believes it occupies.
    fn coord(&self) -> CellCoord;

    /// Records a new position after the grid relocated the mover.
    fn relocate(&mut self, to: CellCoord);

    /// Cell written into the grid at the mover's position.
    fn occupant(&self) -> Cell;
}

impl Movable for Cell {
    fn coord(&self) -> CellCoord {
        Cell::coord(self)
    }

    fn relocate(&mut self, to: CellCoord) {
        self.set_coord(to);
    }

    fn occupant(&self) -> Cell {
        *self
    }
}

/// Square board of cells; the single source of truth for occupancy.
///
/// Every in-bounds coordinate holds exactly one [`Cell`] at all times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    player_count: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `size` x `size` grid where every cell is a fresh `fill` cell.
    ///
    /// `player_count` is recorded for callers that size maps by head count,
    /// but does not alter construction.
    pub fn new(size: u32, player_count: u32, fill: Fill) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize { size });
        }
        let capacity = usize::try_from(u64::from(size) * u64::from(size))
            .map_err(|_| GridError::InvalidSize { size })?;

        let mut cells = Vec::with_capacity(capacity);
        for row in 0..size {
            for column in 0..size {
                cells.push(fill.cell_at(CellCoord::new(column, row)));
            }
        }

        debug!("created {size}x{size} grid for {player_count} players filled with {fill:?}");
        Ok(Self {
            size,
            player_count,
            cells,
        })
    }

    /// Creates a dirt-filled grid sized by the provided configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, GridError> {
        Self::new(
            config.grid_size,
            config.player_count,
            Fill::Dirt(config.dirt_health),
        )
    }

    /// Side length of the grid in cells.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Player count the grid was created for.
    #[must_use]
    pub const fn player_count(&self) -> u32 {
        self.player_count
    }

    /// Reports whether `coord` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.size && coord.row() < self.size
    }

    /// Resolves possibly negative coordinates into an in-bounds cell coordinate.
    pub fn coord_at(&self, column: i64, row: i64) -> Result<CellCoord, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            column,
            row,
            size: self.size,
        };
        let column = u32::try_from(column).map_err(|_| out_of_bounds)?;
        let row = u32::try_from(row).map_err(|_| out_of_bounds)?;
        let coord = CellCoord::new(column, row);
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(out_of_bounds)
        }
    }

    /// Returns the cell stored at `coord`.
    pub fn get(&self, coord: CellCoord) -> Result<&Cell, GridError> {
        let index = self.index(coord)?;
        Ok(&self.cells[index])
    }

    /// Overwrites the cell stored at `coord`.
    ///
    /// This is a low-level primitive: neither the previous occupant nor the
    /// legality of the new one is checked, and the cell is stored as given.
    pub fn set(&mut self, coord: CellCoord, cell: Cell) -> Result<(), GridError> {
        let index = self.index(coord)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Relocates `obj` onto `to`, leaving empty space behind.
    ///
    /// The destination must be in bounds and empty, and `obj` must still be
    /// stored at the position it records for itself. On error the grid and
    /// `obj` are left untouched.
    pub fn move_obj<M: Movable>(&mut self, to: CellCoord, obj: &mut M) -> Result<(), GridError> {
        let destination = *self.get(to)?;
        if !destination.kind().is_empty() {
            return Err(GridError::DestinationBlocked {
                coord: to,
                tag: destination.tag(),
            });
        }

        let from = obj.coord();
        let current = *self.get(from)?;
        if current.kind() != obj.occupant().kind() {
            return Err(GridError::OccupantMissing {
                coord: from,
                tag: current.tag(),
            });
        }

        self.move_obj_unchecked(to, obj);
        Ok(())
    }

    /// Relocates `obj` onto `to` without any legality checks.
    ///
    /// Callers must already have confirmed that `to` is in bounds and empty
    /// and that `obj` is stored at its recorded position. Violating that
    /// contract leaves the grid in an inconsistent state.
    pub(crate) fn move_obj_unchecked<M: Movable>(&mut self, to: CellCoord, obj: &mut M) {
        let from = obj.coord();
        if let Ok(index) = self.index(from) {
            self.cells[index] = Cell::empty(from);
        }

        obj.relocate(to);
        if let Ok(index) = self.index(to) {
            self.cells[index] = obj.occupant();
        }
        debug!("moved '{}' from {from:?} to {to:?}", obj.occupant().tag());
    }

    /// Removes one unit of health from the dirt at `coord`.
    ///
    /// Dirt whose health is exhausted is replaced with empty space in the
    /// same call.
    pub fn tunnel(&mut self, coord: CellCoord) -> Result<Erosion, GridError> {
        let index = self.index(coord)?;
        let cell = &mut self.cells[index];
        let Some(erosion) = cell.decrement_health() else {
            return Err(GridError::NotTunnelable {
                coord,
                tag: cell.tag(),
            });
        };

        if erosion == Erosion::Exhausted {
            *cell = Cell::empty(coord);
            debug!("dirt at {coord:?} cleared");
        }
        Ok(erosion)
    }

    /// Stamps `structure` onto its footprint, row by row.
    ///
    /// The whole footprint is validated before anything is written, so a
    /// rejected structure leaves the grid unchanged. Stamped cells have their
    /// recorded position set to the grid position they land on.
    pub fn replace(&mut self, structure: &Structure) -> Result<(), GridError> {
        let footprint = structure.footprint();
        let bottom_right = footprint.bottom_right();
        if !self.contains(bottom_right) {
            return Err(FootprintError::ExceedsGrid {
                bottom_right,
                size: self.size,
            }
            .into());
        }

        let top_left = footprint.top_left();
        for (row_offset, row) in (0..).zip(structure.item()) {
            for (column_offset, cell) in (0..).zip(row) {
                let coord = CellCoord::new(
                    top_left.column() + column_offset,
                    top_left.row() + row_offset,
                );
                let mut placed = *cell;
                placed.set_coord(coord);
                self.set(coord, placed)?;
            }
        }

        debug!(
            "stamped {}x{} structure at {top_left:?}",
            footprint.width(),
            footprint.height()
        );
        Ok(())
    }

    /// Iterator over the grid rows, north to south.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let width = usize::try_from(self.size).unwrap_or(usize::MAX);
        self.cells.chunks(width)
    }

    /// Every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, coord: CellCoord) -> Result<usize, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            column: i64::from(coord.column()),
            row: i64::from(coord.row()),
            size: self.size,
        };
        if !self.contains(coord) {
            return Err(out_of_bounds);
        }
        let row = usize::try_from(coord.row()).map_err(|_| out_of_bounds)?;
        let column = usize::try_from(coord.column()).map_err(|_| out_of_bounds)?;
        let width = usize::try_from(self.size).map_err(|_| out_of_bounds)?;
        Ok(row * width + column)
    }
}
