#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering of the Tunneler grid for headless adapters.
//!
//! Every cell is drawn with its type tag. A [`Viewport`] selects the square
//! window of cells visible to one player; [`Frame`] captures the resulting
//! text so any [`RenderingBackend`] can present it.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use tunneler_core::CellCoord;
use tunneler_world::Grid;

/// Square window of cells, clamped so it never extends past the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    origin: CellCoord,
    units: u32,
}

impl Viewport {
    /// Window of `units` cells per edge centred on `focus` where possible.
    ///
    /// Near the grid edge the window slides inward instead of showing cells
    /// outside the grid. Windows larger than the grid shrink to the grid.
    #[must_use]
    pub fn centred_on(focus: CellCoord, units: u32, grid_size: u32) -> Self {
        let units = units.min(grid_size);
        let half = units / 2;
        let limit = grid_size - units;
        let origin = CellCoord::new(
            focus.column().saturating_sub(half).min(limit),
            focus.row().saturating_sub(half).min(limit),
        );
        Self { origin, units }
    }

    /// Window covering the whole grid.
    #[must_use]
    pub const fn whole(grid: &Grid) -> Self {
        Self {
            origin: CellCoord::new(0, 0),
            units: grid.size(),
        }
    }

    /// Top-left cell of the window.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Cells per window edge.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.units
    }
}

/// Rendered text of one viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    title: String,
    lines: Vec<String>,
}

impl Frame {
    /// Draws the cells inside `viewport` using their type tags.
    #[must_use]
    pub fn capture(grid: &Grid, viewport: Viewport, title: impl Into<String>) -> Self {
        let origin = viewport.origin();
        let lines = (0..viewport.units())
            .map(|row| {
                (0..viewport.units())
                    .map(|column| {
                        let coord =
                            CellCoord::new(origin.column() + column, origin.row() + row);
                        grid.get(coord).map_or(' ', |cell| cell.tag())
                    })
                    .collect()
            })
            .collect();

        Self {
            title: title.into(),
            lines,
        }
    }

    /// Heading printed above the cells.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// One string per grid row, north to south.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Destination for rendered frames.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

/// Backend that writes frames as plain text.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        writeln!(self.out, "{}", frame.title()).context("failed to write frame title")?;
        for line in frame.lines() {
            writeln!(self.out, "{line}").context("failed to write frame row")?;
        }
        writeln!(self.out).context("failed to write frame separator")?;
        Ok(())
    }
}
