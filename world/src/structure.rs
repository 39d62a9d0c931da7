//! Multi-cell structures stamped onto the grid in a single operation.

use tunneler_core::{Cell, CellCoord, CellKind, Footprint, FootprintError, PlayerId};

const SMALLEST_BASE: u32 = 3;
const WIDE_ENTRANCE_FROM: u32 = 7;

/// Rectangular block of cells anchored at a footprint.
///
/// `item` is stored row-major: `item[row][column]`, both relative to the
/// footprint's top-left corner. Once stamped with [`crate::Grid::replace`]
/// the grid, not the structure, is authoritative for those cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    footprint: Footprint,
    item: Vec<Vec<Cell>>,
}

impl Structure {
    /// Creates a structure, rejecting cell arrays that do not match the footprint.
    pub fn new(footprint: Footprint, item: Vec<Vec<Cell>>) -> Result<Self, FootprintError> {
        let width = footprint.width();
        let height = footprint.height();
        let actual_height = u32::try_from(item.len()).unwrap_or(u32::MAX);
        let actual_width = item
            .iter()
            .map(|row| u32::try_from(row.len()).unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0);
        let ragged = item
            .iter()
            .any(|row| u32::try_from(row.len()).map_or(true, |len| len != width));

        if actual_height != height || ragged {
            return Err(FootprintError::DimensionMismatch {
                width,
                height,
                actual_width,
                actual_height,
            });
        }

        Ok(Self { footprint, item })
    }

    /// Creates a structure whose every cell holds `kind`.
    #[must_use]
    pub fn filled(footprint: Footprint, kind: CellKind) -> Self {
        let item = build_rows(footprint, |_, _| kind);
        Self { footprint, item }
    }

    /// Creates the standard square base owned by `owner`.
    ///
    /// The perimeter is made of owner-tagged fragments and the interior is
    /// hollow. The north and south walls each carry an entrance centred on
    /// the middle column: three cells wide for bases of side seven or more,
    /// a single cell otherwise.
    pub fn base(owner: PlayerId, top_left: CellCoord, side: u32) -> Result<Self, FootprintError> {
        if side < SMALLEST_BASE {
            return Err(FootprintError::TooSmall {
                width: side,
                height: side,
            });
        }

        let footprint = Footprint::from_origin_and_size(top_left, side, side)?;
        let middle = side / 2;
        let half_entrance = if side >= WIDE_ENTRANCE_FROM { 1 } else { 0 };
        let last = side - 1;

        let item = build_rows(footprint, |column, row| {
            let on_perimeter = column == 0 || row == 0 || column == last || row == last;
            let in_entrance =
                (row == 0 || row == last) && column.abs_diff(middle) <= half_entrance;
            if on_perimeter && !in_entrance {
                CellKind::BaseFragment { owner }
            } else {
                CellKind::Empty
            }
        });

        Ok(Self { footprint, item })
    }

    /// Region of the grid the structure covers.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Cell array in row-major order.
    #[must_use]
    pub fn item(&self) -> &[Vec<Cell>] {
        &self.item
    }

    /// Grid coordinate of the structure's central cell.
    #[must_use]
    pub fn centre(&self) -> CellCoord {
        let top_left = self.footprint.top_left();
        CellCoord::new(
            top_left.column() + self.footprint.width() / 2,
            top_left.row() + self.footprint.height() / 2,
        )
    }
}

fn build_rows<F>(footprint: Footprint, mut kind_at: F) -> Vec<Vec<Cell>>
where
    F: FnMut(u32, u32) -> CellKind,
{
    let top_left = footprint.top_left();
    (0..footprint.height())
        .map(|row| {
            (0..footprint.width())
                .map(|column| {
                    let coord = CellCoord::new(top_left.column() + column, top_left.row() + row);
                    Cell::new(coord, kind_at(column, row))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(structure: &Structure) -> Vec<String> {
        structure
            .item()
            .iter()
            .map(|row| row.iter().map(Cell::tag).collect())
            .collect()
    }

    #[test]
    fn new_rejects_mismatched_rows() {
        let footprint =
            Footprint::new(CellCoord::new(0, 0), CellCoord::new(1, 1)).expect("footprint");
        let item = vec![vec![Cell::wall(CellCoord::new(0, 0)); 2]];
        let result = Structure::new(footprint, item);
        assert_eq!(
            result,
            Err(FootprintError::DimensionMismatch {
                width: 2,
                height: 2,
                actual_width: 2,
                actual_height: 1,
            })
        );
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let footprint =
            Footprint::new(CellCoord::new(0, 0), CellCoord::new(1, 1)).expect("footprint");
        let item = vec![
            vec![Cell::wall(CellCoord::new(0, 0)); 2],
            vec![Cell::wall(CellCoord::new(0, 1)); 3],
        ];
        assert!(matches!(
            Structure::new(footprint, item),
            Err(FootprintError::DimensionMismatch { actual_width: 3, .. })
        ));
    }

    #[test]
    fn new_reports_mismatch_for_grid_spanning_footprints() {
        let footprint = Footprint::new(CellCoord::new(1, 0), CellCoord::new(u32::MAX, 0))
            .expect("footprint");
        let item = vec![vec![Cell::wall(CellCoord::new(1, 0))]];
        assert_eq!(
            Structure::new(footprint, item),
            Err(FootprintError::DimensionMismatch {
                width: u32::MAX,
                height: 1,
                actual_width: 1,
                actual_height: 1,
            })
        );
    }

    #[test]
    fn seven_cell_base_has_wide_entrances() {
        let base = Structure::base(PlayerId::new(0), CellCoord::new(0, 0), 7).expect("base");
        assert_eq!(
            tags(&base),
            vec![
                "bb...bb", "b.....b", "b.....b", "b.....b", "b.....b", "b.....b", "bb...bb",
            ]
        );
    }

    #[test]
    fn small_base_has_single_cell_entrances() {
        let base = Structure::base(PlayerId::new(0), CellCoord::new(4, 4), 5).expect("base");
        assert_eq!(
            tags(&base),
            vec!["bb.bb", "b...b", "b...b", "b...b", "bb.bb"]
        );
        assert_eq!(base.centre(), CellCoord::new(6, 6));
    }

    #[test]
    fn base_rejects_tiny_sides() {
        assert_eq!(
            Structure::base(PlayerId::new(0), CellCoord::new(0, 0), 2),
            Err(FootprintError::TooSmall {
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn base_cells_record_grid_positions() {
        let base = Structure::base(PlayerId::new(3), CellCoord::new(10, 20), 3).expect("base");
        let corner = base.item()[2][2];
        assert_eq!(corner.coord(), CellCoord::new(12, 22));
        assert_eq!(
            corner.kind(),
            CellKind::BaseFragment {
                owner: PlayerId::new(3)
            }
        );
    }
}
