use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Open,
    Wall,
}

/// Immutable rectangular map of walkable and blocked cells.
///
/// Queries are pure and total: probing outside the bounds answers `Wall`
/// rather than failing, so callers can test arbitrary neighbor coordinates
/// without bounds-checking first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Builds a grid from rows of `0` (open) / non-zero (wall) bytes.
    ///
    /// Rows must be non-empty and rectangular; this is a construction-time
    /// precondition, not a runtime error path, so violations panic.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        assert!(!rows.is_empty(), "grid needs at least one row");
        let width = rows[0].as_ref().len();
        assert!(width > 0, "grid rows must not be empty");
        assert!(
            rows.iter().all(|row| row.as_ref().len() == width),
            "grid rows must all have the same length"
        );

        let tiles = rows
            .iter()
            .flat_map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&byte| if byte == 0 { TileKind::Open } else { TileKind::Wall })
            })
            .collect();

        Self { width, height: rows.len(), tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    pub fn tile_at(&self, cell: Cell) -> TileKind {
        if !self.in_bounds(cell) {
            return TileKind::Wall;
        }
        self.tiles[self.index(cell)]
    }

    /// True iff `cell` lies within bounds and is marked open.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.tile_at(cell) == TileKind::Open
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y as usize) * self.width + (cell.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_rows(&[[1u8, 1, 1], [1, 0, 0], [1, 1, 1]])
    }

    #[test]
    fn open_cell_is_walkable() {
        let grid = corridor();
        assert!(grid.is_walkable(Cell::new(1, 1)));
        assert!(grid.is_walkable(Cell::new(2, 1)));
    }

    #[test]
    fn wall_cell_is_not_walkable() {
        let grid = corridor();
        assert!(!grid.is_walkable(Cell::new(0, 0)));
        assert_eq!(grid.tile_at(Cell::new(1, 0)), TileKind::Wall);
    }

    #[test]
    fn out_of_bounds_probes_answer_wall_without_panicking() {
        let grid = corridor();
        assert!(!grid.is_walkable(Cell::new(-1, 1)));
        assert!(!grid.is_walkable(Cell::new(1, -1)));
        assert!(!grid.is_walkable(Cell::new(3, 1)));
        assert!(!grid.is_walkable(Cell::new(1, 3)));
        assert_eq!(grid.tile_at(Cell::new(i32::MIN, i32::MAX)), TileKind::Wall);
    }

    #[test]
    fn bounds_report_width_and_height() {
        assert_eq!(corridor().bounds(), (3, 3));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn ragged_rows_are_rejected_at_construction() {
        let rows: [&[u8]; 2] = [&[1, 1, 1], &[1, 0]];
        let _ = Grid::from_rows(&rows);
    }

    #[test]
    #[should_panic(expected = "at least one row")]
    fn empty_grid_is_rejected_at_construction() {
        let rows: [&[u8]; 0] = [];
        let _ = Grid::from_rows(&rows);
    }
}
