//! Walled square grid that answers movement legality queries.

use labyrinth_core::{CellCoord, Direction, Edge, WallOrientation, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Square cell grid with independently toggleable walls on interior edges.
///
/// Vertical walls separate `(x, y)` from `(x + 1, y)` and horizontal walls
/// separate `(x, y)` from `(x, y + 1)`. Both matrices are stored row-major.
/// The border is closed: crossing it is never legal, whatever the wall state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u32,
    vertical: Vec<bool>,
    horizontal: Vec<bool>,
}

impl Board {
    /// Creates an open board, or `None` when the size is outside the supported range.
    pub(crate) fn new(size: u32) -> Option<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return None;
        }

        let side = usize::try_from(size).ok()?;
        let segments = side.checked_mul(side - 1)?;
        Some(Self {
            size,
            vertical: vec![false; segments],
            horizontal: vec![false; segments],
        })
    }

    /// Number of cells along each edge of the board.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.size && cell.row() < self.size
    }

    /// Reports whether a wall is set on the edge. Out-of-range edges carry no wall.
    #[must_use]
    pub fn has_wall(&self, edge: Edge) -> bool {
        self.edge_index(edge)
            .and_then(|index| self.segments(edge.orientation()).get(index).copied())
            .unwrap_or(false)
    }

    /// Reports whether a single step from `cell` in `direction` is legal.
    #[must_use]
    pub fn can_move(&self, cell: CellCoord, direction: Direction) -> bool {
        self.neighbor(cell, direction).is_some()
    }

    /// Cell reached by a step, or the starting cell when the step is illegal.
    #[must_use]
    pub fn step(&self, cell: CellCoord, direction: Direction) -> CellCoord {
        self.neighbor(cell, direction).unwrap_or(cell)
    }

    /// Adjacent cell in `direction` when no border or wall is in the way.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }

        let (column, row) = (cell.column(), cell.row());
        let last = self.size - 1;
        let (crossed, next) = match direction {
            Direction::Up if row > 0 => (
                Edge::horizontal(column, row - 1),
                CellCoord::new(column, row - 1),
            ),
            Direction::Down if row < last => {
                (Edge::horizontal(column, row), CellCoord::new(column, row + 1))
            }
            Direction::Left if column > 0 => (
                Edge::vertical(column - 1, row),
                CellCoord::new(column - 1, row),
            ),
            Direction::Right if column < last => {
                (Edge::vertical(column, row), CellCoord::new(column + 1, row))
            }
            _ => return None,
        };

        if self.has_wall(crossed) {
            None
        } else {
            Some(next)
        }
    }

    /// Cells visited by a straight line leaving `origin`, excluding `origin` itself.
    ///
    /// The walk stops before the first wall or the border.
    pub fn ray(&self, origin: CellCoord, direction: Direction) -> Ray<'_> {
        Ray {
            board: self,
            cursor: origin,
            direction,
        }
    }

    /// Flips the wall on the edge, returning whether a wall is now present.
    ///
    /// Returns `None` without mutating anything when the edge is out of range.
    pub(crate) fn toggle_wall(&mut self, edge: Edge) -> Option<bool> {
        let index = self.edge_index(edge)?;
        let segments = match edge.orientation() {
            WallOrientation::Vertical => &mut self.vertical,
            WallOrientation::Horizontal => &mut self.horizontal,
        };
        let slot = segments.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Every edge that currently holds a wall, vertical edges first.
    pub fn walls(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges().filter(|edge| self.has_wall(*edge))
    }

    /// Every interior edge of the board, vertical edges first.
    pub fn edges(&self) -> impl Iterator<Item = Edge> {
        let size = self.size;
        let last = size - 1;
        let vertical = (0..size)
            .flat_map(move |row| (0..last).map(move |column| Edge::vertical(column, row)));
        let horizontal = (0..last)
            .flat_map(move |row| (0..size).map(move |column| Edge::horizontal(column, row)));
        vertical.chain(horizontal)
    }

    fn segments(&self, orientation: WallOrientation) -> &[bool] {
        match orientation {
            WallOrientation::Vertical => &self.vertical,
            WallOrientation::Horizontal => &self.horizontal,
        }
    }

    fn edge_index(&self, edge: Edge) -> Option<usize> {
        let (columns, rows) = match edge.orientation() {
            WallOrientation::Vertical => (self.size - 1, self.size),
            WallOrientation::Horizontal => (self.size, self.size - 1),
        };
        if edge.column() >= columns || edge.row() >= rows {
            return None;
        }

        let width = usize::try_from(columns).ok()?;
        let column = usize::try_from(edge.column()).ok()?;
        let row = usize::try_from(edge.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Iterator over the cells crossed by a straight line on the board.
#[derive(Clone, Debug)]
pub struct Ray<'a> {
    board: &'a Board,
    cursor: CellCoord,
    direction: Direction,
}

impl Iterator for Ray<'_> {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.board.neighbor(self.cursor, self.direction)?;
        self.cursor = next;
        Some(next)
    }
}
