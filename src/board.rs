//! Board: fixed-size grid of cells with a floor sentinel row below the playfield.

use crate::shapes::{ColorId, Shape};
use std::collections::VecDeque;

/// Single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(ColorId),
    /// Only ever found in the sentinel row; disjoint from every colour id.
    Floor,
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        !matches!(self, Self::Empty)
    }

    #[inline]
    pub fn color(self) -> Option<ColorId> {
        match self {
            Self::Block(c) => Some(c),
            _ => None,
        }
    }
}

/// Playfield grid. y=0 is top; rows `0..rows` are playable, row `rows` is the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// grid[y][x]; always `rows + 1` rows of `cols` cells.
    grid: VecDeque<Vec<Cell>>,
}

impl Board {
    /// Zeroed board of `rows` playable rows plus the floor row.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid: VecDeque<Vec<Cell>> = (0..rows).map(|_| vec![Cell::Empty; cols]).collect();
        grid.push_back(vec![Cell::Floor; cols]);
        Self { cols, rows, grid }
    }

    /// Playable rows (the sentinel is not counted).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(x, y)`, including the floor row at `y == rows`. `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Write a playable cell. Returns false for the floor row or out-of-range coordinates.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if y >= self.rows || x >= self.cols || cell == Cell::Floor {
            return false;
        }
        self.grid[y][x] = cell;
        true
    }

    /// Playable rows, top first.
    pub fn playable_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.grid.iter().take(self.rows).map(Vec::as_slice)
    }

    /// True if any filled cell of `shape` at `(x, y)` lands outside `[0, cols) × [0, rows)`
    /// or on an occupied cell. Empty shape cells are never checked.
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.filled_cells().any(|(dx, dy, _)| {
            let bx = x + dx as i32;
            let by = y + dy as i32;
            if bx < 0 || by < 0 || bx as usize >= self.cols || by as usize >= self.rows {
                return true;
            }
            self.grid[by as usize][bx as usize].is_occupied()
        })
    }

    /// Stamp every filled cell of `shape` at `(x, y)`, overwriting whatever is there.
    /// Cells that fall outside the playable rows are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i32, y: i32) {
        for (dx, dy, color) in shape.filled_cells() {
            let bx = x + dx as i32;
            let by = y + dy as i32;
            if bx < 0 || by < 0 {
                continue;
            }
            self.set(bx as usize, by as usize, Cell::Block(color));
        }
    }

    /// A playable row is full when every cell across the width is occupied.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.rows && self.grid[y].iter().all(|c| c.is_occupied())
    }

    /// Remove playable row `y` and insert an empty row at the top. The floor row is never removed.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.rows {
            return;
        }
        self.grid.remove(y);
        self.grid.push_front(vec![Cell::Empty; self.cols]);
    }

    /// Clear every full playable row; returns how many were cleared.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        // Removing row `y` shifts only the rows above it down, so scanning on from `y + 1` is safe.
        for y in 0..self.rows {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeCatalog, ShapeKind};

    fn block(v: u8) -> Cell {
        Cell::Block(ColorId::new(v).unwrap())
    }

    fn fill_row(board: &mut Board, y: usize, color: u8) {
        for x in 0..board.cols() {
            board.set(x, y, block(color));
        }
    }

    #[test]
    fn new_board_has_floor_row() {
        let board = Board::new(20, 10);
        assert_eq!(board.rows(), 20);
        assert_eq!(board.cols(), 10);
        assert!(board.playable_rows().all(|r| r.iter().all(|c| *c == Cell::Empty)));
        for x in 0..10 {
            assert_eq!(board.get(x, 20), Some(Cell::Floor));
        }
        assert_eq!(board.get(0, 21), None);
        assert_eq!(board.get(10, 0), None);
    }

    #[test]
    fn set_refuses_floor_and_out_of_range() {
        let mut board = Board::new(4, 4);
        assert!(!board.set(0, 4, Cell::Empty));
        assert!(!board.set(4, 0, block(1)));
        assert!(!board.set(0, 0, Cell::Floor));
        assert!(board.set(3, 3, block(2)));
        assert_eq!(board.get(3, 3), Some(block(2)));
    }

    #[test]
    fn collides_at_walls_and_floor() {
        let catalog = ShapeCatalog::standard();
        let board = Board::new(4, 4);
        let o = catalog.shape(ShapeKind::O);
        assert!(!board.collides(o, 0, 0));
        assert!(!board.collides(o, 2, 2));
        assert!(board.collides(o, -1, 0));
        assert!(board.collides(o, 3, 0));
        assert!(board.collides(o, 0, 3));
        assert!(board.collides(o, 0, -1));
    }

    #[test]
    fn hole_in_shape_may_overlap_occupied_cell() {
        let catalog = ShapeCatalog::standard();
        let mut board = Board::new(4, 4);
        // S has an empty top-left cell.
        board.set(0, 0, block(2));
        let s = catalog.shape(ShapeKind::S);
        assert!(!board.collides(s, 0, 0));
        board.set(1, 0, block(2));
        assert!(board.collides(s, 0, 0));
    }

    #[test]
    fn merge_writes_colors_only_for_filled_cells() {
        let catalog = ShapeCatalog::standard();
        let mut board = Board::new(4, 4);
        board.merge(catalog.shape(ShapeKind::T), 1, 2);
        assert_eq!(board.get(1, 2), Some(block(7)));
        assert_eq!(board.get(2, 2), Some(block(7)));
        assert_eq!(board.get(3, 2), Some(block(7)));
        assert_eq!(board.get(2, 3), Some(block(7)));
        assert_eq!(board.get(1, 3), Some(Cell::Empty));
        assert_eq!(board.get(1, 4), Some(Cell::Floor));
    }

    #[test]
    fn clear_row_shifts_down_and_keeps_height() {
        let mut board = Board::new(4, 3);
        board.set(0, 1, block(3));
        fill_row(&mut board, 2, 1);
        board.clear_row(2);
        assert_eq!(board.get(0, 2), Some(block(3)));
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
        assert_eq!(board.playable_rows().count(), 4);
        assert_eq!(board.get(0, 4), Some(Cell::Floor));
    }

    #[test]
    fn clear_row_ignores_floor() {
        let mut board = Board::new(4, 3);
        board.clear_row(4);
        assert_eq!(board, Board::new(4, 3));
    }

    #[test]
    fn clear_full_rows_handles_adjacent_rows() {
        let mut board = Board::new(6, 3);
        board.set(1, 2, block(5));
        fill_row(&mut board, 3, 1);
        fill_row(&mut board, 4, 2);
        board.set(0, 5, block(6));
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(1, 4), Some(block(5)));
        assert_eq!(board.get(0, 5), Some(block(6)));
        assert!(board.playable_rows().take(4).all(|r| r.iter().all(|c| *c == Cell::Empty)));
    }

    #[test]
    fn clear_full_rows_handles_non_adjacent_rows() {
        // Rows 3 and 5 full; rows 2, 4 and 6 each hold one tagged block.
        let mut board = Board::new(7, 3);
        board.set(0, 2, block(5));
        fill_row(&mut board, 3, 1);
        board.set(1, 4, block(6));
        fill_row(&mut board, 5, 2);
        board.set(2, 6, block(7));
        assert_eq!(board.clear_full_rows(), 2);
        assert!(board.playable_rows().take(4).all(|r| r.iter().all(|c| *c == Cell::Empty)));
        assert_eq!(board.get(0, 4), Some(block(5)));
        assert_eq!(board.get(1, 5), Some(block(6)));
        assert_eq!(board.get(2, 6), Some(block(7)));
        assert!(!(0..7).any(|y| board.is_row_full(y)));
    }

    #[test]
    fn only_blocks_carry_a_color() {
        assert_eq!(block(3).color(), ColorId::new(3));
        assert_eq!(Cell::Empty.color(), None);
        assert_eq!(Cell::Floor.color(), None);
        assert!(Cell::Floor.is_occupied());
    }

    #[test]
    fn clear_full_rows_none_full() {
        let mut board = Board::new(4, 3);
        board.set(0, 3, block(1));
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board.get(0, 3), Some(block(1)));
    }
}
