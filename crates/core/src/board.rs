//! Board module - the settled-cell grid
//!
//! A 10x15 grid where each cell is empty or keeps a settled piece's color.
//! Uses a flat array for cache locality and zero-allocation scans.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..14
//! (top to bottom). Pieces may reach y < 0 while spawning or rotating near
//! the top; the legality probe treats that space as open.

use arrayvec::ArrayVec;

use blockfall_types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The settled-cell grid - 10 columns x 15 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    ///
    /// Writes outside the grid are dropped, so lock cells above the top
    /// row simply vanish. Returns false when the write was dropped.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Legality probe for piece cells
    ///
    /// A piece cell may occupy (x, y) when the column is on the board, the
    /// row is above the floor, and any in-bounds cell is empty. Rows above
    /// the top (y < 0) count as open so pieces can spawn and rotate while
    /// partially above the visible field.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)].is_none()
    }

    /// Check if position holds a settled cell (in bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a row holds at least one settled cell
    pub fn row_occupied(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().any(|cell| cell.is_some())
    }

    /// Clear all full rows, compacting the rest downward
    ///
    /// Two-pointer pass from the bottom: full rows are dropped, other rows
    /// are copied down in place, and vacated top rows become empty.
    /// Returns the cleared row indices in ascending order; a single lock
    /// clears at most 4 rows.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                // Not full: move the row down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Vacated rows at the top become empty
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows.reverse();
        cleared_rows
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a caller-owned 2D buffer
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            row.copy_from_slice(&self.cells[start..start + width]);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert_eq!(rows.len(), BOARD_HEIGHT as usize);
        assert!(rows.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::Rgb;

    const GRAY: Cell = Some(Rgb::new(128, 128, 128));

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 14), Some(149));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 15), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_set_above_top_is_dropped() {
        let mut board = Board::new();

        assert!(!board.set(4, -1, GRAY));
        assert_eq!(board.get(4, 0), Some(None));
        assert!(board.cells().iter().all(|cell| cell.is_none()));
    }

    #[test]
    fn test_is_open_semantics() {
        let mut board = Board::new();

        // In-bounds empty cells are open.
        assert!(board.is_open(0, 0));
        assert!(board.is_open(9, 14));

        // Above the top row is open as long as the column is legal.
        assert!(board.is_open(4, -1));
        assert!(board.is_open(4, -3));
        assert!(!board.is_open(-1, -1));
        assert!(!board.is_open(10, -1));

        // Sides and floor are closed.
        assert!(!board.is_open(-1, 5));
        assert!(!board.is_open(10, 5));
        assert!(!board.is_open(4, 15));

        // Settled cells are closed.
        board.set(4, 5, GRAY);
        assert!(!board.is_open(4, 5));
    }

    #[test]
    fn test_row_scans() {
        let mut board = Board::new();
        assert!(!board.row_occupied(0));
        assert!(!board.is_row_full(14));

        board.set(3, 14, GRAY);
        assert!(board.row_occupied(14));
        assert!(!board.is_row_full(14));

        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 14, GRAY);
        }
        assert!(board.is_row_full(14));

        // Out-of-range rows scan as neither occupied nor full.
        assert!(!board.row_occupied(15));
        assert!(!board.is_row_full(15));
    }

    #[test]
    fn test_clear_full_rows_compacts_downward() {
        let mut rows = vec![vec![None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        // Row 12 keeps a marker, rows 13 and 14 are full.
        rows[12][0] = GRAY;
        rows[13] = vec![GRAY; BOARD_WIDTH as usize];
        rows[14] = vec![GRAY; BOARD_WIDTH as usize];
        let mut board = Board::from_rows(rows);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[13, 14]);

        // The marker row landed on the floor and everything above is empty.
        assert_eq!(board.get(0, 14), Some(GRAY));
        for y in 0..14 {
            assert!(!board.row_occupied(y), "row {} should be empty", y);
        }
    }

    #[test]
    fn test_clear_full_rows_preserves_row_order() {
        let a: Cell = Some(Rgb::new(200, 30, 30));
        let b: Cell = Some(Rgb::new(30, 200, 30));

        let mut rows = vec![vec![None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        rows[10][1] = a;
        rows[11] = vec![GRAY; BOARD_WIDTH as usize];
        rows[12][2] = b;
        rows[13] = vec![GRAY; BOARD_WIDTH as usize];
        let mut board = Board::from_rows(rows);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[11, 13]);

        // Remaining rows keep their relative order: a above b, b on row 13,
        // the old row 14 (empty) still on the floor.
        assert_eq!(board.get(2, 13), Some(b));
        assert_eq!(board.get(1, 12), Some(a));
        assert!(!board.row_occupied(14));
    }

    #[test]
    fn test_clear_full_rows_noop_when_none_full() {
        let mut board = Board::new();
        board.set(0, 14, GRAY);
        board.set(9, 13, GRAY);
        let before = board.clone();

        let cleared = board.clear_full_rows();
        assert!(cleared.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_reset_empties_every_cell() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 14, GRAY);
        }
        board.reset();
        assert!(board.cells().iter().all(|cell| cell.is_none()));
    }
}
