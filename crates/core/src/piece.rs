//! Piece module - shape catalog and the falling piece
//!
//! The seven tetromino templates are fixed offset sets around a pivot
//! cell. A falling piece is four board-space cells plus a color; movement
//! and rotation build candidate pieces that the session commits only after
//! validating every cell against the board.

use blockfall_types::{PieceKind, Rgb, SPAWN_COL, SPAWN_ROW};

use crate::board::Board;

/// Relative cell offsets `(dx, dy)` from the spawn anchor for a kind
///
/// Offset 0 is the rotation pivot.
pub const fn template(kind: PieceKind) -> [(i8, i8); 4] {
    match kind {
        PieceKind::I => [(-1, 0), (-2, 0), (0, 0), (1, 0)],
        PieceKind::O => [(0, -1), (-1, -1), (-1, 0), (0, 0)],
        PieceKind::S => [(-1, 0), (-1, 1), (0, 0), (0, -1)],
        PieceKind::Z => [(0, 0), (-1, 0), (0, 1), (-1, -1)],
        PieceKind::J => [(0, 0), (0, -1), (0, 1), (-1, -1)],
        PieceKind::L => [(0, 0), (0, -1), (0, 1), (1, -1)],
        PieceKind::T => [(0, 0), (0, -1), (0, 1), (-1, 0)],
    }
}

/// The falling piece: four board-space cells and a fill color
///
/// `cells[0]` is the rotation pivot. Pieces are small `Copy` values, so
/// every operation stages a candidate and the caller swaps it in when it
/// fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Board-space cell positions (x, y); index 0 is the pivot
    pub cells: [(i8, i8); 4],
    /// Fill color, kept by settled cells after a lock
    pub color: Rgb,
}

impl Piece {
    /// Instantiate a kind at the spawn anchor (column 5, row 1)
    pub fn spawn(kind: PieceKind, color: Rgb) -> Self {
        let mut cells = template(kind);
        for cell in &mut cells {
            cell.0 += SPAWN_COL;
            cell.1 += SPAWN_ROW;
        }
        Self { cells, color }
    }

    /// Candidate piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        Self { cells, ..*self }
    }

    /// Candidate piece rotated 90 degrees around the pivot
    ///
    /// new_x = pivot.x - (y - pivot.y), new_y = pivot.y + (x - pivot.x).
    /// Fixed direction, no wall kicks, no shape awareness: every kind
    /// rotates, including O around its off-center pivot.
    pub fn rotated(&self) -> Self {
        let (px, py) = self.cells[0];
        let mut cells = self.cells;
        for cell in &mut cells {
            let (dx, dy) = (cell.0 - px, cell.1 - py);
            cell.0 = px - dy;
            cell.1 = py + dx;
        }
        Self { cells, ..*self }
    }

    /// Check that every cell may occupy its position on the board
    pub fn fits(&self, board: &Board) -> bool {
        self.cells.iter().all(|&(x, y)| board.is_open(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::{BOARD_WIDTH, SPAWN_COL, SPAWN_ROW};

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[test]
    fn test_templates_have_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let cells = template(kind);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(cells[i], cells[j], "{:?} has duplicate offsets", kind);
                }
            }
        }
    }

    #[test]
    fn test_spawn_adds_anchor_to_template() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, WHITE);
            for (cell, offset) in piece.cells.iter().zip(template(kind)) {
                assert_eq!(cell.0, offset.0 + SPAWN_COL);
                assert_eq!(cell.1, offset.1 + SPAWN_ROW);
            }
        }
    }

    #[test]
    fn test_spawn_cells_start_on_the_board() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, WHITE);
            for &(x, y) in &piece.cells {
                assert!(x >= 0 && x < BOARD_WIDTH as i8, "{:?} spawns off-board", kind);
                assert!((0..3).contains(&y), "{:?} spawns outside rows 0..3", kind);
            }
        }
    }

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, WHITE);
            assert_eq!(piece.rotated().cells[0], piece.cells[0]);
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, WHITE);
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back, piece, "{:?} did not return to start", kind);
        }
    }

    #[test]
    fn test_rotation_transform_example() {
        // T at the anchor: pivot (5,1), stem up/down, foot left.
        let piece = Piece::spawn(PieceKind::T, WHITE);
        assert_eq!(piece.cells, [(5, 1), (5, 0), (5, 2), (4, 1)]);

        // One turn points the foot up.
        let turned = piece.rotated();
        assert_eq!(turned.cells, [(5, 1), (6, 1), (4, 1), (5, 0)]);
    }

    #[test]
    fn test_shifted_is_pure() {
        let piece = Piece::spawn(PieceKind::L, WHITE);
        let moved = piece.shifted(-2, 3);

        for (new, old) in moved.cells.iter().zip(piece.cells) {
            assert_eq!(new.0, old.0 - 2);
            assert_eq!(new.1, old.1 + 3);
        }
        // The original is untouched.
        assert_eq!(piece, Piece::spawn(PieceKind::L, WHITE));
    }

    #[test]
    fn test_fits_checks_every_cell() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::I, WHITE);

        assert!(piece.fits(&board));
        // The leftmost cell sits at column 3; four steps breach the wall.
        assert!(piece.shifted(-3, 0).fits(&board));
        assert!(!piece.shifted(-4, 0).fits(&board));
        // Above the top row is still a fit.
        assert!(piece.shifted(0, -2).fits(&board));
        // Below the floor is not.
        assert!(!piece.shifted(0, 14).fits(&board));
    }
}
