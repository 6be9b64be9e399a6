//! Render-facing state export
//!
//! A [`SessionSnapshot`] bundles everything a front end needs to draw one
//! frame. Snapshots are plain `Copy` data; render loops that care about
//! allocation reuse one buffer via `GameSession::snapshot_into`.

use blockfall_types::{Cell, Difficulty, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

use crate::piece::Piece;

/// One frame's worth of session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Settled cells, indexed `[row][col]`, row 0 at the top
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// The falling piece
    pub active: Piece,
    /// The queued piece, for a preview box
    pub next: Piece,
    pub score: u32,
    pub best_score: u32,
    pub lines: u32,
    pub tier: Difficulty,
    pub game_over: bool,
}

impl SessionSnapshot {
    /// Reset to the empty-board placeholder state
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = placeholder_piece();
        self.next = placeholder_piece();
        self.score = 0;
        self.best_score = 0;
        self.lines = 0;
        self.tier = Difficulty::Easy;
        self.game_over = false;
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut snapshot = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: placeholder_piece(),
            next: placeholder_piece(),
            score: 0,
            best_score: 0,
            lines: 0,
            tier: Difficulty::Easy,
            game_over: false,
        };
        snapshot.clear();
        snapshot
    }
}

/// Black I piece standing in before the first `snapshot_into`
fn placeholder_piece() -> Piece {
    Piece::spawn(PieceKind::I, Rgb::new(0, 0, 0))
}
