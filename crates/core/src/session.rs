//! Session controller - one game from first spawn to game over
//!
//! [`GameSession`] owns the board, the active and next pieces, the seeded
//! RNG, the tier timing parameters, and the best-score store. The embedding
//! layer drives it with `step(elapsed_ms, input)` and reads state back
//! through accessors or [`SessionSnapshot`].
//!
//! # Phases
//!
//! | Phase     | Meaning                                               |
//! |-----------|-------------------------------------------------------|
//! | `Falling` | The active piece responds to input and gravity        |
//! | `Locking` | Post-clear pause, 200 ms per row; input only queues   |
//! | `Over`    | Terminal; `step` errors until `reset`                 |
//!
//! # Timing
//!
//! `step` folds elapsed wall-clock time into whole 16 ms simulation ticks,
//! carrying the remainder. Input latches apply once per `step` call; gravity
//! accumulates per tick and advances the piece when the accumulator exceeds
//! the current fall interval. A failed descent locks the piece where it
//! stands.

use std::mem;

use log::{debug, info, warn};
use thiserror::Error;

use blockfall_store::ScoreStore;
use blockfall_types::{
    Difficulty, FallProfile, LockEvent, SessionOutcome, StepInput, SOFT_DROP_INTERVAL, TICK_MS,
};

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::PieceRng;
use crate::scoring::{line_clear_points, lock_pause_ms};
use crate::snapshot::SessionSnapshot;

/// Errors surfaced by [`GameSession`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Stepping a session that already hit game over
    #[error("session is over; reset it or start a new one")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Falling,
    Locking { pause_ms: u32 },
    Over,
}

/// A running mini-game session
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    active: Piece,
    next: Piece,
    rng: PieceRng,
    tier: Difficulty,
    profile: FallProfile,
    phase: Phase,
    score: u32,
    best_score: u32,
    lines: u32,
    fall_rate: u32,
    fall_interval: u32,
    fall_accum: u32,
    tick_accum_ms: u32,
    pending: StepInput,
    last_event: Option<LockEvent>,
    outcome: Option<SessionOutcome>,
    store: Box<dyn ScoreStore>,
}

impl GameSession {
    /// Start a session on a tier with a seeded piece stream
    ///
    /// Reads the tier's best score from the store up front so the running
    /// display never waits on I/O mid-game.
    pub fn new(tier: Difficulty, seed: u32, store: Box<dyn ScoreStore>) -> Self {
        let profile = tier.fall_profile();
        let mut rng = PieceRng::new(seed);
        let active = rng.next_piece();
        let next = rng.next_piece();
        let best_score = store.read(tier);
        debug!("starting {} session, best on record {best_score}", tier.as_str());

        Self {
            board: Board::new(),
            active,
            next,
            rng,
            tier,
            profile,
            phase: Phase::Falling,
            score: 0,
            best_score,
            lines: 0,
            fall_rate: profile.base_rate,
            fall_interval: profile.start_interval,
            fall_accum: 0,
            tick_accum_ms: 0,
            pending: StepInput::NEUTRAL,
            last_event: None,
            outcome: None,
            store,
        }
    }

    /// The active difficulty tier
    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    /// Cumulative score this session
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score for this tier, including this session's games
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Total rows cleared this session
    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    /// True once a lock has reached the top row (or smothered the spawn)
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::Over)
    }

    /// The settled-cell grid
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece currently falling
    pub fn active_piece(&self) -> Piece {
        self.active
    }

    /// The piece queued to fall next
    pub fn next_piece(&self) -> Piece {
        self.next
    }

    /// Final result, present once the session is over
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Consume the most recent lock notification
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Direct board access for scripted setups and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece, for scripted setups and tests
    pub fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    /// Advance the simulation by `elapsed_ms` of wall-clock time
    ///
    /// Latches `input`, applies it once if the step begins in `Falling`,
    /// then runs gravity for every whole tick the elapsed time covers.
    /// Input arriving during a lock pause stays queued for the next step
    /// that begins in `Falling`.
    pub fn step(&mut self, elapsed_ms: u32, input: StepInput) -> Result<(), SessionError> {
        if self.is_game_over() {
            return Err(SessionError::Finished);
        }

        self.latch(input);
        if self.phase == Phase::Falling {
            self.apply_pending();
        }

        self.tick_accum_ms += elapsed_ms;
        while self.tick_accum_ms >= TICK_MS {
            self.tick_accum_ms -= TICK_MS;
            match self.phase {
                Phase::Falling => self.gravity_tick(),
                Phase::Locking { pause_ms } => {
                    let left = pause_ms.saturating_sub(TICK_MS);
                    self.phase = if left == 0 {
                        Phase::Falling
                    } else {
                        Phase::Locking { pause_ms: left }
                    };
                }
                Phase::Over => break,
            }
        }
        Ok(())
    }

    /// Restart in place: fresh board, zero score, tier-initial speeds
    ///
    /// Re-reads the best score so a record set by the previous game shows
    /// immediately. The piece stream continues from the same seed sequence.
    pub fn reset(&mut self) {
        self.board.reset();
        self.active = self.rng.next_piece();
        self.next = self.rng.next_piece();
        self.phase = Phase::Falling;
        self.score = 0;
        self.best_score = self.store.read(self.tier);
        self.lines = 0;
        self.fall_rate = self.profile.base_rate;
        self.fall_interval = self.profile.start_interval;
        self.fall_accum = 0;
        self.tick_accum_ms = 0;
        self.pending = StepInput::NEUTRAL;
        self.last_event = None;
        self.outcome = None;
    }

    /// Write the render-facing state into a caller-owned buffer
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.score = self.score;
        out.best_score = self.best_score;
        out.lines = self.lines;
        out.tier = self.tier;
        out.game_over = self.is_game_over();
    }

    /// Allocate a fresh snapshot of the render-facing state
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut out = SessionSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// OR new flags into the pending input
    fn latch(&mut self, input: StepInput) {
        self.pending.move_left |= input.move_left;
        self.pending.move_right |= input.move_right;
        self.pending.soft_drop |= input.soft_drop;
        self.pending.rotate |= input.rotate;
    }

    /// Consume the pending input: shift, then rotate, then soft drop
    ///
    /// Each action stages a candidate piece and commits it only when every
    /// cell is legal; an illegal action is dropped whole, never split.
    fn apply_pending(&mut self) {
        let input = mem::take(&mut self.pending);
        if input.is_neutral() {
            return;
        }

        let dx = input.dx();
        if dx != 0 {
            let shifted = self.active.shifted(dx, 0);
            if shifted.fits(&self.board) {
                self.active = shifted;
            }
        }

        if input.rotate {
            let rotated = self.active.rotated();
            if rotated.fits(&self.board) {
                self.active = rotated;
            }
        }

        if input.soft_drop {
            // One-way latch; the next lock restores the tier interval.
            self.fall_interval = SOFT_DROP_INTERVAL;
        }
    }

    /// One 16 ms tick of gravity
    fn gravity_tick(&mut self) {
        self.fall_accum += self.fall_rate;
        if self.fall_accum <= self.fall_interval {
            return;
        }
        self.fall_accum = 0;

        let dropped = self.active.shifted(0, 1);
        if dropped.fits(&self.board) {
            self.active = dropped;
        } else {
            self.lock_active();
        }
    }

    /// Settle the active piece and run the lock pipeline
    fn lock_active(&mut self) {
        for &(x, y) in &self.active.cells {
            self.board.set(x, y, Some(self.active.color));
        }
        // Row-0 occupancy is captured before compaction: a lock that
        // reaches the top row always ends the session, but its clear
        // still counts.
        let topped_out = self.board.row_occupied(0);

        let cleared = self.board.clear_full_rows();
        let lines = cleared.len() as u32;
        let points = line_clear_points(cleared.len());
        self.score += points;
        self.lines += lines;
        self.fall_rate += lines * self.profile.rate_per_line;
        if lines > 0 {
            debug!("cleared {lines} rows for {points} points, score {}", self.score);
        }

        self.active = self.next;
        self.next = self.rng.next_piece();
        self.fall_interval = self.profile.spawn_interval;

        let over = topped_out || !self.active.fits(&self.board);
        self.last_event = Some(LockEvent {
            lines_cleared: lines,
            points,
            game_over: over,
        });

        if over {
            self.finish();
        } else if lines > 0 {
            self.phase = Phase::Locking {
                pause_ms: lock_pause_ms(cleared.len()),
            };
        }
    }

    /// Persist the best score, capture the outcome, and park the session
    fn finish(&mut self) {
        self.phase = Phase::Over;
        // Another writer may have raised the record since this session read
        // it, so max against the stored value at write time, not the cache.
        let stored = self.store.read(self.tier);
        self.best_score = stored.max(self.best_score).max(self.score);
        if self.best_score > stored {
            if let Err(err) = self.store.write(self.tier, self.best_score) {
                warn!(
                    "failed to persist best score for {}: {:#}",
                    self.tier.as_str(),
                    err
                );
            }
        }
        self.outcome = Some(SessionOutcome {
            tier: self.tier,
            final_score: self.score,
            best_score: self.best_score,
        });
        info!(
            "session over on {}: score {}, best {}",
            self.tier.as_str(),
            self.score,
            self.best_score
        );

        // The outcome keeps the finals; the playfield itself returns to
        // its tier-initial state.
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.fall_rate = self.profile.base_rate;
        self.fall_interval = self.profile.start_interval;
        self.fall_accum = 0;
    }
}
