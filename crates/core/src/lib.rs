//! Simulation core for the falling-block mini-game
//!
//! Pure game logic with no rendering, no input device handling, and no
//! clock of its own: the embedding layer owns the event loop and drives a
//! [`GameSession`] with elapsed time plus latched input flags.
//!
//! # Modules
//!
//! - [`board`]: the settled-cell grid and line compaction
//! - [`piece`]: the shape catalog and falling-piece candidates
//! - [`rng`]: seeded piece and color generation
//! - [`scoring`]: the line-clear point table and lock pause
//! - [`session`]: the per-game state machine tying it all together
//! - [`snapshot`]: render-facing state export
//!
//! # Examples
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_store::MemoryScoreStore;
//! use blockfall_types::{Difficulty, StepInput, TICK_MS};
//!
//! let store = Box::new(MemoryScoreStore::new());
//! let mut session = GameSession::new(Difficulty::Easy, 12345, store);
//!
//! let left = StepInput { move_left: true, ..StepInput::NEUTRAL };
//! session.step(TICK_MS, left)?;
//!
//! assert_eq!(session.score(), 0);
//! assert!(!session.is_game_over());
//! # Ok::<(), blockfall_core::SessionError>(())
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use board::Board;
pub use piece::{template, Piece};
pub use rng::{PieceRng, SimpleRng};
pub use scoring::{line_clear_points, lock_pause_ms};
pub use session::{GameSession, SessionError};
pub use snapshot::SessionSnapshot;
