//! Shared types module - constants and plain data for the puzzle core
//!
//! Everything here is dependency-free plain data, usable from the simulation
//! core, the persistence layer, and whatever front end embeds the mini-game.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 15 rows (indexed 0-14, row 0 at the top)
//! - **Spawn anchor**: column 5, row 1
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SOFT_DROP_INTERVAL` | 100 | Fall threshold while soft-dropping |
//! | `LINE_CLEAR_PAUSE_MS` | 200 | Lock pause per cleared row |
//!
//! Gravity itself is tier-driven: each [`Difficulty`] maps to a
//! [`FallProfile`] holding the per-tick fall rate, the interval thresholds,
//! and the permanent per-line acceleration.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Difficulty, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Tier names round-trip, with one historical alias.
//! let tier = Difficulty::from_str("difficult").unwrap();
//! assert_eq!(tier, Difficulty::Hard);
//! assert_eq!(tier.as_str(), "hard");
//!
//! // Harder tiers fall faster.
//! let easy = Difficulty::Easy.fall_profile();
//! let hard = tier.fall_profile();
//! assert!(hard.base_rate > easy.base_rate);
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 15);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (15 rows, row 0 at the top)
pub const BOARD_HEIGHT: u8 = 15;

/// Spawn anchor column (BOARD_WIDTH / 2)
pub const SPAWN_COL: i8 = (BOARD_WIDTH / 2) as i8;

/// Spawn anchor row
pub const SPAWN_ROW: i8 = 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall-interval threshold while a soft drop is latched
pub const SOFT_DROP_INTERVAL: u32 = 100;

/// Lock pause per cleared row (milliseconds)
pub const LINE_CLEAR_PAUSE_MS: u32 = 200;

/// Lowest value a random color channel may take
///
/// Keeps pieces from blending into a dark background.
pub const COLOR_CHANNEL_MIN: u8 = 30;

/// Line clear scoring table
///
/// Points for clearing N rows with a single lock:
/// - 0 rows: 0 points
/// - 1 row: 100 points
/// - 2 rows: 300 points
/// - 3 rows: 700 points
/// - 4 rows: 1500 points
///
/// The nonlinear bonus rewards multi-row clears disproportionately.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// A solid RGB color carried by pieces and settled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: empty cell
/// - `Some(Rgb)`: settled cell keeping its piece's color
pub type Cell = Option<Rgb>;

/// The seven tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Parse a kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to the lowercase letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::T => "t",
        }
    }
}

/// A difficulty tier for the mini-game
///
/// The narrative layer picks one from the player's decision answers.
/// Harder tiers fall faster and accelerate more per cleared row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Tier-specific gravity parameters
///
/// Gravity accumulates `base_rate` into a counter every simulation tick
/// and advances the piece one row when the counter exceeds the current
/// interval threshold. Cleared rows permanently add `rate_per_line` to the
/// rate; the threshold itself resets to `spawn_interval` whenever a new
/// piece takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallProfile {
    /// Added to the fall accumulator on every tick
    pub base_rate: u32,
    /// Accumulator threshold at session start
    pub start_interval: u32,
    /// Threshold restored whenever a new piece takes over
    pub spawn_interval: u32,
    /// Permanent rate gain per cleared row
    pub rate_per_line: u32,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse a tier from its name (case-insensitive)
    ///
    /// Accepts the historical alias "difficult" for [`Difficulty::Hard`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("difficult"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" | "difficult" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Convert to the lowercase tier name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Gravity parameters for this tier
    ///
    /// Hard restores a gentler interval after each lock (1000) than it
    /// starts with (700); both values are deliberate.
    pub const fn fall_profile(&self) -> FallProfile {
        match self {
            Difficulty::Easy => FallProfile {
                base_rate: 60,
                start_interval: 2000,
                spawn_interval: 2000,
                rate_per_line: 2,
            },
            Difficulty::Medium => FallProfile {
                base_rate: 80,
                start_interval: 1500,
                spawn_interval: 1500,
                rate_per_line: 3,
            },
            Difficulty::Hard => FallProfile {
                base_rate: 150,
                start_interval: 700,
                spawn_interval: 1000,
                rate_per_line: 6,
            },
        }
    }
}

/// Player input latched for one simulation step
///
/// The narrative layer translates whatever input device it owns into these
/// flags. At most one horizontal shift and one rotation apply per step;
/// flags arriving during a lock pause stay queued for the next falling
/// step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Shift the piece one column left
    pub move_left: bool,
    /// Shift the piece one column right
    pub move_right: bool,
    /// Latch the fast fall threshold for the rest of this piece's descent
    pub soft_drop: bool,
    /// Rotate the piece 90 degrees around its pivot
    pub rotate: bool,
}

impl StepInput {
    /// Input with no flags set
    pub const NEUTRAL: StepInput = StepInput {
        move_left: false,
        move_right: false,
        soft_drop: false,
        rotate: false,
    };

    /// Net horizontal delta: -1 for left, +1 for right, 0 for both/neither
    pub fn dx(&self) -> i8 {
        (self.move_right as i8) - (self.move_left as i8)
    }

    /// True when no flag is set
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Notification emitted when a piece locks
///
/// Consumed once via `GameSession::take_last_event`; the collaborator
/// reads it for feedback effects without diffing snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows cleared by this lock (0-4)
    pub lines_cleared: u32,
    /// Points awarded for those rows
    pub points: u32,
    /// Whether this lock ended the session
    pub game_over: bool,
}

/// Final result captured at game over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub tier: Difficulty,
    /// Score at the moment the top row was reached
    pub final_score: u32,
    /// Monotonic best for the tier, after this session's update
    pub best_score: u32,
}
