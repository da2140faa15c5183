//! BoardError: why a scoreboard command was refused.

use crate::store::StoreError;

/// Which competitor a rejected name belonged to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn field(self) -> &'static str {
        match self {
            Side::A => "player_a",
            Side::B => "player_b",
        }
    }
}

/// Broad category of a [`BoardError`], used by hosts to pick a response status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Persistence,
}

/// Errors that can occur during scoreboard operations.
#[derive(Debug)]
pub enum BoardError {
    /// Name contains non-ASCII characters.
    InvalidName(Side),
    /// Zero style token other than `dash` / `zero`.
    InvalidZeroStyle(String),
    /// Round number outside `1..=last`.
    RoundOutOfRange { round_no: i64, last: usize },
    /// Command needs at least one round.
    NoRounds,
    /// No scoreboard in this context.
    NotFound,
    /// `start` while a board with rounds or a published message exists.
    AlreadyActive,
    /// Reading or writing the record store failed; nothing was committed.
    Persistence(StoreError),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::InvalidName(_)
            | BoardError::InvalidZeroStyle(_)
            | BoardError::RoundOutOfRange { .. }
            | BoardError::NoRounds => ErrorKind::Validation,
            BoardError::NotFound => ErrorKind::NotFound,
            BoardError::AlreadyActive => ErrorKind::Conflict,
            BoardError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvalidName(side) => write!(
                f,
                "{} must be ASCII only (up to 8 characters); full-width characters are not allowed. e.g. `Reo`, `Haruna`, `Player01`",
                side.field()
            ),
            BoardError::InvalidZeroStyle(style) => {
                write!(f, "style must be 'dash' or 'zero' (got {:?})", style)
            }
            BoardError::RoundOutOfRange { round_no, last } => write!(
                f,
                "Round {} does not exist. The current last round is {}.",
                round_no, last
            ),
            BoardError::NoRounds => write!(f, "There are no rounds yet."),
            BoardError::NotFound => write!(
                f,
                "There is no scoreboard here. Create one with /board_start."
            ),
            BoardError::AlreadyActive => write!(
                f,
                "A scoreboard already exists. Use /board_show to view it or /board_reset to clear it."
            ),
            BoardError::Persistence(e) => write!(f, "Could not save the scoreboard: {}", e),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(err: StoreError) -> Self {
        BoardError::Persistence(err)
    }
}
