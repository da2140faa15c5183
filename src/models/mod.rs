//! Data structures for the scoreboard: context keys, records, rounds, errors.

mod error;
mod key;
mod name;
mod record;

pub use error::{BoardError, ErrorKind, Side};
pub use key::ContextKey;
pub use name::{validate_name, MAX_NAME_LEN};
pub use record::{
    MessageRef, Round, ScoreRecord, ZeroStyle, DEFAULT_TITLE, PLAYER_WIDTH, RND_WIDTH,
    START_TITLE,
};
