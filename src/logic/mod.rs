//! Scoreboard business logic: the command layer, per-key locking, help.

mod help;
mod locks;
mod outcome;
mod scoreboards;

pub use help::{help, HELP_TEXT};
pub use locks::KeyLocks;
pub use outcome::{MessageAction, Outcome, Reply};
pub use scoreboards::Scoreboards;
