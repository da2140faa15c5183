//! Two-player scoreboard: per-channel score records, persisted as JSON and
//! rendered as a fixed-width table kept in sync with one chat message.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod render;
pub mod store;
pub mod surface;

pub use config::Config;
pub use logic::{help, KeyLocks, MessageAction, Outcome, Reply, Scoreboards};
pub use models::{
    validate_name, BoardError, ContextKey, ErrorKind, MessageRef, Round, ScoreRecord, Side,
    ZeroStyle,
};
pub use render::{render, render_table};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError};
pub use surface::{publish, InMemorySurface, MessageSurface, PublishError, SurfaceError};
