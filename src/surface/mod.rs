//! Host adapter side: where rendered boards are published.
//!
//! The command layer only tells the host what to show. A [`MessageSurface`]
//! is the chat-platform stand-in that posts, edits and deletes messages, and
//! [`publish`] applies an [`Outcome`] to it, re-posting when the remembered
//! message has vanished.

mod memory;

pub use memory::{InMemorySurface, PostedMessage};

use crate::logic::{MessageAction, Outcome, Scoreboards};
use crate::models::{BoardError, ContextKey, MessageRef};
use crate::store::RecordStore;
use std::fmt;

/// Errors from the message surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SurfaceError {
    /// The message no longer exists (deleted by someone else, expired...).
    NotFound(MessageRef),
    /// Any other delivery failure.
    Failed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NotFound(id) => write!(f, "message {} not found", id),
            SurfaceError::Failed(msg) => write!(f, "message delivery failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Errors from [`publish`].
#[derive(Debug)]
pub enum PublishError {
    Surface(SurfaceError),
    /// Saving the new message ref failed.
    Board(BoardError),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Surface(e) => write!(f, "{}", e),
            PublishError::Board(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PublishError {}

impl From<SurfaceError> for PublishError {
    fn from(err: SurfaceError) -> Self {
        PublishError::Surface(err)
    }
}

impl From<BoardError> for PublishError {
    fn from(err: BoardError) -> Self {
        PublishError::Board(err)
    }
}

/// Where board messages live (one channel or thread per [`ContextKey`]).
pub trait MessageSurface: Send + Sync {
    /// Post a new message; returns its ref.
    fn post(&self, key: &ContextKey, text: &str) -> Result<MessageRef, SurfaceError>;

    /// Replace the content of an existing message.
    fn edit(&self, key: &ContextKey, id: MessageRef, text: &str) -> Result<(), SurfaceError>;

    /// Delete a message.
    fn delete(&self, key: &ContextKey, id: MessageRef) -> Result<(), SurfaceError>;
}

/// Apply `outcome` to `surface`. Returns the message now showing the board
/// (`None` after a delete, or if the board was deleted before publishing).
///
/// Upserts go through [`Scoreboards::display_with`], so the text shown is
/// rendered from the stored record at publish time rather than the text the
/// outcome carried. An edit that hits [`SurfaceError::NotFound`] falls back
/// to a fresh post whose ref is stored under the same key lock.
pub fn publish<S, M>(
    boards: &Scoreboards<S>,
    key: &ContextKey,
    surface: &M,
    outcome: &Outcome,
) -> Result<Option<MessageRef>, PublishError>
where
    S: RecordStore,
    M: MessageSurface + ?Sized,
{
    match &outcome.action {
        MessageAction::Upsert { .. } => boards.display_with::<PublishError, _>(key, |existing, text| {
            if let Some(id) = existing {
                match surface.edit(key, id, text) {
                    Ok(()) => return Ok(id),
                    Err(SurfaceError::NotFound(_)) => {
                        log::warn!("{}: message {} is gone, posting a new one", key, id);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Ok(surface.post(key, text)?)
        }),
        MessageAction::Retract { existing } => {
            if let Some(id) = *existing {
                match surface.delete(key, id) {
                    Ok(()) | Err(SurfaceError::NotFound(_)) => {}
                    Err(e) => log::warn!("{}: could not delete message {}: {}", key, id, e),
                }
            }
            Ok(None)
        }
    }
}
