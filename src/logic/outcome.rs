//! What a successful command hands back to the host adapter.

use crate::models::{BoardError, MessageRef, ScoreRecord};
use serde::{Deserialize, Serialize};

/// What the host should do with the externally displayed message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageAction {
    /// Edit `existing` to show `text`; post a fresh message if there is none
    /// or it has disappeared. Hosts publish through `Scoreboards::display_with`
    /// so the new ref is stored against the record it actually shows.
    Upsert {
        text: String,
        existing: Option<MessageRef>,
    },
    /// Remove the message, if any. The record is already gone.
    Retract { existing: Option<MessageRef> },
}

/// Result of a committed (or read-only) command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    /// Short confirmation for the user who issued the command.
    pub notice: String,
    pub action: MessageAction,
    /// Record as stored after the command; `None` after delete.
    pub record: Option<ScoreRecord>,
}

impl Outcome {
    pub(crate) fn upsert(notice: impl Into<String>, record: ScoreRecord) -> Self {
        Self {
            notice: notice.into(),
            action: MessageAction::Upsert {
                text: crate::render::render(&record),
                existing: record.message_ref,
            },
            record: Some(record),
        }
    }

    pub(crate) fn retract(notice: impl Into<String>, existing: Option<MessageRef>) -> Self {
        Self {
            notice: notice.into(),
            action: MessageAction::Retract { existing },
            record: None,
        }
    }

    /// Rendered message text, unless the board was deleted.
    pub fn rendered(&self) -> Option<&str> {
        match &self.action {
            MessageAction::Upsert { text, .. } => Some(text),
            MessageAction::Retract { .. } => None,
        }
    }

    /// Message the host should edit or remove.
    pub fn message_ref(&self) -> Option<MessageRef> {
        match &self.action {
            MessageAction::Upsert { existing, .. } | MessageAction::Retract { existing } => *existing,
        }
    }
}

/// Flat response shape a host relays: success flag, table text, message ref, user message.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub success: bool,
    pub rendered_text: Option<String>,
    pub message_ref: Option<MessageRef>,
    pub message: String,
}

impl Reply {
    pub fn ok(outcome: &Outcome) -> Self {
        Self {
            success: true,
            rendered_text: outcome.rendered().map(str::to_string),
            message_ref: outcome.message_ref(),
            message: outcome.notice.clone(),
        }
    }

    pub fn error(err: &BoardError) -> Self {
        Self {
            success: false,
            rendered_text: None,
            message_ref: None,
            message: err.to_string(),
        }
    }

    /// Replace the ref after the host republished the message.
    pub fn with_message_ref(mut self, message_ref: Option<MessageRef>) -> Self {
        self.message_ref = message_ref;
        self
    }
}
