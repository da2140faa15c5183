//! In-memory message surface used by the web host and tests.

use super::{MessageSurface, SurfaceError};
use crate::models::{ContextKey, MessageRef};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A message as the surface currently shows it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PostedMessage {
    pub id: MessageRef,
    pub channel: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

/// Messages kept in a `HashMap`, with random ids like a chat platform's snowflakes.
#[derive(Default)]
pub struct InMemorySurface {
    messages: Mutex<HashMap<MessageRef, PostedMessage>>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MessageRef) -> Option<PostedMessage> {
        self.guard().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a message behind the board's back (a moderator deleting it).
    pub fn remove(&self, id: MessageRef) -> Option<PostedMessage> {
        self.guard().remove(&id)
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<MessageRef, PostedMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSurface for InMemorySurface {
    fn post(&self, key: &ContextKey, text: &str) -> Result<MessageRef, SurfaceError> {
        let mut messages = self.guard();
        let mut rng = rand::thread_rng();
        let id = loop {
            let id = MessageRef(rng.gen_range(1..=u64::MAX >> 1));
            if !messages.contains_key(&id) {
                break id;
            }
        };
        messages.insert(
            id,
            PostedMessage {
                id,
                channel: key.to_string(),
                content: text.to_string(),
                posted_at: Utc::now(),
                edited_at: None,
            },
        );
        Ok(id)
    }

    fn edit(&self, key: &ContextKey, id: MessageRef, text: &str) -> Result<(), SurfaceError> {
        let mut messages = self.guard();
        let channel = key.to_string();
        match messages.get_mut(&id).filter(|m| m.channel == channel) {
            Some(message) => {
                message.content = text.to_string();
                message.edited_at = Some(Utc::now());
                Ok(())
            }
            None => Err(SurfaceError::NotFound(id)),
        }
    }

    fn delete(&self, key: &ContextKey, id: MessageRef) -> Result<(), SurfaceError> {
        let mut messages = self.guard();
        let channel = key.to_string();
        if messages.get(&id).is_some_and(|m| m.channel == channel) {
            messages.remove(&id);
            Ok(())
        } else {
            Err(SurfaceError::NotFound(id))
        }
    }
}
