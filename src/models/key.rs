//! ContextKey: one scoreboard scope (a channel, or a thread inside it).

use std::fmt;

/// Identifies the conversation surface a scoreboard belongs to.
///
/// A thread is keyed by its parent channel plus its own id; messages posted
/// directly in a channel use `thread_id == 0`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ContextKey {
    pub server_id: u64,
    pub channel_id: u64,
    pub thread_id: u64,
}

impl ContextKey {
    /// Build a key; `thread` is `None` for a plain channel.
    pub fn new(server_id: u64, channel_id: u64, thread: Option<u64>) -> Self {
        Self {
            server_id,
            channel_id,
            thread_id: thread.unwrap_or(0),
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.server_id, self.channel_id, self.thread_id)
    }
}
