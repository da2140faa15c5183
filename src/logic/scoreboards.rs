//! Scoreboard commands: validate, mutate, persist, render.

use crate::logic::locks::KeyLocks;
use crate::logic::outcome::Outcome;
use crate::models::{
    validate_name, BoardError, ContextKey, MessageRef, ScoreRecord, Side, ZeroStyle, START_TITLE,
};
use crate::render::render;
use crate::store::RecordStore;
use std::sync::PoisonError;

/// Command layer over a [`RecordStore`].
///
/// Each mutating command holds the lock for its key across the whole
/// load → mutate → save cycle. The record is only reported back once the
/// save succeeded; on a store error the mutated copy is dropped.
pub struct Scoreboards<S> {
    store: S,
    locks: KeyLocks,
}

impl<S: RecordStore> Scoreboards<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current record for `key`, if a board was started there.
    pub fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, BoardError> {
        Ok(self.store.lookup(key)?)
    }

    fn existing(&self, key: &ContextKey) -> Result<ScoreRecord, BoardError> {
        self.store.lookup(key)?.ok_or(BoardError::NotFound)
    }

    /// Run `f` on the stored record under the key lock and save the result.
    fn mutate<F>(&self, key: &ContextKey, op: &str, f: F) -> Result<Outcome, BoardError>
    where
        F: FnOnce(&mut ScoreRecord) -> Result<String, BoardError>,
    {
        let lock = self.locks.get(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = self.existing(key).and_then(|mut record| {
            let notice = f(&mut record)?;
            self.store.save(key, &record)?;
            Ok(Outcome::upsert(notice, record))
        });
        log_result(key, op, &result);
        result
    }

    /// Create a board. Replaces a leftover record that has neither rounds nor
    /// a published message; anything else already here is a conflict.
    pub fn start(
        &self,
        key: &ContextKey,
        player_a: &str,
        player_b: &str,
        title: Option<&str>,
    ) -> Result<Outcome, BoardError> {
        let lock = self.locks.get(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = (|| -> Result<Outcome, BoardError> {
            let a = validate_name(Some(player_a)).ok_or(BoardError::InvalidName(Side::A))?;
            let b = validate_name(Some(player_b)).ok_or(BoardError::InvalidName(Side::B))?;
            if self.store.lookup(key)?.is_some_and(|r| r.is_active()) {
                return Err(BoardError::AlreadyActive);
            }
            let title = title.filter(|t| !t.is_empty()).unwrap_or(START_TITLE);
            let record = ScoreRecord::new(title, a, b);
            self.store.save(key, &record)?;
            Ok(Outcome::upsert(
                "Scoreboard created! Add rounds with /board_add.",
                record,
            ))
        })();
        log_result(key, "start", &result);
        result
    }

    /// Append a round.
    pub fn add(&self, key: &ContextKey, a: i64, b: i64) -> Result<Outcome, BoardError> {
        self.mutate(key, "add", |record| {
            let n = record.push_round(a, b);
            Ok(format!("Added: RND {}  A={}  B={}", n, a, b))
        })
    }

    /// Overwrite the supplied scores of round `round_no` (1-based).
    pub fn edit(
        &self,
        key: &ContextKey,
        round_no: i64,
        a: Option<i64>,
        b: Option<i64>,
    ) -> Result<Outcome, BoardError> {
        self.mutate(key, "edit", |record| {
            let round = record.edit_round(round_no, a, b)?;
            Ok(format!("Round {} updated. A={} B={}", round_no, round.a, round.b))
        })
    }

    /// Remove the last round.
    pub fn undo(&self, key: &ContextKey) -> Result<Outcome, BoardError> {
        self.mutate(key, "undo", |record| {
            record.undo_round()?;
            Ok("Removed the last round.".to_string())
        })
    }

    /// Re-render without touching the record.
    pub fn show(&self, key: &ContextKey) -> Result<Outcome, BoardError> {
        let result = self
            .existing(key)
            .map(|record| Outcome::upsert("Scoreboard refreshed.", record));
        if let Err(e) = &result {
            log::debug!("{} show rejected: {}", key, e);
        }
        result
    }

    /// Change names and/or title. A rejected name aborts the whole rename.
    pub fn rename(
        &self,
        key: &ContextKey,
        player_a: Option<&str>,
        player_b: Option<&str>,
        title: Option<&str>,
    ) -> Result<Outcome, BoardError> {
        self.mutate(key, "rename", |record| {
            record.rename(player_a, player_b, title)?;
            Ok("Names/title updated.".to_string())
        })
    }

    /// Clear all rounds; names, title and message stay.
    pub fn reset(&self, key: &ContextKey) -> Result<Outcome, BoardError> {
        self.mutate(key, "reset", |record| {
            record.reset_rounds();
            Ok("Scoreboard reset.".to_string())
        })
    }

    /// Switch zero display; `style` is `dash` or `zero` (any case).
    pub fn set_zero_style(&self, key: &ContextKey, style: &str) -> Result<Outcome, BoardError> {
        self.mutate(key, "zero_style", |record| {
            let style: ZeroStyle = style.parse()?;
            record.set_zero_style(style);
            Ok(format!("Zeros now display as {}.", style))
        })
    }

    /// Remove the board. Deleting an absent board succeeds without writing.
    pub fn delete(&self, key: &ContextKey) -> Result<Outcome, BoardError> {
        let lock = self.locks.get(key);
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = (|| -> Result<Outcome, BoardError> {
            // An entry the store cannot decode looks up as None but is still removed.
            let message_ref = self.store.lookup(key)?.and_then(|r| r.message_ref);
            if !self.store.delete(key)? {
                return Ok(Outcome::retract("There is no scoreboard here.", None));
            }
            Ok(Outcome::retract(
                "Scoreboard deleted. Create a new one with /board_start.",
                message_ref,
            ))
        })();
        log_result(key, "delete", &result);
        drop(guard);
        drop(lock);
        self.locks.forget_idle(key);
        result
    }

    /// Record the message the host now displays this board in, e.g. after
    /// the previous one went missing and was re-posted.
    pub fn attach_message(&self, key: &ContextKey, message: MessageRef) -> Result<(), BoardError> {
        let lock = self.locks.get(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let record = self.existing(key)?;
        self.store_message_ref(key, record, message)
    }

    /// Bring the displayed message up to date with the stored record.
    ///
    /// Under the key lock, `display` gets the stored message ref and the
    /// text rendered from the *current* record, and returns the message now
    /// showing it; a changed ref is saved before the lock is released. No
    /// other command on the key can commit in between, so the stored ref
    /// always names a message showing the stored state. Returns `None` if
    /// the board no longer exists.
    pub fn display_with<E, F>(&self, key: &ContextKey, display: F) -> Result<Option<MessageRef>, E>
    where
        E: From<BoardError>,
        F: FnOnce(Option<MessageRef>, &str) -> Result<MessageRef, E>,
    {
        let lock = self.locks.get(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = self.store.lookup(key).map_err(BoardError::from)? else {
            return Ok(None);
        };
        let shown = display(record.message_ref, &render(&record))?;
        self.store_message_ref(key, record, shown)?;
        Ok(Some(shown))
    }

    fn store_message_ref(
        &self,
        key: &ContextKey,
        mut record: ScoreRecord,
        message: MessageRef,
    ) -> Result<(), BoardError> {
        if record.message_ref == Some(message) {
            return Ok(());
        }
        record.message_ref = Some(message);
        self.store.save(key, &record)?;
        log::info!("{} now displayed in message {}", key, message);
        Ok(())
    }
}

fn log_result(key: &ContextKey, op: &str, result: &Result<Outcome, BoardError>) {
    match result {
        Ok(outcome) => log::info!("{} {}: {}", key, op, outcome.notice),
        Err(e @ BoardError::Persistence(_)) => log::error!("{} {} failed: {}", key, op, e),
        Err(e) => log::debug!("{} {} rejected: {}", key, op, e),
    }
}
