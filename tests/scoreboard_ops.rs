//! Integration tests for the command layer: state transitions, rejections, persistence.

use duel_scoreboard::models::START_TITLE;
use duel_scoreboard::{
    BoardError, ContextKey, ErrorKind, JsonFileStore, MemoryStore, MessageAction, MessageRef,
    Round, Scoreboards, Side,
};
use std::sync::Arc;
use std::thread;

fn key() -> ContextKey {
    ContextKey::new(1, 10, None)
}

fn finals_board() -> Scoreboards<MemoryStore> {
    let boards = Scoreboards::new(MemoryStore::new());
    boards.start(&key(), "Reo", "Haruna", Some("Finals")).unwrap();
    boards.add(&key(), 3, 1).unwrap();
    boards.add(&key(), 0, 2).unwrap();
    boards
}

fn rounds(boards: &Scoreboards<MemoryStore>) -> Vec<Round> {
    boards.lookup(&key()).unwrap().unwrap().rounds
}

#[test]
fn scenario_a_totals_and_difference() {
    let boards = finals_board();
    let record = boards.lookup(&key()).unwrap().unwrap();
    assert_eq!(record.rounds, vec![Round::new(3, 1), Round::new(0, 2)]);
    assert_eq!(record.totals(), (3, 3));
    assert_eq!(record.diff(), 0);
    let text = boards.show(&key()).unwrap().rendered().unwrap().to_string();
    assert!(text.contains("|   Δ |       +0 |       +0 |\n"));
}

#[test]
fn scenario_b_edit_one_side() {
    let boards = finals_board();
    let outcome = boards.edit(&key(), 1, None, Some(5)).unwrap();
    assert_eq!(outcome.notice, "Round 1 updated. A=3 B=5");
    let record = outcome.record.unwrap();
    assert_eq!(record.rounds[0], Round::new(3, 5));
    assert_eq!(record.totals(), (3, 7));
    assert_eq!(record.diff(), -4);
}

#[test]
fn scenario_c_zero_style_zero() {
    let boards = finals_board();
    boards.set_zero_style(&key(), "zero").unwrap();
    let outcome = boards.add(&key(), 0, 0).unwrap();
    assert!(outcome.rendered().unwrap().contains("|   3 |        0 |        0 |\n"));
}

#[test]
fn scenario_d_rejected_rename_does_not_write() {
    let boards = finals_board();
    let before = boards.lookup(&key()).unwrap().unwrap();
    let writes = boards.store().writes();
    let err = boards.rename(&key(), Some("日本語"), None, None).unwrap_err();
    assert!(matches!(err, BoardError::InvalidName(Side::A)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(boards.store().writes(), writes);
    assert_eq!(boards.lookup(&key()).unwrap().unwrap(), before);
}

#[test]
fn scenario_e_delete_absent_is_ok_and_leaves_others() {
    let boards = finals_board();
    let other = ContextKey::new(1, 10, Some(99));
    let writes = boards.store().writes();
    let outcome = boards.delete(&other).unwrap();
    assert_eq!(outcome.action, MessageAction::Retract { existing: None });
    assert_eq!(boards.store().writes(), writes);
    assert!(boards.lookup(&key()).unwrap().is_some());
}

#[test]
fn start_validates_names_and_truncates() {
    let boards = Scoreboards::new(MemoryStore::new());
    let err = boards.start(&key(), "Reo", "ハルナ", None).unwrap_err();
    assert!(matches!(err, BoardError::InvalidName(Side::B)));
    assert!(boards.lookup(&key()).unwrap().is_none());

    let outcome = boards.start(&key(), "Player0123", "B", None).unwrap();
    let record = outcome.record.unwrap();
    assert_eq!(record.player_a, "Player01");
    assert_eq!(record.title, START_TITLE);
    assert_eq!(outcome.action, MessageAction::Upsert {
        text: duel_scoreboard::render(&record),
        existing: None,
    });
}

#[test]
fn start_conflicts_with_active_board() {
    let boards = finals_board();
    let err = boards.start(&key(), "X", "Y", None).unwrap_err();
    assert!(matches!(err, BoardError::AlreadyActive));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(rounds(&boards).len(), 2);
}

#[test]
fn start_conflicts_when_only_a_message_exists() {
    let boards = Scoreboards::new(MemoryStore::new());
    boards.start(&key(), "A", "B", None).unwrap();
    boards.attach_message(&key(), MessageRef(42)).unwrap();
    assert!(matches!(
        boards.start(&key(), "X", "Y", None),
        Err(BoardError::AlreadyActive)
    ));
}

#[test]
fn start_replaces_inactive_leftover() {
    let boards = Scoreboards::new(MemoryStore::new());
    boards.start(&key(), "A", "B", Some("Old")).unwrap();
    let record = boards.start(&key(), "X", "Y", Some("New")).unwrap().record.unwrap();
    assert_eq!((record.player_a.as_str(), record.title.as_str()), ("X", "New"));
}

#[test]
fn commands_need_a_board() {
    let boards = Scoreboards::new(MemoryStore::new());
    let k = key();
    let results = [
        boards.add(&k, 1, 1),
        boards.edit(&k, 1, Some(1), None),
        boards.undo(&k),
        boards.show(&k),
        boards.rename(&k, Some("A"), None, None),
        boards.reset(&k),
        boards.set_zero_style(&k, "dash"),
    ];
    for result in results {
        assert!(matches!(result, Err(BoardError::NotFound)));
    }
    assert!(matches!(boards.attach_message(&k, MessageRef(1)), Err(BoardError::NotFound)));
    assert_eq!(boards.store().writes(), 0);
}

#[test]
fn edit_out_of_range_states_valid_range() {
    let boards = finals_board();
    let err = boards.edit(&key(), 3, Some(1), None).unwrap_err();
    assert_eq!(err.to_string(), "Round 3 does not exist. The current last round is 2.");
    assert_eq!(rounds(&boards), vec![Round::new(3, 1), Round::new(0, 2)]);
}

#[test]
fn edit_and_undo_without_rounds_are_rejected() {
    let boards = Scoreboards::new(MemoryStore::new());
    boards.start(&key(), "A", "B", None).unwrap();
    assert!(matches!(boards.edit(&key(), 1, Some(1), None), Err(BoardError::NoRounds)));
    assert!(matches!(boards.undo(&key()), Err(BoardError::NoRounds)));
}

#[test]
fn add_then_undo_restores_rounds() {
    let boards = finals_board();
    let before = rounds(&boards);
    boards.add(&key(), -7, 12).unwrap();
    boards.undo(&key()).unwrap();
    assert_eq!(rounds(&boards), before);
    let outcome = boards.add(&key(), 4, 4).unwrap();
    assert_eq!(outcome.notice, "Added: RND 3  A=4  B=4");
}

#[test]
fn show_never_mutates_or_writes() {
    let boards = finals_board();
    let before = boards.lookup(&key()).unwrap().unwrap();
    let writes = boards.store().writes();
    let first = boards.show(&key()).unwrap();
    let second = boards.show(&key()).unwrap();
    assert_eq!(first, second);
    assert_eq!(boards.store().writes(), writes);
    assert_eq!(boards.lookup(&key()).unwrap().unwrap(), before);
}

#[test]
fn reset_keeps_names_title_and_message() {
    let boards = finals_board();
    boards.attach_message(&key(), MessageRef(7)).unwrap();
    let record = boards.reset(&key()).unwrap().record.unwrap();
    assert!(record.rounds.is_empty());
    assert_eq!(record.title, "Finals");
    assert_eq!(record.player_b, "Haruna");
    assert_eq!(record.message_ref, Some(MessageRef(7)));
}

#[test]
fn rename_applies_supplied_fields_only() {
    let boards = finals_board();
    let record = boards
        .rename(&key(), None, Some("Hina"), Some("Semis"))
        .unwrap()
        .record
        .unwrap();
    assert_eq!(record.player_a, "Reo");
    assert_eq!(record.player_b, "Hina");
    assert_eq!(record.title, "Semis");
}

#[test]
fn invalid_zero_style_is_rejected() {
    let boards = finals_board();
    let err = boards.set_zero_style(&key(), "blank").unwrap_err();
    assert!(matches!(err, BoardError::InvalidZeroStyle(_)));
    assert!(boards.lookup(&key()).unwrap().unwrap().zero_as_dash);
    boards.set_zero_style(&key(), "ZERO").unwrap();
    assert!(!boards.lookup(&key()).unwrap().unwrap().zero_as_dash);
}

#[test]
fn delete_reports_message_to_remove() {
    let boards = finals_board();
    boards.attach_message(&key(), MessageRef(5)).unwrap();
    let outcome = boards.delete(&key()).unwrap();
    assert_eq!(outcome.message_ref(), Some(MessageRef(5)));
    assert!(outcome.rendered().is_none());
    assert!(boards.lookup(&key()).unwrap().is_none());
}

#[test]
fn attach_message_skips_unchanged_ref() {
    let boards = finals_board();
    boards.attach_message(&key(), MessageRef(5)).unwrap();
    let writes = boards.store().writes();
    boards.attach_message(&key(), MessageRef(5)).unwrap();
    assert_eq!(boards.store().writes(), writes);
    boards.attach_message(&key(), MessageRef(6)).unwrap();
    assert_eq!(boards.store().writes(), writes + 1);
    assert_eq!(boards.show(&key()).unwrap().message_ref(), Some(MessageRef(6)));
}

#[test]
fn failed_write_commits_nothing() {
    let boards = finals_board();
    boards.store().fail_writes(true);
    let err = boards.add(&key(), 9, 9).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(matches!(boards.delete(&key()), Err(BoardError::Persistence(_))));
    boards.store().fail_writes(false);
    assert_eq!(rounds(&boards).len(), 2);
}

#[test]
fn concurrent_adds_on_one_key_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let boards = Arc::new(Scoreboards::new(JsonFileStore::new(dir.path().join("boards.json"))));
    let shared = key();
    let other = ContextKey::new(2, 20, Some(200));
    boards.start(&shared, "A", "B", None).unwrap();
    boards.start(&other, "C", "D", None).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let boards = Arc::clone(&boards);
            thread::spawn(move || {
                for _ in 0..5 {
                    boards.add(&shared, i, 1).unwrap();
                    boards.add(&other, 1, i).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let a = boards.lookup(&shared).unwrap().unwrap();
    let b = boards.lookup(&other).unwrap().unwrap();
    assert_eq!(a.rounds.len(), 40);
    assert_eq!(b.rounds.len(), 40);
    assert_eq!(a.totals(), (5 * (0..8).sum::<i128>(), 40));
}
