//! Integration tests for the JSON file store: round-trips, recovery, atomic writes.

use duel_scoreboard::{
    ContextKey, JsonFileStore, MessageRef, RecordStore, Round, ScoreRecord, Scoreboards,
};
use std::fs;

fn sample() -> ScoreRecord {
    let mut r = ScoreRecord::new("A rather long title for the grand finals of the season", "Player01", "Hana");
    r.rounds = vec![Round::new(-5, 0), Round::new(i64::MAX, i64::MIN)];
    r.message_ref = Some(MessageRef(1_234_567_890_123_456_789));
    r.zero_as_dash = false;
    r
}

#[test]
fn save_then_lookup_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("boards.json"));
    let key = ContextKey::new(1, 2, Some(3));
    let empty = ScoreRecord::new("Empty", "a", "b");
    let empty_key = ContextKey::new(1, 2, None);

    store.save(&key, &sample()).unwrap();
    store.save(&empty_key, &empty).unwrap();

    let reopened = JsonFileStore::new(dir.path().join("boards.json"));
    assert_eq!(reopened.lookup(&key).unwrap(), Some(sample()));
    assert_eq!(reopened.lookup(&empty_key).unwrap(), Some(empty));
}

#[test]
fn missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let store = JsonFileStore::new(&path);
    assert_eq!(store.lookup(&ContextKey::new(1, 1, None)).unwrap(), None);
    assert!(!store.delete(&ContextKey::new(1, 1, None)).unwrap());
    assert!(!path.exists());
}

#[test]
fn corrupt_file_is_empty_and_gets_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);
    let key = ContextKey::new(1, 1, None);
    assert_eq!(store.lookup(&key).unwrap(), None);

    store.save(&key, &sample()).unwrap();
    assert_eq!(store.lookup(&key).unwrap(), Some(sample()));
}

#[test]
fn leftover_tmp_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    let store = JsonFileStore::new(&path);
    let key = ContextKey::new(1, 1, None);
    store.save(&key, &sample()).unwrap();

    fs::write(dir.path().join("boards.json.tmp"), "{ half writ").unwrap();
    assert_eq!(store.lookup(&key).unwrap(), Some(sample()));
    store.save(&ContextKey::new(2, 2, None), &sample()).unwrap();
    assert!(!dir.path().join("boards.json.tmp").exists());
}

#[test]
fn writes_stored_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("boards.json");
    let store = JsonFileStore::new(&path);
    let mut record = ScoreRecord::new("戦績", "Reo", "Haruna");
    record.rounds.push(Round::new(3, 1));
    store.save(&ContextKey::new(11, 22, None), &record).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("戦績"), "UTF-8 kept literally");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entry = &json["11:22:0"];
    assert_eq!(entry["player_a"], "Reo");
    assert_eq!(entry["rounds"], serde_json::json!([{ "a": 3, "b": 1 }]));
    assert_eq!(entry["message_id"], serde_json::Value::Null);
    assert_eq!(entry["COL_RND"], 5);
    assert_eq!(entry["COL_PLY"], 10);
    assert_eq!(entry["zero_as_dash"], true);
}

#[test]
fn reads_entries_with_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    fs::write(
        &path,
        r#"{"5:6:0": {"player_a": "Reo", "rounds": [{"a": 1, "b": 2}], "message_id": 99}}"#,
    )
    .unwrap();
    let record = JsonFileStore::new(&path)
        .lookup(&ContextKey::new(5, 6, None))
        .unwrap()
        .unwrap();
    assert_eq!(record.title, "Scoreboard");
    assert_eq!(record.player_b, "PlayerB");
    assert_eq!(record.rounds, vec![Round::new(1, 2)]);
    assert_eq!(record.message_ref, Some(MessageRef(99)));
}

#[test]
fn undecodable_entry_is_skipped_but_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    fs::write(&path, r#"{"9:9:0": {"rounds": "oops"}}"#).unwrap();
    let store = JsonFileStore::new(&path);
    assert_eq!(store.lookup(&ContextKey::new(9, 9, None)).unwrap(), None);

    store.save(&ContextKey::new(1, 1, None), &sample()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["9:9:0"]["rounds"], "oops");
}

#[test]
fn delete_removes_only_its_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("boards.json"));
    let a = ContextKey::new(1, 1, None);
    let b = ContextKey::new(1, 1, Some(2));
    store.save(&a, &sample()).unwrap();
    store.save(&b, &sample()).unwrap();
    assert!(store.delete(&a).unwrap());
    assert_eq!(store.lookup(&a).unwrap(), None);
    assert_eq!(store.lookup(&b).unwrap(), Some(sample()));
}

#[test]
fn deleting_an_undecodable_board_removes_its_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    fs::write(&path, r#"{"9:9:0": {"rounds": "oops"}, "1:1:0": {}}"#).unwrap();
    let boards = Scoreboards::new(JsonFileStore::new(&path));

    let outcome = boards.delete(&ContextKey::new(9, 9, None)).unwrap();
    assert_eq!(outcome.notice, "Scoreboard deleted. Create a new one with /board_start.");
    assert_eq!(outcome.message_ref(), None);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json.get("9:9:0").is_none());
    assert!(json.get("1:1:0").is_some());
}
