//! ScoreRecord, Round, and the small value types stored with them.

use crate::models::error::{BoardError, Side};
use crate::models::name::validate_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used when `start` is given none.
pub const START_TITLE: &str = "戦績ボード";
/// Title assumed for a stored entry that has none.
pub const DEFAULT_TITLE: &str = "Scoreboard";
/// Width of the RND column (right-justified label + one trailing space).
pub const RND_WIDTH: usize = 5;
/// Width of each player column (" " + 8-char name + " ").
pub const PLAYER_WIDTH: usize = 10;

/// One round: points for player A (left) and player B (right).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub a: i64,
    pub b: i64,
}

impl Round {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }
}

/// Opaque handle to the externally published message showing a record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRef(pub u64);

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a zero score is displayed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroStyle {
    /// `0` renders as `-`.
    #[default]
    Dash,
    /// `0` renders as `0`.
    Zero,
}

impl FromStr for ZeroStyle {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dash" => Ok(ZeroStyle::Dash),
            "zero" => Ok(ZeroStyle::Zero),
            _ => Err(BoardError::InvalidZeroStyle(s.to_string())),
        }
    }
}

impl fmt::Display for ZeroStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroStyle::Dash => write!(f, "-"),
            ZeroStyle::Zero => write!(f, "0"),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_player_a() -> String {
    "PlayerA".to_string()
}

fn default_player_b() -> String {
    "PlayerB".to_string()
}

fn default_rnd_width() -> usize {
    RND_WIDTH
}

fn default_player_width() -> usize {
    PLAYER_WIDTH
}

fn default_zero_as_dash() -> bool {
    true
}

/// Full persisted state of one scoreboard.
///
/// Field names on the wire match the stored `scoreboards.json` layout, so
/// files written by earlier deployments keep loading.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_player_a")]
    pub player_a: String,
    #[serde(default = "default_player_b")]
    pub player_b: String,
    /// Round `n` (1-based) is `rounds[n - 1]`.
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// Message currently displaying this record, once published.
    #[serde(default, rename = "message_id")]
    pub message_ref: Option<MessageRef>,
    #[serde(default = "default_rnd_width", rename = "COL_RND")]
    pub rnd_width: usize,
    #[serde(default = "default_player_width", rename = "COL_PLY")]
    pub player_width: usize,
    #[serde(default = "default_zero_as_dash")]
    pub zero_as_dash: bool,
}

impl ScoreRecord {
    /// New record with no rounds. Names must already be validated.
    pub fn new(title: impl Into<String>, player_a: impl Into<String>, player_b: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            player_a: player_a.into(),
            player_b: player_b.into(),
            rounds: Vec::new(),
            message_ref: None,
            rnd_width: RND_WIDTH,
            player_width: PLAYER_WIDTH,
            zero_as_dash: true,
        }
    }

    /// A leftover with neither rounds nor a published message may be replaced by `start`.
    pub fn is_active(&self) -> bool {
        !self.rounds.is_empty() || self.message_ref.is_some()
    }

    pub fn zero_style(&self) -> ZeroStyle {
        if self.zero_as_dash {
            ZeroStyle::Dash
        } else {
            ZeroStyle::Zero
        }
    }

    pub fn set_zero_style(&mut self, style: ZeroStyle) {
        self.zero_as_dash = style == ZeroStyle::Dash;
    }

    /// Column sums `(Σa, Σb)`. Widened so long games cannot overflow.
    pub fn totals(&self) -> (i128, i128) {
        self.rounds.iter().fold((0, 0), |(ta, tb), r| {
            (ta + i128::from(r.a), tb + i128::from(r.b))
        })
    }

    /// `Σa - Σb`.
    pub fn diff(&self) -> i128 {
        let (ta, tb) = self.totals();
        ta - tb
    }

    /// Append a round; returns its 1-based number.
    pub fn push_round(&mut self, a: i64, b: i64) -> usize {
        self.rounds.push(Round::new(a, b));
        self.rounds.len()
    }

    /// Overwrite the supplied fields of round `round_no` (1-based).
    pub fn edit_round(&mut self, round_no: i64, a: Option<i64>, b: Option<i64>) -> Result<Round, BoardError> {
        if self.rounds.is_empty() {
            return Err(BoardError::NoRounds);
        }
        let last = self.rounds.len();
        let idx = usize::try_from(round_no)
            .ok()
            .filter(|n| (1..=last).contains(n))
            .ok_or(BoardError::RoundOutOfRange { round_no, last })?;
        let round = &mut self.rounds[idx - 1];
        if let Some(a) = a {
            round.a = a;
        }
        if let Some(b) = b {
            round.b = b;
        }
        Ok(*round)
    }

    /// Remove the last round.
    pub fn undo_round(&mut self) -> Result<Round, BoardError> {
        self.rounds.pop().ok_or(BoardError::NoRounds)
    }

    /// Clear all rounds; names, title and message reference stay.
    pub fn reset_rounds(&mut self) {
        self.rounds.clear();
    }

    /// Apply any supplied names/title. All names are checked before anything
    /// changes, so a rejected name leaves the record untouched. An empty title
    /// is ignored.
    pub fn rename(&mut self, player_a: Option<&str>, player_b: Option<&str>, title: Option<&str>) -> Result<(), BoardError> {
        let new_a = match player_a {
            Some(name) => Some(validate_name(Some(name)).ok_or(BoardError::InvalidName(Side::A))?),
            None => None,
        };
        let new_b = match player_b {
            Some(name) => Some(validate_name(Some(name)).ok_or(BoardError::InvalidName(Side::B))?),
            None => None,
        };
        if let Some(a) = new_a {
            self.player_a = a;
        }
        if let Some(b) = new_b {
            self.player_b = b;
        }
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.title = title.to_string();
        }
        Ok(())
    }
}
