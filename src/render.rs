//! Fixed-width table rendering of a [`ScoreRecord`].
//!
//! ```text
//! +-----+----------+----------+
//! | RND |      Reo |   Haruna |
//! +-----+----------+----------+
//! |   1 |        3 |        1 |
//! |   2 |        - |        2 |
//! +-----+----------+----------+
//! |   Σ |        3 |        3 |
//! |   Δ |       +0 |       +0 |
//! +-----+----------+----------+
//! ```
//!
//! Widths are counted in characters, so `Σ`/`Δ` pad like any ASCII label.
//! Values wider than their field overflow instead of being cut.

use crate::models::{ScoreRecord, MAX_NAME_LEN};

/// Full message body: bold heading line, then the table in a code block.
pub fn render(record: &ScoreRecord) -> String {
    format!("**{}**\n```\n{}```", heading(record), render_table(record))
}

/// `【title】 A vs B`
pub fn heading(record: &ScoreRecord) -> String {
    format!(
        "\u{3010}{}\u{3011} {} vs {}",
        record.title, record.player_a, record.player_b
    )
}

/// The table alone; every line ends with `\n`.
pub fn render_table(record: &ScoreRecord) -> String {
    let layout = Layout::of(record);
    let rule = layout.rule();
    let (ta, tb) = record.totals();
    let diff = ta - tb;

    let mut out = String::new();
    out.push_str(&rule);
    layout.row(&mut out, "RND", &name_cell(&record.player_a), &name_cell(&record.player_b));
    out.push_str(&rule);
    for (i, round) in record.rounds.iter().enumerate() {
        let a = layout.score(i128::from(round.a));
        let b = layout.score(i128::from(round.b));
        layout.row(&mut out, &(i + 1).to_string(), &a, &b);
    }
    out.push_str(&rule);
    layout.row(&mut out, "Σ", &layout.score(ta), &layout.score(tb));
    layout.row(&mut out, "Δ", &layout.signed(diff), &layout.signed(-diff));
    out.push_str(&rule);
    out
}

struct Layout {
    rnd: usize,
    ply: usize,
    zero_as_dash: bool,
}

impl Layout {
    fn of(record: &ScoreRecord) -> Self {
        Self {
            rnd: record.rnd_width,
            ply: record.player_width,
            zero_as_dash: record.zero_as_dash,
        }
    }

    fn rule(&self) -> String {
        format!(
            "+{}+{}+{}+\n",
            "-".repeat(self.rnd),
            "-".repeat(self.ply),
            "-".repeat(self.ply)
        )
    }

    fn row(&self, out: &mut String, label: &str, a: &str, b: &str) {
        out.push_str(&format!("|{}|{}|{}|\n", self.rnd_cell(label), a, b));
    }

    fn rnd_cell(&self, label: &str) -> String {
        format!("{:>w$} ", label, w = self.rnd.saturating_sub(1))
    }

    fn score(&self, value: i128) -> String {
        let text = match value {
            0 if self.zero_as_dash => "-".to_string(),
            v => v.to_string(),
        };
        format!("{:>w$} ", text, w = self.ply.saturating_sub(1))
    }

    // Zero style never applies here: 0 is always "+0".
    fn signed(&self, value: i128) -> String {
        format!("{:>w$} ", format!("{:+}", value), w = self.ply.saturating_sub(1))
    }
}

fn name_cell(name: &str) -> String {
    let ascii: String = name.chars().filter(char::is_ascii).take(MAX_NAME_LEN).collect();
    format!(" {:>w$} ", ascii, w = MAX_NAME_LEN)
}
