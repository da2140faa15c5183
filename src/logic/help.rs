//! Static help text for the command surface.

pub const HELP_TEXT: &str = "\
**Scoreboard help**

Commands:
- `/board_start <player_a> <player_b> [title]`
  Start a new scoreboard. Names are ASCII, up to 8 characters (right-justified).
- `/board_add <a> <b>`
  Add a round. Zeros display as '-' or '0' depending on the zero style.
- `/board_edit <round_no> [a] [b]`
  Fix a round's scores. e.g. `/board_edit 3 a:50`
- `/board_undo`
  Remove the last round.
- `/board_show`
  Re-render the scoreboard.
- `/board_rename [player_a] [player_b] [title]`
  Change player names or the title (names are ASCII, up to 8 characters).
- `/board_reset`
  Clear all rounds (names and title are kept).
- `/board_delete`
  Delete the scoreboard entirely (message and data).
- `/board_zero_style <dash|zero>`
  Choose how zeros display (`dash` -> '-', `zero` -> '0').
- `/board_help`
  Show this help.

---
**Layout**:
- RND: width 5 (right-justified + trailing space)
- Name columns: 8 ASCII characters right-justified, a space on each side (width 10)
- Score columns: right-justified + trailing space (width 10); 0 shows as '-' or '0'
- Σ: totals, Δ: difference (always signed)
";

/// Help shown for `help()`.
pub fn help() -> &'static str {
    HELP_TEXT
}
