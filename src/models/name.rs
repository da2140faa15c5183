//! Competitor name validation.

/// Longest name the table can show; longer ASCII names are cut to this.
pub const MAX_NAME_LEN: usize = 8;

/// Normalize a competitor name for display.
///
/// * `None` stays `None` (caller treats it as "no change").
/// * Any non-ASCII character rejects the whole name (`None`).
/// * Otherwise the first [`MAX_NAME_LEN`] characters are kept.
pub fn validate_name(name: Option<&str>) -> Option<String> {
    let name = name?;
    if !name.is_ascii() {
        return None;
    }
    // ASCII: byte index == char index
    Some(name[..name.len().min(MAX_NAME_LEN)].to_string())
}
