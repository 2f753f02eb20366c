// src/pgn.rs
// Heuristic extraction from raw PGN move-text: header tags, move count,
// and the estimated game duration

use regex::Regex;
use std::sync::LazyLock;

/// Duration heuristic: assumed minutes per full move. The report's duration
/// figures are estimates derived from move count, never measured time.
pub const MINUTES_PER_MOVE: f64 = 0.5;

static ECO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[ECO "([^"]+)"\]"#).unwrap());
static ECO_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[ECOUrl "([^"]+)"\]"#).unwrap());
static TERMINATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[Termination "([^"]+)"\]"#).unwrap());
// Full-move numbers like "12. "; does not match black continuations ("12... ")
// or decimals inside clock annotations ("0:02:58.1")
static MOVE_NUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d+)\.\s").unwrap());

/// ECO code from the `[ECO ".."]` tag, if present
pub fn eco_code(pgn: &str) -> Option<String> {
    ECO_RE
        .captures(pgn)
        .map(|c| c[1].to_string())
}

/// Opening name from the `[ECOUrl ".."]` tag: the trailing URL segment with
/// hyphens replaced by spaces
pub fn opening_name(pgn: &str) -> Option<String> {
    let url = ECO_URL_RE.captures(pgn).map(|c| c[1].to_string())?;
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace('-', " "))
}

/// Free-text termination reason from the `[Termination ".."]` tag
pub fn termination(pgn: &str) -> Option<String> {
    TERMINATION_RE.captures(pgn).map(|c| c[1].to_string())
}

/// Number of full moves: the highest move number appearing in the move-text
pub fn move_count(pgn: &str) -> u32 {
    MOVE_NUM_RE
        .captures_iter(pgn)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Estimated game duration in minutes (move count x per-move constant)
pub fn estimated_minutes(pgn: &str) -> f64 {
    move_count(pgn) as f64 * MINUTES_PER_MOVE
}
