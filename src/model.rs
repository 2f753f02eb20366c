// src/model.rs
// Canonical game domain types: categories, records, and the sorted game log

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Result codes the upstream reports for drawn games
const DRAW_CODES: &[&str] = &[
    "agreed",
    "repetition",
    "stalemate",
    "insufficient",
    "50move",
    "timevsinsufficient",
];

/// Supported time controls. Any other upstream time class is discarded
/// during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    Rapid,
    Blitz,
    Bullet,
}

impl GameCategory {
    /// All categories in declaration order. Every category-keyed walk in the
    /// analyzers iterates in this order, which is also the documented
    /// tie-break order for "pick the max" reductions.
    pub const ALL: [GameCategory; 3] = [
        GameCategory::Rapid,
        GameCategory::Blitz,
        GameCategory::Bullet,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rapid" => Some(GameCategory::Rapid),
            "blitz" => Some(GameCategory::Blitz),
            "bullet" => Some(GameCategory::Bullet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCategory::Rapid => "rapid",
            GameCategory::Blitz => "blitz",
            GameCategory::Bullet => "bullet",
        }
    }
}

impl std::fmt::Display for GameCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a game from the subject's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Classify an upstream result code. "win" is a win, the known draw codes
/// are draws, and everything else (checkmated, resigned, timeout, abandoned,
/// ...) counts as a loss.
pub fn outcome_of(result_code: &str) -> Outcome {
    if result_code == "win" {
        Outcome::Win
    } else if DRAW_CODES.contains(&result_code) {
        Outcome::Draw
    } else {
        Outcome::Loss
    }
}

/// One side of a normalized game
#[derive(Debug, Clone)]
pub struct GameSide {
    pub username: String,
    /// Post-game rating as reported upstream; 0 when absent
    pub rating: u32,
    /// Raw upstream result code for this side
    pub result: String,
    /// Engine accuracy for this side (0-100) when the upstream analyzed the game
    pub accuracy: Option<f64>,
}

/// One normalized game. Immutable once constructed by the normalizer.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub category: GameCategory,
    pub white: GameSide,
    pub black: GameSide,
    /// ECO classification code, "Unknown" when absent
    pub eco: String,
    /// Human-readable opening name, "Unknown Opening" when absent
    pub opening: String,
    /// Canonical game URL
    pub url: String,
    /// End-of-game timestamp, seconds since epoch (UTC)
    pub end_time: i64,
    /// Free-text termination reason, possibly empty
    pub termination: String,
    /// Raw move-text, used only for the move-count duration heuristic
    pub moves: String,
}

impl GameRecord {
    pub fn end_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.end_time, 0).unwrap_or_default()
    }

    /// Calendar day the game ended on (UTC)
    pub fn end_date(&self) -> NaiveDate {
        self.end_datetime().date_naive()
    }

    /// Returns (subject side, opponent side). Username comparison is
    /// case-insensitive; falls back to white when the name matches neither side.
    pub fn sides_for(&self, subject: &str) -> (&GameSide, &GameSide) {
        if self.black.username.eq_ignore_ascii_case(subject) {
            (&self.black, &self.white)
        } else {
            (&self.white, &self.black)
        }
    }

    /// Outcome from the subject's point of view
    pub fn outcome_for(&self, subject: &str) -> Outcome {
        outcome_of(&self.sides_for(subject).0.result)
    }

    /// True when the subject played the white pieces
    pub fn subject_is_white(&self, subject: &str) -> bool {
        !self.black.username.eq_ignore_ascii_case(subject)
    }
}

/// Chronologically sorted sequence of games for one subject.
/// Construction sorts ascending by end timestamp; the order is exported
/// verbatim to every analyzer.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    games: Vec<GameRecord>,
}

impl GameLog {
    pub fn new(mut games: Vec<GameRecord>) -> Self {
        games.sort_by_key(|g| g.end_time);
        Self { games }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games of one category, preserving chronological order
    pub fn of_category(&self, category: GameCategory) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(move |g| g.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(username: &str, rating: u32, result: &str) -> GameSide {
        GameSide {
            username: username.to_string(),
            rating,
            result: result.to_string(),
            accuracy: None,
        }
    }

    fn record(end_time: i64) -> GameRecord {
        GameRecord {
            category: GameCategory::Rapid,
            white: side("alice", 1500, "win"),
            black: side("bob", 1450, "resigned"),
            eco: "B20".to_string(),
            opening: "Sicilian Defense".to_string(),
            url: "https://example.test/game/1".to_string(),
            end_time,
            termination: "alice won by resignation".to_string(),
            moves: String::new(),
        }
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(outcome_of("win"), Outcome::Win);
        assert_eq!(outcome_of("agreed"), Outcome::Draw);
        assert_eq!(outcome_of("timevsinsufficient"), Outcome::Draw);
        assert_eq!(outcome_of("checkmated"), Outcome::Loss);
        assert_eq!(outcome_of("abandoned"), Outcome::Loss);
    }

    #[test]
    fn test_sides_for_is_case_insensitive() {
        let game = record(1_700_000_000);
        let (me, them) = game.sides_for("BOB");
        assert_eq!(me.username, "bob");
        assert_eq!(them.username, "alice");
        assert_eq!(game.outcome_for("BOB"), Outcome::Loss);
        assert!(!game.subject_is_white("Bob"));
        assert!(game.subject_is_white("alice"));
    }

    #[test]
    fn test_log_sorts_on_construction() {
        let log = GameLog::new(vec![record(300), record(100), record(200)]);
        let times: Vec<i64> = log.games().iter().map(|g| g.end_time).collect();
        assert_eq!(times, vec![100, 200, 300]);
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!(GameCategory::parse("rapid"), Some(GameCategory::Rapid));
        assert_eq!(GameCategory::parse("daily"), None);
        assert_eq!(GameCategory::parse("chess960"), None);
    }
}
