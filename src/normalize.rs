// src/normalize.rs
// Converts heterogeneous raw archive records into canonical GameRecords,
// silently dropping malformed entries

use crate::model::{GameCategory, GameLog, GameRecord, GameSide};
use crate::pgn;
use crate::upstream::types::{RawArchive, RawGame};
use tracing::debug;

/// Placeholder ECO code when the move-text carries no tag
pub const UNKNOWN_ECO: &str = "Unknown";
/// Placeholder opening name when the move-text carries no tag
pub const UNKNOWN_OPENING: &str = "Unknown Opening";

/// Flatten a set of raw archives into a chronologically sorted game log.
/// Malformed entries are filtered, never errors.
pub fn normalize_archives(archives: Vec<RawArchive>) -> GameLog {
    let mut dropped = 0usize;
    let games: Vec<GameRecord> = archives
        .into_iter()
        .flat_map(|a| a.games)
        .filter_map(|raw| {
            normalize_game(raw).or_else(|| {
                dropped += 1;
                None
            })
        })
        .collect();
    if dropped > 0 {
        debug!(dropped, "dropped malformed raw games during normalization");
    }
    GameLog::new(games)
}

/// Normalize one raw game. Returns None when the category is unrecognized
/// or a required field (usernames, result codes, end timestamp) is missing.
pub fn normalize_game(raw: RawGame) -> Option<GameRecord> {
    let category = GameCategory::parse(raw.time_class.as_deref()?)?;
    let end_time = raw.end_time?;
    let white = raw.white?;
    let black = raw.black?;

    let white_name = white.username.filter(|u| !u.is_empty())?;
    let black_name = black.username.filter(|u| !u.is_empty())?;
    let white_result = white.result?;
    let black_result = black.result?;

    let moves = raw.pgn.unwrap_or_default();
    let (white_acc, black_acc) = match &raw.accuracies {
        Some(a) => (a.white, a.black),
        None => (None, None),
    };

    Some(GameRecord {
        category,
        white: GameSide {
            username: white_name,
            rating: white.rating.unwrap_or(0),
            result: white_result,
            accuracy: white_acc,
        },
        black: GameSide {
            username: black_name,
            rating: black.rating.unwrap_or(0),
            result: black_result,
            accuracy: black_acc,
        },
        eco: pgn::eco_code(&moves).unwrap_or_else(|| UNKNOWN_ECO.to_string()),
        opening: pgn::opening_name(&moves).unwrap_or_else(|| UNKNOWN_OPENING.to_string()),
        url: raw.url.unwrap_or_default(),
        end_time,
        termination: pgn::termination(&moves).unwrap_or_default(),
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::types::RawSide;

    fn raw_side(username: &str, rating: u32, result: &str) -> RawSide {
        RawSide {
            username: Some(username.to_string()),
            rating: Some(rating),
            result: Some(result.to_string()),
        }
    }

    fn raw_game(time_class: &str, end_time: i64) -> RawGame {
        RawGame {
            url: Some("https://example.test/game/9".to_string()),
            pgn: Some("[ECO \"C50\"]\n[ECOUrl \"https://www.chess.com/openings/Italian-Game\"]\n1. e4 e5 2. Nf3 Nc6 3. Bc4 1-0".to_string()),
            time_class: Some(time_class.to_string()),
            end_time: Some(end_time),
            white: Some(raw_side("alice", 1500, "win")),
            black: Some(raw_side("bob", 1480, "resigned")),
            accuracies: None,
        }
    }

    #[test]
    fn test_normalize_valid_game() {
        let game = normalize_game(raw_game("rapid", 1_700_000_000)).unwrap();
        assert_eq!(game.category, GameCategory::Rapid);
        assert_eq!(game.eco, "C50");
        assert_eq!(game.opening, "Italian Game");
        assert_eq!(game.white.rating, 1500);
    }

    #[test]
    fn test_unknown_category_dropped() {
        assert!(normalize_game(raw_game("daily", 1)).is_none());
        assert!(normalize_game(raw_game("chess960", 1)).is_none());
    }

    #[test]
    fn test_missing_required_fields_dropped() {
        let mut g = raw_game("blitz", 1);
        g.white = None;
        assert!(normalize_game(g).is_none());

        let mut g = raw_game("blitz", 1);
        g.black.as_mut().unwrap().result = None;
        assert!(normalize_game(g).is_none());

        let mut g = raw_game("blitz", 1);
        g.white.as_mut().unwrap().username = Some(String::new());
        assert!(normalize_game(g).is_none());

        let mut g = raw_game("blitz", 1);
        g.end_time = None;
        assert!(normalize_game(g).is_none());
    }

    #[test]
    fn test_defaults_applied() {
        let mut g = raw_game("bullet", 1);
        g.pgn = None;
        g.white.as_mut().unwrap().rating = None;
        let game = normalize_game(g).unwrap();
        assert_eq!(game.eco, UNKNOWN_ECO);
        assert_eq!(game.opening, UNKNOWN_OPENING);
        assert_eq!(game.termination, "");
        assert_eq!(game.white.rating, 0);
    }

    #[test]
    fn test_archives_flattened_and_sorted() {
        let a1 = RawArchive {
            games: vec![raw_game("rapid", 300), raw_game("blitz", 100)],
        };
        let a2 = RawArchive {
            games: vec![raw_game("rapid", 200), raw_game("daily", 50)],
        };
        let log = normalize_archives(vec![a1, a2]);
        assert_eq!(log.len(), 3);
        let times: Vec<i64> = log.games().iter().map(|g| g.end_time).collect();
        assert_eq!(times, vec![100, 200, 300]);
    }
}
