// src/analyzers/openings.rs
// Opening repertoire per color: aggregation keyed "ECO - name", ranked by
// win rate with a minimum-sample threshold

use super::percent;
use crate::model::{GameLog, GameRecord, Outcome};
use crate::report::{OpeningRanking, OpeningStat, OpeningsSection, SideOpenings};
use std::collections::BTreeMap;

/// An opening must be played at least this often to be ranked
const MIN_SAMPLES: u32 = 2;

/// (games, wins) per composite opening key
type OpeningCounts = BTreeMap<String, (u32, u32)>;

pub fn analyze(log: &GameLog, subject: &str) -> OpeningsSection {
    let (white, black) = aggregate(log.games().iter(), subject);
    OpeningsSection {
        as_white: rank(&white),
        as_black: rank(&black),
    }
}

/// Per-color opening aggregation over any set of games. Also used by the
/// format-specific analyzer for its per-category opening lists.
pub(crate) fn aggregate<'a>(
    games: impl Iterator<Item = &'a GameRecord>,
    subject: &str,
) -> (OpeningCounts, OpeningCounts) {
    let mut white = OpeningCounts::new();
    let mut black = OpeningCounts::new();
    for game in games {
        let key = format!("{} - {}", game.eco, game.opening);
        let entry = if game.subject_is_white(subject) {
            white.entry(key).or_insert((0, 0))
        } else {
            black.entry(key).or_insert((0, 0))
        };
        entry.0 += 1;
        if game.outcome_for(subject) == Outcome::Win {
            entry.1 += 1;
        }
    }
    (white, black)
}

/// Full per-color lists for the format-specific section: every opening
/// played, most-played first
pub(crate) fn side_openings<'a>(
    games: impl Iterator<Item = &'a GameRecord>,
    subject: &str,
) -> SideOpenings {
    let (white, black) = aggregate(games, subject);
    SideOpenings {
        as_white: full_list(&white),
        as_black: full_list(&black),
    }
}

fn stat(name: &str, games: u32, wins: u32) -> OpeningStat {
    OpeningStat {
        name: name.to_string(),
        games,
        wins,
        win_rate: percent(wins, games),
    }
}

fn full_list(counts: &OpeningCounts) -> Vec<OpeningStat> {
    let mut list: Vec<OpeningStat> = counts
        .iter()
        .map(|(name, (games, wins))| stat(name, *games, *wins))
        .collect();
    // Stable sort over the name-ordered map: ties stay alphabetical
    list.sort_by(|a, b| b.games.cmp(&a.games));
    list
}

fn rank(counts: &OpeningCounts) -> OpeningRanking {
    let eligible: Vec<OpeningStat> = counts
        .iter()
        .filter(|(_, (games, _))| *games >= MIN_SAMPLES)
        .map(|(name, (games, wins))| stat(name, *games, *wins))
        .collect();

    if eligible.is_empty() {
        return OpeningRanking {
            best: vec![OpeningStat::sentinel()],
            worst: vec![OpeningStat::sentinel()],
        };
    }

    let mut best = eligible.clone();
    best.sort_by(|a, b| b.win_rate.cmp(&a.win_rate).then(a.name.cmp(&b.name)));
    best.truncate(3);

    let mut worst = eligible;
    worst.sort_by(|a, b| a.win_rate.cmp(&b.win_rate).then(a.name.cmp(&b.name)));
    worst.truncate(3);

    OpeningRanking { best, worst }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{at, game, game_as_black, log, SUBJECT};
    use crate::model::GameCategory::Rapid;
    use crate::model::GameRecord;
    use crate::report::NO_OPENINGS_SENTINEL;

    fn with_opening(mut g: GameRecord, eco: &str, opening: &str) -> GameRecord {
        g.eco = eco.to_string();
        g.opening = opening.to_string();
        g
    }

    #[test]
    fn test_empty_log_yields_sentinels() {
        let section = analyze(&log(vec![]), SUBJECT);
        assert_eq!(section.as_white.best.len(), 1);
        assert_eq!(section.as_white.best[0].name, NO_OPENINGS_SENTINEL);
        assert_eq!(section.as_white.best[0].games, 0);
        assert_eq!(section.as_black.worst[0].name, NO_OPENINGS_SENTINEL);
    }

    #[test]
    fn test_minimum_sample_threshold() {
        // One Italian game as white: below the 2-game minimum
        let section = analyze(
            &log(vec![with_opening(
                game(Rapid, at("2025-01-01", 8), "win", 1500, "bob", 1450),
                "C50",
                "Italian Game",
            )]),
            SUBJECT,
        );
        assert_eq!(section.as_white.best[0].name, NO_OPENINGS_SENTINEL);
    }

    #[test]
    fn test_ranking_by_win_rate() {
        let mut games = Vec::new();
        // Sicilian as white: 2 games, 2 wins (100%)
        for (h, r) in [(8, "win"), (9, "win")] {
            games.push(with_opening(
                game(Rapid, at("2025-01-01", h), r, 1500, "bob", 1450),
                "B20",
                "Sicilian Defense",
            ));
        }
        // Italian as white: 2 games, 1 win (50%)
        for (h, r) in [(10, "win"), (11, "resigned")] {
            games.push(with_opening(
                game(Rapid, at("2025-01-01", h), r, 1500, "bob", 1450),
                "C50",
                "Italian Game",
            ));
        }
        // French as white: 2 games, 0 wins (0%)
        for (h, r) in [(12, "checkmated"), (13, "timeout")] {
            games.push(with_opening(
                game(Rapid, at("2025-01-01", h), r, 1500, "bob", 1450),
                "C00",
                "French Defense",
            ));
        }
        let section = analyze(&log(games), SUBJECT);
        let best: Vec<&str> = section
            .as_white
            .best
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(
            best,
            vec![
                "B20 - Sicilian Defense",
                "C50 - Italian Game",
                "C00 - French Defense"
            ]
        );
        assert_eq!(section.as_white.best[0].win_rate, 100);
        let worst_first = &section.as_white.worst[0];
        assert_eq!(worst_first.name, "C00 - French Defense");
        assert_eq!(worst_first.win_rate, 0);
        // Nothing played as black
        assert_eq!(section.as_black.best[0].name, NO_OPENINGS_SENTINEL);
    }

    #[test]
    fn test_colors_aggregate_independently() {
        let mut games = Vec::new();
        for h in [8, 9] {
            games.push(with_opening(
                game(Rapid, at("2025-01-01", h), "win", 1500, "bob", 1450),
                "C50",
                "Italian Game",
            ));
        }
        for h in [10, 11] {
            games.push(with_opening(
                game_as_black(Rapid, at("2025-01-01", h), "resigned", 1500, "bob", 1450),
                "C50",
                "Italian Game",
            ));
        }
        let section = analyze(&log(games), SUBJECT);
        assert_eq!(section.as_white.best[0].win_rate, 100);
        assert_eq!(section.as_black.best[0].win_rate, 0);
    }

    #[test]
    fn test_side_openings_sorted_by_volume() {
        let mut games = Vec::new();
        for h in [8, 9, 10] {
            games.push(with_opening(
                game(Rapid, at("2025-01-01", h), "win", 1500, "bob", 1450),
                "B20",
                "Sicilian Defense",
            ));
        }
        games.push(with_opening(
            game(Rapid, at("2025-01-01", 11), "win", 1500, "bob", 1450),
            "C50",
            "Italian Game",
        ));
        let all = log(games);
        let sides = side_openings(all.games().iter(), SUBJECT);
        assert_eq!(sides.as_white.len(), 2);
        assert_eq!(sides.as_white[0].name, "B20 - Sicilian Defense");
        assert_eq!(sides.as_white[0].games, 3);
        assert!(sides.as_black.is_empty());
    }
}
