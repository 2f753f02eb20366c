// src/analyzers/patterns.rs
// Temporal habits: time-of-day and day-of-week buckets, play cadence,
// and the longest (estimated) game

use super::{percent, round1};
use crate::model::{GameLog, Outcome};
use crate::pgn;
use crate::report::{BucketStat, LongestGame, PatternsSection};
use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use std::collections::BTreeSet;

/// A bucket needs this many games before its win rate can be "best"
const MIN_BUCKET_GAMES: u32 = 5;
/// Label reported when no bucket has enough games
const NOT_ENOUGH_DATA: &str = "Not enough data";

/// Time-of-day bucket labels, in scan order
const HOUR_BUCKETS: [&str; 4] = ["morning", "afternoon", "evening", "night"];
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Bucket index for an hour of day (UTC): morning 5-11, afternoon 12-16,
/// evening 17-21, night otherwise
fn hour_bucket(hour: u32) -> usize {
    match hour {
        5..=11 => 0,
        12..=16 => 1,
        17..=21 => 2,
        _ => 3,
    }
}

pub fn analyze(log: &GameLog, subject: &str) -> PatternsSection {
    let mut hours = [(0u32, 0u32); 4]; // (games, wins)
    let mut weekdays = [(0u32, 0u32); 7];
    let mut distinct_days: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut longest_game: Option<LongestGame> = None;

    for game in log.games() {
        let ended = game.end_datetime();
        let won = game.outcome_for(subject) == Outcome::Win;

        let h = hour_bucket(ended.hour());
        hours[h].0 += 1;
        let d = ended.weekday().num_days_from_monday() as usize;
        weekdays[d].0 += 1;
        if won {
            hours[h].1 += 1;
            weekdays[d].1 += 1;
        }
        distinct_days.insert(ended.date_naive());

        let minutes = pgn::estimated_minutes(&game.moves);
        // Strictly-greater keeps the first encountered on ties
        if longest_game.as_ref().is_none_or(|l| minutes > l.estimated_minutes) {
            longest_game = Some(LongestGame {
                url: game.url.clone(),
                moves: pgn::move_count(&game.moves),
                estimated_minutes: minutes,
                date: ended.date_naive(),
            });
        }
    }

    let time_of_day: Vec<BucketStat> = HOUR_BUCKETS
        .iter()
        .zip(hours.iter())
        .map(|(label, (games, wins))| bucket(label, *games, *wins))
        .collect();
    let day_of_week: Vec<BucketStat> = WEEKDAYS
        .iter()
        .zip(weekdays.iter())
        .map(|(day, (games, wins))| bucket(&day.to_string(), *games, *wins))
        .collect();

    let total = log.len() as u32;
    let avg_games_per_day = if distinct_days.is_empty() {
        0.0
    } else {
        round1(total as f64 / distinct_days.len() as f64)
    };

    PatternsSection {
        best_time_of_day: best_bucket(&time_of_day),
        best_day_of_week: best_bucket(&day_of_week),
        time_of_day,
        day_of_week,
        avg_games_per_day,
        longest_game: if log.is_empty() { None } else { longest_game },
    }
}

fn bucket(label: &str, games: u32, wins: u32) -> BucketStat {
    BucketStat {
        label: label.to_string(),
        games,
        wins,
        win_rate: percent(wins, games),
    }
}

/// Highest win rate among buckets with enough games; first in scan order
/// wins ties. Falls back to a fixed label when nothing qualifies.
fn best_bucket(buckets: &[BucketStat]) -> String {
    let mut best: Option<&BucketStat> = None;
    for b in buckets {
        if b.games >= MIN_BUCKET_GAMES && best.is_none_or(|cur| b.win_rate > cur.win_rate) {
            best = Some(b);
        }
    }
    best.map(|b| b.label.clone())
        .unwrap_or_else(|| NOT_ENOUGH_DATA.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{at, game, log, SUBJECT};
    use crate::model::GameCategory::Rapid;

    #[test]
    fn test_empty_log() {
        let section = analyze(&log(vec![]), SUBJECT);
        assert_eq!(section.best_time_of_day, NOT_ENOUGH_DATA);
        assert_eq!(section.best_day_of_week, NOT_ENOUGH_DATA);
        assert_eq!(section.avg_games_per_day, 0.0);
        assert!(section.longest_game.is_none());
        assert!(section.time_of_day.iter().all(|b| b.games == 0));
    }

    #[test]
    fn test_hour_bucketing() {
        assert_eq!(hour_bucket(5), 0);
        assert_eq!(hour_bucket(11), 0);
        assert_eq!(hour_bucket(12), 1);
        assert_eq!(hour_bucket(16), 1);
        assert_eq!(hour_bucket(17), 2);
        assert_eq!(hour_bucket(21), 2);
        assert_eq!(hour_bucket(22), 3);
        assert_eq!(hour_bucket(4), 3);
        assert_eq!(hour_bucket(0), 3);
    }

    #[test]
    fn test_best_bucket_needs_minimum_games() {
        // 6 evening games (5 wins), 2 morning games (2 wins): morning has a
        // perfect rate but too few games
        let mut games = Vec::new();
        for (h, r) in [(18, "win"), (19, "win"), (20, "win"), (18, "win"), (19, "win"), (20, "resigned")] {
            games.push(game(Rapid, at("2025-01-06", h), r, 1500, "bob", 1450));
        }
        for h in [8, 9] {
            games.push(game(Rapid, at("2025-01-07", h), "win", 1500, "bob", 1450));
        }
        let section = analyze(&log(games), SUBJECT);
        assert_eq!(section.best_time_of_day, "evening");
    }

    #[test]
    fn test_day_of_week_and_average() {
        // 2025-01-06 is a Monday; 6 games Monday, 2 games Tuesday
        let mut games = Vec::new();
        for h in [6, 7, 8, 9, 10, 11] {
            games.push(game(Rapid, at("2025-01-06", h), "win", 1500, "bob", 1450));
        }
        for h in [6, 7] {
            games.push(game(Rapid, at("2025-01-07", h), "resigned", 1500, "bob", 1450));
        }
        let section = analyze(&log(games), SUBJECT);
        assert_eq!(section.best_day_of_week, "Mon");
        assert_eq!(section.day_of_week[0].games, 6);
        assert_eq!(section.day_of_week[1].games, 2);
        assert_eq!(section.day_of_week[1].win_rate, 0);
        assert_eq!(section.avg_games_per_day, 4.0);
    }

    #[test]
    fn test_longest_game_by_move_count() {
        let mut short = game(Rapid, at("2025-01-06", 8), "win", 1500, "bob", 1450);
        short.moves = "1. e4 e5 2. Nf3 1-0".to_string();
        let mut long = game(Rapid, at("2025-01-06", 9), "win", 1500, "bob", 1450);
        long.moves = (1..=40).map(|n| format!("{n}. e4 e5 ")).collect::<String>() + "1-0";
        let section = analyze(&log(vec![short, long]), SUBJECT);
        let longest = section.longest_game.unwrap();
        assert_eq!(longest.moves, 40);
        assert_eq!(longest.estimated_minutes, 20.0);
    }
}
