// src/analyzers/summary.rs
// Play-volume summary: counts, busiest day/months, favorite format, and
// streak/break detection over the sparse set of play-days

use super::percent;
use crate::model::{GameCategory, GameLog, Outcome};
use crate::report::{
    BreakRecord, DayActivity, FavoriteFormat, FormatShare, MonthActivity, StreakRecord,
    SummarySection,
};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

pub fn analyze(log: &GameLog, subject: &str) -> SummarySection {
    let total = log.len() as u32;

    let mut format_breakdown = Vec::with_capacity(GameCategory::ALL.len());
    let mut favorite_format: Option<FavoriteFormat> = None;
    for category in GameCategory::ALL {
        let mut games = 0u32;
        let mut wins = 0u32;
        for g in log.of_category(category) {
            games += 1;
            if g.outcome_for(subject) == Outcome::Win {
                wins += 1;
            }
        }
        format_breakdown.push(FormatShare {
            format: category,
            games,
            percent: percent(games, total),
        });
        // Strictly-greater keeps the first category in declaration order on ties
        if games > 0 && favorite_format.as_ref().is_none_or(|f| games > f.games) {
            favorite_format = Some(FavoriteFormat {
                format: category,
                games,
                win_rate: percent(wins, games),
            });
        }
    }

    let mut day_counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    let mut month_counts: BTreeMap<String, u32> = BTreeMap::new();
    for g in log.games() {
        let date = g.end_date();
        *day_counts.entry(date).or_default() += 1;
        *month_counts.entry(date.format("%Y-%m").to_string()).or_default() += 1;
    }

    // First maximum in date-ascending order wins ties
    let mut most_active_day: Option<DayActivity> = None;
    for (date, games) in &day_counts {
        if most_active_day.as_ref().is_none_or(|d| *games > d.games) {
            most_active_day = Some(DayActivity {
                date: *date,
                games: *games,
            });
        }
    }

    let months: Vec<MonthActivity> = month_counts
        .iter()
        .map(|(month, games)| MonthActivity {
            month: month.clone(),
            games: *games,
        })
        .collect();
    // Stable sort preserves ascending month order among equal counts
    let mut top_months = months.clone();
    top_months.sort_by(|a, b| b.games.cmp(&a.games));
    top_months.truncate(3);
    let mut quietest_months = months;
    quietest_months.sort_by(|a, b| a.games.cmp(&b.games));
    quietest_months.truncate(3);

    let (longest_streak, longest_break) = detect_streaks(&day_counts);

    SummarySection {
        total_games: total,
        format_breakdown,
        most_active_day,
        top_months,
        quietest_months,
        favorite_format,
        longest_streak,
        longest_break,
    }
}

/// Walk consecutive distinct play-days: a delta of exactly one day extends
/// the current streak, a larger delta ends it and records the gap.
fn detect_streaks(day_counts: &BTreeMap<NaiveDate, u32>) -> (StreakRecord, BreakRecord) {
    let days: Vec<(NaiveDate, u32)> = day_counts.iter().map(|(d, c)| (*d, *c)).collect();
    let Some(&(first_day, first_games)) = days.first() else {
        return (StreakRecord::default(), BreakRecord::default());
    };

    let mut streak_start = first_day;
    let mut streak_days = 1u32;
    let mut streak_games = first_games;
    let mut longest_streak = StreakRecord {
        start: Some(first_day),
        end: Some(first_day),
        days: 1,
        games_played: first_games,
    };
    let mut longest_break = BreakRecord::default();

    for pair in days.windows(2) {
        let (prev, _) = pair[0];
        let (day, games) = pair[1];
        let delta = (day - prev).num_days();
        if delta == 1 {
            streak_days += 1;
            streak_games += games;
            if streak_days > longest_streak.days {
                longest_streak = StreakRecord {
                    start: Some(streak_start),
                    end: Some(day),
                    days: streak_days,
                    games_played: streak_games,
                };
            }
        } else {
            let gap = (delta - 1) as u32;
            if gap > longest_break.days {
                longest_break = BreakRecord {
                    start: prev.checked_add_days(Days::new(1)),
                    end: day.checked_sub_days(Days::new(1)),
                    days: gap,
                };
            }
            streak_start = day;
            streak_days = 1;
            streak_games = games;
        }
    }

    (longest_streak, longest_break)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{at, game, log, SUBJECT};
    use crate::model::GameCategory::{Blitz, Rapid};

    #[test]
    fn test_empty_log_is_all_zero() {
        let section = analyze(&log(vec![]), SUBJECT);
        assert_eq!(section.total_games, 0);
        assert!(section.most_active_day.is_none());
        assert!(section.favorite_format.is_none());
        assert_eq!(section.longest_streak.days, 0);
        assert_eq!(section.longest_break.days, 0);
        assert!(section.top_months.is_empty());
        for share in &section.format_breakdown {
            assert_eq!(share.games, 0);
            assert_eq!(share.percent, 0);
        }
    }

    #[test]
    fn test_breakdown_and_favorite() {
        let section = analyze(
            &log(vec![
                game(Rapid, at("2025-01-01", 10), "win", 1500, "bob", 1450),
                game(Rapid, at("2025-01-02", 10), "resigned", 1490, "bob", 1460),
                game(Blitz, at("2025-01-03", 10), "win", 900, "carol", 880),
            ]),
            SUBJECT,
        );
        assert_eq!(section.total_games, 3);
        assert_eq!(section.format_breakdown[0].games, 2);
        assert_eq!(section.format_breakdown[0].percent, 67);
        assert_eq!(section.format_breakdown[1].percent, 33);

        let favorite = section.favorite_format.unwrap();
        assert_eq!(favorite.format, Rapid);
        assert_eq!(favorite.games, 2);
        assert_eq!(favorite.win_rate, 50);
    }

    #[test]
    fn test_favorite_tie_prefers_declaration_order() {
        let section = analyze(
            &log(vec![
                game(Blitz, at("2025-03-01", 9), "win", 900, "bob", 880),
                game(Rapid, at("2025-03-02", 9), "win", 1500, "bob", 1450),
            ]),
            SUBJECT,
        );
        assert_eq!(section.favorite_format.unwrap().format, Rapid);
    }

    #[test]
    fn test_most_active_day_first_max_wins() {
        let section = analyze(
            &log(vec![
                game(Rapid, at("2025-02-01", 8), "win", 1500, "bob", 1450),
                game(Rapid, at("2025-02-01", 9), "win", 1510, "bob", 1450),
                game(Rapid, at("2025-02-05", 8), "win", 1520, "bob", 1450),
                game(Rapid, at("2025-02-05", 9), "win", 1530, "bob", 1450),
            ]),
            SUBJECT,
        );
        let day = section.most_active_day.unwrap();
        assert_eq!(day.date.to_string(), "2025-02-01");
        assert_eq!(day.games, 2);
    }

    #[test]
    fn test_streak_and_break_detection() {
        // Play days: Jan 1,2,3 then a 9-day gap, then Jan 13,14
        let section = analyze(
            &log(vec![
                game(Rapid, at("2025-01-01", 8), "win", 1500, "bob", 1450),
                game(Rapid, at("2025-01-02", 8), "win", 1510, "bob", 1450),
                game(Rapid, at("2025-01-02", 9), "win", 1520, "bob", 1450),
                game(Rapid, at("2025-01-03", 8), "win", 1530, "bob", 1450),
                game(Rapid, at("2025-01-13", 8), "win", 1540, "bob", 1450),
                game(Rapid, at("2025-01-14", 8), "win", 1550, "bob", 1450),
            ]),
            SUBJECT,
        );
        let streak = section.longest_streak;
        assert_eq!(streak.days, 3);
        assert_eq!(streak.games_played, 4);
        assert_eq!(streak.start.unwrap().to_string(), "2025-01-01");
        assert_eq!(streak.end.unwrap().to_string(), "2025-01-03");

        let gap = section.longest_break;
        assert_eq!(gap.days, 9);
        assert_eq!(gap.start.unwrap().to_string(), "2025-01-04");
        assert_eq!(gap.end.unwrap().to_string(), "2025-01-12");
    }

    #[test]
    fn test_single_day_is_a_one_day_streak() {
        let section = analyze(
            &log(vec![game(Rapid, at("2025-06-01", 12), "win", 1500, "bob", 1450)]),
            SUBJECT,
        );
        assert_eq!(section.longest_streak.days, 1);
        assert_eq!(section.longest_streak.games_played, 1);
        assert_eq!(section.longest_break.days, 0);
    }

    #[test]
    fn test_month_rankings() {
        let mut games = Vec::new();
        // 3 games in Jan, 1 in Feb, 2 in Mar
        for h in [8, 9, 10] {
            games.push(game(Rapid, at("2025-01-10", h), "win", 1500, "bob", 1450));
        }
        games.push(game(Rapid, at("2025-02-10", 8), "win", 1500, "bob", 1450));
        for h in [8, 9] {
            games.push(game(Rapid, at("2025-03-10", h), "win", 1500, "bob", 1450));
        }
        let section = analyze(&log(games), SUBJECT);
        let top: Vec<&str> = section.top_months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(top, vec!["2025-01", "2025-03", "2025-02"]);
        let quiet: Vec<&str> = section
            .quietest_months
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(quiet, vec!["2025-02", "2025-03", "2025-01"]);
    }
}
