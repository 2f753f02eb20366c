// src/analyzers/ratings.rs
// Chronological rating trajectory per category: history, peak, and daily
// net change extremes

use crate::model::{GameCategory, GameLog, GameRecord};
use crate::report::{BestRatingDay, CategoryRating, DayChange, RatingPoint, RatingSection};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn analyze(log: &GameLog, subject: &str) -> RatingSection {
    let mut formats = Vec::with_capacity(GameCategory::ALL.len());
    let mut best_rating_day: Option<BestRatingDay> = None;

    for category in GameCategory::ALL {
        let games: Vec<&GameRecord> = log.of_category(category).collect();
        let rating = category_rating(category, &games, subject);
        // Strictly-greater keeps the first category in declaration order on ties
        if let Some(gain) = &rating.best_gain_day {
            if best_rating_day.as_ref().is_none_or(|b| gain.change > b.change) {
                best_rating_day = Some(BestRatingDay {
                    format: category,
                    date: gain.date,
                    change: gain.change,
                });
            }
        }
        formats.push(rating);
    }

    RatingSection {
        formats,
        best_rating_day,
        first_game: log.games().first().map(|g| g.end_date()),
        last_game: log.games().last().map(|g| g.end_date()),
        games_analyzed: log.len() as u32,
    }
}

/// Rating trajectory for one category's games, in chronological order.
/// The first game establishes the baseline (its own rating, zero implied
/// change); daily net change sums rating deltas per calendar day.
pub(crate) fn category_rating(
    category: GameCategory,
    games: &[&GameRecord],
    subject: &str,
) -> CategoryRating {
    let mut history = Vec::with_capacity(games.len());
    let mut peak: Option<RatingPoint> = None;
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut previous: Option<u32> = None;

    for game in games {
        let rating = game.sides_for(subject).0.rating;
        let date = game.end_date();
        history.push(RatingPoint { date, rating });
        if peak.as_ref().is_none_or(|p| rating > p.rating) {
            peak = Some(RatingPoint { date, rating });
        }
        let delta = match previous {
            Some(prev) => rating as i64 - prev as i64,
            None => 0,
        };
        *daily.entry(date).or_default() += delta;
        previous = Some(rating);
    }

    // First maximum in date-ascending order wins ties
    let mut best_gain: Option<DayChange> = None;
    let mut worst_loss: Option<DayChange> = None;
    for (date, change) in &daily {
        if *change > 0 && best_gain.as_ref().is_none_or(|b| *change > b.change) {
            best_gain = Some(DayChange {
                date: *date,
                change: *change,
            });
        }
        if *change < 0 && worst_loss.as_ref().is_none_or(|w| *change < -w.change) {
            worst_loss = Some(DayChange {
                date: *date,
                change: change.abs(),
            });
        }
    }

    CategoryRating {
        format: category,
        current_rating: previous,
        peak,
        history,
        best_gain_day: best_gain,
        worst_loss_day: worst_loss,
    }
}
