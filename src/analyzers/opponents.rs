// src/analyzers/opponents.rs
// Opponent history: per-opponent tallies and top-3 rankings, overall and
// per category

use super::percent;
use crate::model::{GameCategory, GameLog, GameRecord, Outcome};
use crate::report::{FormatOpponents, OpponentRankings, OpponentStat, OpponentsSection};
use std::collections::HashMap;

#[derive(Default)]
struct OpponentTally {
    games: u32,
    wins: u32,
    losses: u32,
    last_rating: u32,
    last_format: Option<GameCategory>,
}

pub fn analyze(log: &GameLog, subject: &str) -> OpponentsSection {
    let overall = rank(aggregate(log.games().iter(), subject));
    let per_format = GameCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let mut games = log.of_category(category).peekable();
            games.peek()?;
            Some(FormatOpponents {
                format: category,
                rankings: rank(aggregate(games, subject)),
            })
        })
        .collect();

    OpponentsSection { overall, per_format }
}

/// Walk games chronologically so "last observed" fields end up holding the
/// most recent rating and category for each opponent
fn aggregate<'a>(
    games: impl Iterator<Item = &'a GameRecord>,
    subject: &str,
) -> HashMap<String, OpponentTally> {
    let mut tallies: HashMap<String, OpponentTally> = HashMap::new();
    for game in games {
        let opponent = game.sides_for(subject).1;
        let tally = tallies.entry(opponent.username.clone()).or_default();
        tally.games += 1;
        match game.outcome_for(subject) {
            Outcome::Win => tally.wins += 1,
            Outcome::Loss => tally.losses += 1,
            Outcome::Draw => {} // draws count in neither column
        }
        tally.last_rating = opponent.rating;
        tally.last_format = Some(game.category);
    }
    tallies
}

fn rank(tallies: HashMap<String, OpponentTally>) -> OpponentRankings {
    let mut stats: Vec<OpponentStat> = tallies
        .into_iter()
        .map(|(username, t)| OpponentStat {
            username,
            games: t.games,
            wins: t.wins,
            losses: t.losses,
            win_rate: percent(t.wins, t.games),
            loss_rate: percent(t.losses, t.games),
            last_rating: t.last_rating,
            last_format: t.last_format,
        })
        .collect();

    if stats.is_empty() {
        return OpponentRankings {
            most_played: vec![OpponentStat::sentinel()],
            highest_win_rate: vec![OpponentStat::sentinel()],
            highest_loss_rate: vec![OpponentStat::sentinel()],
        };
    }

    // Username ascending as the base order makes every ranking deterministic
    stats.sort_by(|a, b| a.username.cmp(&b.username));

    let top3 = |key: fn(&OpponentStat) -> u32| {
        let mut ranked = stats.clone();
        ranked.sort_by(|a, b| key(b).cmp(&key(a)));
        ranked.truncate(3);
        ranked
    };

    OpponentRankings {
        most_played: top3(|s| s.games),
        highest_win_rate: top3(|s| s.win_rate),
        highest_loss_rate: top3(|s| s.loss_rate),
    }
}
