// src/analyzers/formats.rs
// Per-category deep dive for categories the subject actually plays:
// outcome classification, termination methods, notable games, duration

use super::{openings, percent, ratings, round1};
use crate::model::{GameCategory, GameLog, GameRecord, Outcome};
use crate::pgn;
use crate::report::{DecisiveMethods, DrawMethods, FormatDetail, GameRef};

/// A category qualifies with at least this many games...
const MIN_GAMES: u32 = 15;
/// ...or with more than this share of the subject's total games (percent)
const MIN_SHARE_PERCENT: u32 = 10;

pub fn analyze(log: &GameLog, subject: &str) -> Vec<FormatDetail> {
    let total = log.len() as u32;
    GameCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let games: Vec<&GameRecord> = log.of_category(category).collect();
            let count = games.len() as u32;
            if !eligible(count, total) {
                return None;
            }
            Some(analyze_category(category, &games, subject))
        })
        .collect()
}

/// Eligibility: >= 15 games, or a strictly greater than 10% share of total
fn eligible(count: u32, total: u32) -> bool {
    count >= MIN_GAMES || (total > 0 && count * 100 > total * MIN_SHARE_PERCENT)
}

fn analyze_category(category: GameCategory, games: &[&GameRecord], subject: &str) -> FormatDetail {
    let mut wins = 0u32;
    let mut draws = 0u32;
    let mut losses = 0u32;
    let mut wins_by = DecisiveMethods::default();
    let mut losses_by = DecisiveMethods::default();
    let mut draws_by = DrawMethods::default();
    let mut best_win: Option<GameRef> = None;
    let mut worst_loss: Option<GameRef> = None;
    let mut total_minutes = 0.0f64;

    for game in games {
        total_minutes += pgn::estimated_minutes(&game.moves);
        let opponent = game.sides_for(subject).1;
        match game.outcome_for(subject) {
            Outcome::Win => {
                wins += 1;
                classify_decisive(&game.termination, &mut wins_by);
                // First encountered wins ties on opponent rating
                if best_win.as_ref().is_none_or(|b| opponent.rating > b.opponent_rating) {
                    best_win = Some(game_ref(game, opponent.rating, &opponent.username));
                }
            }
            Outcome::Loss => {
                losses += 1;
                classify_decisive(&game.termination, &mut losses_by);
                if worst_loss.as_ref().is_none_or(|w| opponent.rating < w.opponent_rating) {
                    worst_loss = Some(game_ref(game, opponent.rating, &opponent.username));
                }
            }
            Outcome::Draw => {
                draws += 1;
                classify_draw(&game.termination, &mut draws_by);
            }
        }
    }

    let count = games.len() as u32;
    FormatDetail {
        format: category,
        games: count,
        wins,
        draws,
        losses,
        win_rate: percent(wins, count),
        wins_by,
        losses_by,
        draws_by,
        best_win,
        worst_loss,
        avg_duration_minutes: if count == 0 {
            0.0
        } else {
            round1(total_minutes / count as f64)
        },
        openings: openings::side_openings(games.iter().copied(), subject),
        rating_progression: ratings::category_rating(category, games, subject),
    }
}

fn game_ref(game: &GameRecord, opponent_rating: u32, opponent: &str) -> GameRef {
    GameRef {
        opponent: opponent.to_string(),
        opponent_rating,
        url: game.url.clone(),
        date: game.end_date(),
    }
}

/// Sub-classify a decisive result by scanning the termination descriptor
fn classify_decisive(termination: &str, methods: &mut DecisiveMethods) {
    let text = termination.to_lowercase();
    if text.contains("resignation") {
        methods.resignation += 1;
    } else if text.contains("time") {
        methods.timeout += 1;
    } else if text.contains("checkmate") {
        methods.checkmate += 1;
    } else {
        methods.other += 1;
    }
}

/// Sub-classify a draw by scanning the termination descriptor
fn classify_draw(termination: &str, methods: &mut DrawMethods) {
    let text = termination.to_lowercase();
    if text.contains("agreement") {
        methods.agreement += 1;
    } else if text.contains("repetition") {
        methods.repetition += 1;
    } else if text.contains("stalemate") {
        methods.stalemate += 1;
    } else if text.contains("insufficient") {
        methods.insufficient += 1;
    } else {
        methods.other += 1;
    }
}
