// src/compose.rs
// Report composer: runs every analyzer over one game log and derives the
// redacted view projection

use crate::analyzers::{formats, monthly, openings, opponents, patterns, performance, ratings, summary};
use crate::model::GameLog;
use crate::report::{FormatDetailView, Report, ReportView, SideOpenings};

/// Opening list length in the redacted view, per color
const VIEW_OPENINGS_LIMIT: usize = 3;

/// Assemble the full report. Pure: the same log and subject always produce
/// the same report.
pub fn compose(subject: &str, log: &GameLog) -> Report {
    Report {
        username: subject.to_string(),
        summary: summary::analyze(log, subject),
        rating_progression: ratings::analyze(log, subject),
        formats: formats::analyze(log, subject),
        patterns: patterns::analyze(log, subject),
        openings: openings::analyze(log, subject),
        opponents: opponents::analyze(log, subject),
        performance: performance::analyze(log, subject),
        monthly: monthly::analyze(log, subject),
    }
}

/// Derive the redacted projection: the rating-progression section is
/// dropped, each format section loses its rating/best-win/worst-loss
/// detail, and per-format opening lists are truncated.
pub fn project_view(report: &Report) -> ReportView {
    let formats = report
        .formats
        .iter()
        .map(|f| FormatDetailView {
            format: f.format,
            games: f.games,
            wins: f.wins,
            draws: f.draws,
            losses: f.losses,
            win_rate: f.win_rate,
            wins_by: f.wins_by.clone(),
            losses_by: f.losses_by.clone(),
            draws_by: f.draws_by.clone(),
            avg_duration_minutes: f.avg_duration_minutes,
            openings: truncate_openings(&f.openings),
        })
        .collect();

    ReportView {
        username: report.username.clone(),
        summary: report.summary.clone(),
        formats,
        patterns: report.patterns.clone(),
        openings: report.openings.clone(),
        opponents: report.opponents.clone(),
        performance: report.performance.clone(),
        monthly: report.monthly.clone(),
    }
}

fn truncate_openings(openings: &SideOpenings) -> SideOpenings {
    let mut truncated = openings.clone();
    truncated.as_white.truncate(VIEW_OPENINGS_LIMIT);
    truncated.as_black.truncate(VIEW_OPENINGS_LIMIT);
    truncated
}
