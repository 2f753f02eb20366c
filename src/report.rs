// src/report.rs
// Report and section types produced by the analyzers and the composer

use crate::model::GameCategory;
use chrono::NaiveDate;
use serde::Serialize;

/// Sentinel name used when no opening meets the minimum-sample threshold
pub const NO_OPENINGS_SENTINEL: &str = "No openings recorded";
/// Sentinel name used when the opponent set is empty
pub const NO_OPPONENTS_SENTINEL: &str = "No opponents found";

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatShare {
    pub format: GameCategory,
    pub games: u32,
    /// Share of total games, rounded to the nearest integer percent
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: NaiveDate,
    pub games: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthActivity {
    /// Calendar month keyed "YYYY-MM"
    pub month: String,
    pub games: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteFormat {
    pub format: GameCategory,
    pub games: u32,
    pub win_rate: u32,
}

/// Longest run of consecutive play-days
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: u32,
    pub games_played: u32,
}

/// Longest gap between two play-days
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakRecord {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySection {
    pub total_games: u32,
    pub format_breakdown: Vec<FormatShare>,
    pub most_active_day: Option<DayActivity>,
    pub top_months: Vec<MonthActivity>,
    pub quietest_months: Vec<MonthActivity>,
    pub favorite_format: Option<FavoriteFormat>,
    pub longest_streak: StreakRecord,
    pub longest_break: BreakRecord,
}

// ---------------------------------------------------------------------------
// Rating progression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPoint {
    pub date: NaiveDate,
    pub rating: u32,
}

/// Net rating change over one calendar day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayChange {
    pub date: NaiveDate,
    pub change: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRating {
    pub format: GameCategory,
    /// Rating of the chronologically last game, or null when no games exist
    pub current_rating: Option<u32>,
    pub peak: Option<RatingPoint>,
    pub history: Vec<RatingPoint>,
    pub best_gain_day: Option<DayChange>,
    /// Largest daily net loss, reported as an absolute value
    pub worst_loss_day: Option<DayChange>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRatingDay {
    pub format: GameCategory,
    pub date: NaiveDate,
    pub change: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSection {
    pub formats: Vec<CategoryRating>,
    pub best_rating_day: Option<BestRatingDay>,
    pub first_game: Option<NaiveDate>,
    pub last_game: Option<NaiveDate>,
    pub games_analyzed: u32,
}

// ---------------------------------------------------------------------------
// Format-specific
// ---------------------------------------------------------------------------

/// Win/loss sub-classification from the termination descriptor
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisiveMethods {
    pub resignation: u32,
    pub timeout: u32,
    pub checkmate: u32,
    pub other: u32,
}

/// Draw sub-classification from the termination descriptor
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawMethods {
    pub agreement: u32,
    pub repetition: u32,
    pub stalemate: u32,
    pub insufficient: u32,
    pub other: u32,
}

/// Reference to a single notable game
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRef {
    pub opponent: String,
    pub opponent_rating: u32,
    pub url: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningStat {
    /// Composite "ECO - opening name" key
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: u32,
}

impl OpeningStat {
    pub fn sentinel() -> Self {
        Self {
            name: NO_OPENINGS_SENTINEL.to_string(),
            games: 0,
            wins: 0,
            win_rate: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideOpenings {
    pub as_white: Vec<OpeningStat>,
    pub as_black: Vec<OpeningStat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatDetail {
    pub format: GameCategory,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub win_rate: u32,
    pub wins_by: DecisiveMethods,
    pub losses_by: DecisiveMethods,
    pub draws_by: DrawMethods,
    /// Win against the highest-rated opponent in this category
    pub best_win: Option<GameRef>,
    /// Loss against the lowest-rated opponent in this category
    pub worst_loss: Option<GameRef>,
    /// Estimated from move count, not measured (moves x a per-move constant)
    pub avg_duration_minutes: f64,
    pub openings: SideOpenings,
    pub rating_progression: CategoryRating,
}

/// Redacted projection of [`FormatDetail`]: no rating progression, no
/// best-win/worst-loss detail, opening lists truncated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatDetailView {
    pub format: GameCategory,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub win_rate: u32,
    pub wins_by: DecisiveMethods,
    pub losses_by: DecisiveMethods,
    pub draws_by: DrawMethods,
    pub avg_duration_minutes: f64,
    pub openings: SideOpenings,
}

// ---------------------------------------------------------------------------
// Playing patterns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStat {
    pub label: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestGame {
    pub url: String,
    pub moves: u32,
    /// Heuristic estimate, not measured time
    pub estimated_minutes: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternsSection {
    pub time_of_day: Vec<BucketStat>,
    pub day_of_week: Vec<BucketStat>,
    pub best_time_of_day: String,
    pub best_day_of_week: String,
    pub avg_games_per_day: f64,
    pub longest_game: Option<LongestGame>,
}

// ---------------------------------------------------------------------------
// Openings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningRanking {
    /// Top 3 by win rate, descending
    pub best: Vec<OpeningStat>,
    /// Worst 3 by win rate, ascending
    pub worst: Vec<OpeningStat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningsSection {
    pub as_white: OpeningRanking,
    pub as_black: OpeningRanking,
}

// ---------------------------------------------------------------------------
// Opponents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentStat {
    pub username: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u32,
    pub loss_rate: u32,
    /// Most recently observed rating for this opponent
    pub last_rating: u32,
    /// Most recently observed category played against this opponent
    pub last_format: Option<GameCategory>,
}

impl OpponentStat {
    pub fn sentinel() -> Self {
        Self {
            username: NO_OPPONENTS_SENTINEL.to_string(),
            games: 0,
            wins: 0,
            losses: 0,
            win_rate: 0,
            loss_rate: 0,
            last_rating: 0,
            last_format: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentRankings {
    pub most_played: Vec<OpponentStat>,
    pub highest_win_rate: Vec<OpponentStat>,
    pub highest_loss_rate: Vec<OpponentStat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOpponents {
    pub format: GameCategory,
    pub rankings: OpponentRankings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentsSection {
    pub overall: OpponentRankings,
    /// Only categories with at least one game appear here
    pub per_format: Vec<FormatOpponents>,
}

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyFigure {
    /// Null when fewer than the minimum accuracy-bearing samples exist
    pub accuracy: Option<f64>,
    pub samples: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAccuracy {
    pub format: GameCategory,
    pub accuracy: Option<f64>,
    pub samples: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSection {
    pub overall: AccuracyFigure,
    pub formats: Vec<FormatAccuracy>,
}

// ---------------------------------------------------------------------------
// Monthly distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStat {
    /// Calendar month keyed "YYYY-MM"
    pub month: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySection {
    pub months: Vec<MonthStat>,
    pub most_active: Option<String>,
    pub least_active: Option<String>,
}

// ---------------------------------------------------------------------------
// Full report and redacted view
// ---------------------------------------------------------------------------

/// The full aggregated report: a pure function of the game log and the
/// subject identity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub username: String,
    pub summary: SummarySection,
    pub rating_progression: RatingSection,
    pub formats: Vec<FormatDetail>,
    pub patterns: PatternsSection,
    pub openings: OpeningsSection,
    pub opponents: OpponentsSection,
    pub performance: PerformanceSection,
    pub monthly: MonthlySection,
}

/// Reduced projection of [`Report`] for contexts that must not expose
/// rating data. Derived by the composer, never separately mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub username: String,
    pub summary: SummarySection,
    pub formats: Vec<FormatDetailView>,
    pub patterns: PatternsSection,
    pub openings: OpeningsSection,
    pub opponents: OpponentsSection,
    pub performance: PerformanceSection,
    pub monthly: MonthlySection,
}
