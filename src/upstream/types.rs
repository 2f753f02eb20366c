// src/upstream/types.rs
// Raw JSON shapes returned by the upstream API. Everything is optional;
// the normalizer decides what is usable.

use serde::Deserialize;

/// One archive batch: a month of raw games
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArchive {
    #[serde(default)]
    pub games: Vec<RawGame>,
}

/// One raw game as the upstream reports it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGame {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pgn: Option<String>,
    #[serde(default)]
    pub time_class: Option<String>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub white: Option<RawSide>,
    #[serde(default)]
    pub black: Option<RawSide>,
    #[serde(default)]
    pub accuracies: Option<RawAccuracies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSide {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAccuracies {
    #[serde(default)]
    pub white: Option<f64>,
    #[serde(default)]
    pub black: Option<f64>,
}

/// Merged profile contract: the client combines the upstream profile and
/// stats endpoints into one batch of raw fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Country reference (a URL), resolved separately via `fetch_country`
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rapid_rating: Option<u32>,
    #[serde(default)]
    pub blitz_rating: Option<u32>,
    #[serde(default)]
    pub bullet_rating: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<String>,
}

// Wire-only shapes below: these mirror the upstream endpoints exactly and
// are folded into the contract types by the client.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiArchiveList {
    #[serde(default)]
    pub archives: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStats {
    #[serde(default)]
    pub chess_rapid: Option<ApiStatBlock>,
    #[serde(default)]
    pub chess_blitz: Option<ApiStatBlock>,
    #[serde(default)]
    pub chess_bullet: Option<ApiStatBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStatBlock {
    #[serde(default)]
    pub last: Option<ApiRating>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiRating {
    #[serde(default)]
    pub rating: Option<u32>,
}

impl ApiStats {
    pub(crate) fn rating_of(block: &Option<ApiStatBlock>) -> Option<u32> {
        block.as_ref().and_then(|b| b.last.as_ref()).and_then(|l| l.rating)
    }
}
