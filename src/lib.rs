// src/lib.rs

pub mod analyzers;
pub mod cache;
pub mod compose;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pgn;
pub mod report;
pub mod service;
pub mod upstream;

pub use config::RecapConfig;
pub use error::{RecapError, Result};
pub use model::{GameCategory, GameLog, GameRecord};
pub use report::{Report, ReportView};
pub use service::{ProfileView, RecapService};
pub use upstream::{ArchiveFetcher, ChessComClient};
