// src/analyzers/performance.rs
// Average engine accuracy, overall and per category. Null means "not
// enough analyzed games", never zero accuracy.

use super::round1;
use crate::model::{GameCategory, GameLog, GameRecord};
use crate::report::{AccuracyFigure, FormatAccuracy, PerformanceSection};

/// Minimum accuracy-bearing games before an average is reported
const MIN_SAMPLES: u32 = 3;

pub fn analyze(log: &GameLog, subject: &str) -> PerformanceSection {
    let overall = figure(log.games().iter(), subject);
    let formats = GameCategory::ALL
        .into_iter()
        .map(|category| {
            let f = figure(log.of_category(category), subject);
            FormatAccuracy {
                format: category,
                accuracy: f.accuracy,
                samples: f.samples,
            }
        })
        .collect();

    PerformanceSection { overall, formats }
}

fn figure<'a>(games: impl Iterator<Item = &'a GameRecord>, subject: &str) -> AccuracyFigure {
    let mut sum = 0.0f64;
    let mut samples = 0u32;
    for game in games {
        if let Some(accuracy) = game.sides_for(subject).0.accuracy {
            sum += accuracy;
            samples += 1;
        }
    }
    AccuracyFigure {
        accuracy: if samples >= MIN_SAMPLES {
            Some(round1(sum / samples as f64))
        } else {
            None
        },
        samples,
    }
}
