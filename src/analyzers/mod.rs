// src/analyzers/mod.rs
// Eight independent section analyzers, each a pure function over the game log

pub mod formats;
pub mod monthly;
pub mod openings;
pub mod opponents;
pub mod patterns;
pub mod performance;
pub mod ratings;
pub mod summary;

/// Integer percentage rounded to nearest; zero denominator yields 0
pub(crate) fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64 * 100.0).round() as u32
    }
}

/// Round to one decimal place (durations, averages)
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(0.0), 0.0);
    }
}
