// src/analyzers/monthly.rs
// Monthly distribution of play volume and results

use super::percent;
use crate::model::{GameLog, Outcome};
use crate::report::{MonthStat, MonthlySection};
use std::collections::BTreeMap;

pub fn analyze(log: &GameLog, subject: &str) -> MonthlySection {
    let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for game in log.games() {
        let key = game.end_date().format("%Y-%m").to_string();
        let entry = counts.entry(key).or_insert((0, 0));
        entry.0 += 1;
        if game.outcome_for(subject) == Outcome::Win {
            entry.1 += 1;
        }
    }

    let months: Vec<MonthStat> = counts
        .iter()
        .map(|(month, (games, wins))| MonthStat {
            month: month.clone(),
            games: *games,
            wins: *wins,
            win_rate: percent(*wins, *games),
        })
        .collect();

    // Earliest month wins ties, walking in ascending calendar order
    let mut most_active: Option<&MonthStat> = None;
    let mut least_active: Option<&MonthStat> = None;
    for m in &months {
        if most_active.is_none_or(|cur| m.games > cur.games) {
            most_active = Some(m);
        }
        if least_active.is_none_or(|cur| m.games < cur.games) {
            least_active = Some(m);
        }
    }

    MonthlySection {
        most_active: most_active.map(|m| m.month.clone()),
        least_active: least_active.map(|m| m.month.clone()),
        months,
    }
}
