//! Text rendering for the side-panel style output.

use aggregation::{MapPoint, Rankings, StateReport};
use flowmap_core::{RankEntry, State, StateTotal};

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Net migration always carries a sign; zero is shown as `+0`.
pub fn signed(n: i64) -> String {
    let sign = if n < 0 { '-' } else { '+' };
    format!("{}{}", sign, group_thousands(n.unsigned_abs()))
}

pub fn totals_lines(t: &StateTotal) -> Vec<String> {
    vec![
        t.state.clone(),
        format!("Inflow: {}", group_thousands(t.inflow)),
        format!("Outflow: {}", group_thousands(t.outflow)),
        format!("Net: {}", signed(t.net_migration)),
    ]
}

fn ranking_lines(title: &str, entries: &[RankEntry]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (i, e) in entries.iter().enumerate() {
        lines.push(format!("{:>3}. {} - {}", i + 1, e.state, group_thousands(e.estimate)));
    }
    lines
}

pub fn rankings_lines(r: &Rankings, top: usize) -> Vec<String> {
    let mut lines = ranking_lines(&format!("Top {top} Origins (Move from)"), &r.top_origins);
    lines.push(String::new());
    lines.extend(ranking_lines(&format!("Top {top} Destinations (Move to)"), &r.top_destinations));
    lines
}

pub fn report_lines(r: &StateReport, top: usize) -> Vec<String> {
    let mut lines = totals_lines(&r.total);
    lines.push(String::new());
    lines.extend(ranking_lines(&format!("Top {top} Origins (Move from)"), &r.top_origins));
    lines.push(String::new());
    lines.extend(ranking_lines(&format!("Top {top} Destinations (Move to)"), &r.top_destinations));
    lines
}

pub fn map_lines(points: &[MapPoint]) -> Vec<String> {
    points.iter().map(|p| format!("{} {:<22} {:>12}", p.code, p.state, signed(p.net_migration))).collect()
}

pub fn state_lines() -> Vec<String> {
    State::ALL.iter().map(|s| format!("{} {}", s.code(), s.name())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(500000), "500,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn signed_net() {
        assert_eq!(signed(200000), "+200,000");
        assert_eq!(signed(-200000), "-200,000");
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn panel_layout() {
        let report = StateReport {
            total: StateTotal { state: "Texas".into(), inflow: 500000, outflow: 300000, net_migration: 200000 },
            top_origins: vec![RankEntry { state: "California".into(), estimate: 80000 }],
            top_destinations: vec![],
        };
        let lines = report_lines(&report, 10);
        assert_eq!(lines[0], "Texas");
        assert_eq!(lines[1], "Inflow: 500,000");
        assert_eq!(lines[3], "Net: +200,000");
        assert!(lines.contains(&"  1. California - 80,000".to_string()));
        assert_eq!(lines.last().unwrap(), "  (none)");
    }

    #[test]
    fn lists_all_states() {
        let lines = state_lines();
        assert_eq!(lines.len(), 51);
        assert!(lines.contains(&"DC District of Columbia".to_string()));
    }
}
