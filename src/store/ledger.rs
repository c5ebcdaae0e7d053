use std::collections::BTreeMap;

use crate::models::Badge;

/// Cumulative count of badge awards across all habits of a profile,
/// persisted as one `badgeName,count` line per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeLedger {
    counts: BTreeMap<Badge, u32>,
}

impl BadgeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one award of the given tier.
    pub fn award(&mut self, badge: Badge) {
        *self.counts.entry(badge).or_insert(0) += 1;
    }

    pub fn count(&self, badge: Badge) -> u32 {
        self.counts.get(&badge).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Badge, u32)> + '_ {
        self.counts.iter().map(|(b, c)| (*b, *c))
    }

    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (badge, count) in &self.counts {
            out.push_str(&format!("{},{}\n", badge, count));
        }
        out
    }

    /// Tolerant parse: lines that do not look like `badgeName,count`
    /// are skipped.
    pub fn from_lines(content: &str) -> Self {
        let mut ledger = Self::new();
        for line in content.lines() {
            let mut parts = line.splitn(2, ',');
            let badge = parts.next().and_then(|s| s.parse::<Badge>().ok());
            let count = parts.next().and_then(|s| s.trim().parse::<u32>().ok());
            if let (Some(badge), Some(count)) = (badge, count) {
                ledger.counts.insert(badge, count);
            } else {
                log::warn!("Skipping unparseable badge line: {:?}", line);
            }
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awards_accumulate_per_tier() {
        let mut ledger = BadgeLedger::new();
        ledger.award(Badge::Starter);
        ledger.award(Badge::Starter);
        ledger.award(Badge::Gold);
        assert_eq!(ledger.count(Badge::Starter), 2);
        assert_eq!(ledger.count(Badge::Gold), 1);
        assert_eq!(ledger.count(Badge::Bronze), 0);
        assert_eq!(ledger.total(), 3);
    }

    #[test]
    fn lines_round_trip() {
        let mut ledger = BadgeLedger::new();
        ledger.award(Badge::Bronze);
        ledger.award(Badge::Silver);
        ledger.award(Badge::Silver);
        assert_eq!(BadgeLedger::from_lines(&ledger.to_lines()), ledger);
    }

    #[test]
    fn unknown_badge_lines_are_skipped() {
        let ledger = BadgeLedger::from_lines("Starter,3\nPlatinum,9\nGold,notanumber\n");
        assert_eq!(ledger.count(Badge::Starter), 3);
        assert_eq!(ledger.total(), 3);
    }
}
