use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Milestone badge tiers, awarded once per habit when its progress
/// first crosses the matching threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Starter,
    Bronze,
    Silver,
    Gold,
}

impl Badge {
    pub fn all() -> [Badge; 4] {
        [Badge::Starter, Badge::Bronze, Badge::Silver, Badge::Gold]
    }

    /// Tiers in the order the award check runs: highest first, so a
    /// single jump over several thresholds earns only the top one.
    pub fn descending() -> [Badge; 4] {
        [Badge::Gold, Badge::Silver, Badge::Bronze, Badge::Starter]
    }

    /// Progress percentage that unlocks this tier.
    pub fn threshold(&self) -> u32 {
        match self {
            Badge::Starter => 25,
            Badge::Bronze => 50,
            Badge::Silver => 75,
            Badge::Gold => 100,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Badge::Starter => "Starter",
            Badge::Bronze => "Bronze",
            Badge::Silver => "Silver",
            Badge::Gold => "Gold",
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Badge {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(Badge::Starter),
            "bronze" => Ok(Badge::Bronze),
            "silver" => Ok(Badge::Silver),
            "gold" => Ok(Badge::Gold),
            _ => Err(anyhow::anyhow!("Unknown badge: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_order_is_highest_first() {
        let thresholds: Vec<u32> = Badge::descending().iter().map(|b| b.threshold()).collect();
        assert_eq!(thresholds, vec![100, 75, 50, 25]);
    }

    #[test]
    fn badge_names_round_trip() {
        for badge in Badge::all() {
            assert_eq!(Badge::from_str(badge.display_name()).unwrap(), badge);
        }
    }
}
