use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(anyhow::anyhow!("Unknown frequency: {}", s)),
        }
    }
}

/// A tracked habit with its full completion history.
///
/// `completed_dates` is the source of truth; `completed_days`,
/// `last_completed_date` and `streak_count` are derived from it and
/// kept in sync by `recompute_derived`.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub name: String,
    pub frequency: Frequency,
    pub total_days: u32,
    pub completed_days: u32,
    pub reminder_time: Option<NaiveTime>,
    pub streak_count: u32,
    /// Highest badge threshold ever reached (0, 25, 50, 75 or 100).
    /// Never decreases.
    pub highest_badge: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub completed_dates: BTreeSet<NaiveDate>,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        frequency: Frequency,
        total_days: u32,
        reminder_time: Option<NaiveTime>,
    ) -> Self {
        Self {
            name: name.into(),
            frequency,
            total_days,
            completed_days: 0,
            reminder_time,
            streak_count: 0,
            highest_badge: 0,
            last_completed_date: None,
            completed_dates: BTreeSet::new(),
        }
    }

    /// Record a completion for the given day. Idempotent: marking a day
    /// that is already recorded changes nothing.
    pub fn mark_done(&mut self, today: NaiveDate) {
        self.completed_dates.insert(today);
        self.recompute_derived();
    }

    pub fn is_done_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Re-derive `completed_days`, `last_completed_date` and
    /// `streak_count` from the completion set.
    pub fn recompute_derived(&mut self) {
        self.completed_days = self.completed_dates.len() as u32;
        self.last_completed_date = self.completed_dates.iter().next_back().copied();

        // Walk backwards one day at a time from the most recent
        // completion; O(streak length), not O(history size).
        self.streak_count = 0;
        if let Some(last) = self.last_completed_date {
            let mut cursor = last;
            while self.completed_dates.contains(&cursor) {
                self.streak_count += 1;
                match cursor.pred_opt() {
                    Some(prev) => cursor = prev,
                    None => break,
                }
            }
        }
    }

    /// Completion percentage. Can exceed 100 when more distinct days are
    /// logged than the goal asked for.
    pub fn progress(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.completed_days as f64 * 100.0 / self.total_days as f64
        }
    }
}

impl std::fmt::Display for Habit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reminder = self
            .reminder_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        write!(
            f,
            "{} ({}) - {}/{} done ({:.1}%)  [{}]",
            self.name,
            self.frequency,
            self.completed_days,
            self.total_days,
            self.progress(),
            reminder
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mark_done_keeps_completed_days_in_sync() {
        let mut h = Habit::new("Read", Frequency::Daily, 10, None);
        h.mark_done(date(2024, 1, 1));
        h.mark_done(date(2024, 1, 2));
        assert_eq!(h.completed_days, 2);
        assert_eq!(h.completed_days as usize, h.completed_dates.len());

        // idempotent: same day again changes nothing
        h.mark_done(date(2024, 1, 2));
        assert_eq!(h.completed_days, 2);
        assert_eq!(h.streak_count, 2);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut h = Habit::new("Run", Frequency::Daily, 30, None);
        h.mark_done(date(2024, 3, 10));
        h.mark_done(date(2024, 3, 11));
        h.mark_done(date(2024, 3, 12));
        assert_eq!(h.streak_count, 3);
        assert_eq!(h.last_completed_date, Some(date(2024, 3, 12)));
    }

    #[test]
    fn streak_breaks_on_missing_day() {
        let mut h = Habit::new("Run", Frequency::Daily, 30, None);
        h.mark_done(date(2024, 3, 10));
        h.mark_done(date(2024, 3, 12));
        assert_eq!(h.streak_count, 1);
    }

    #[test]
    fn backfilled_older_date_does_not_move_last_completed() {
        let mut h = Habit::new("Run", Frequency::Daily, 30, None);
        h.mark_done(date(2024, 3, 12));
        h.mark_done(date(2024, 3, 5));
        assert_eq!(h.last_completed_date, Some(date(2024, 3, 12)));
        assert_eq!(h.completed_days, 2);
    }

    #[test]
    fn progress_handles_zero_goal() {
        let h = Habit::new("Idle", Frequency::Weekly, 0, None);
        assert_eq!(h.progress(), 0.0);
    }

    #[test]
    fn progress_can_exceed_hundred() {
        let mut h = Habit::new("Tiny", Frequency::Daily, 2, None);
        h.mark_done(date(2024, 1, 1));
        h.mark_done(date(2024, 1, 2));
        h.mark_done(date(2024, 1, 3));
        assert!(h.progress() > 100.0);
    }

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!(Frequency::from_str("Daily").unwrap(), Frequency::Daily);
        assert_eq!(Frequency::from_str("weekly").unwrap(), Frequency::Weekly);
        assert!(Frequency::from_str("fortnightly").is_err());
    }
}
