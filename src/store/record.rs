//! Line codec for the habit record file.
//!
//! One comma-delimited record per habit, field order fixed:
//!
//! ```text
//! name,frequency,totalDays,completedDays,reminderTime,streakCount,highestBadge,lastCompletedDate,completedDates
//! ```
//!
//! `completedDates` is a semicolon-separated list of ISO dates
//! (yyyy-MM-dd). Older files with fewer trailing fields still load.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Frequency, Habit};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M";

pub fn to_line(habit: &Habit) -> String {
    let dates = habit
        .completed_dates
        .iter()
        .map(|d| d.format(DATE_FMT).to_string())
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "{},{},{},{},{},{},{},{},{}",
        habit.name,
        habit.frequency,
        habit.total_days,
        habit.completed_days,
        habit
            .reminder_time
            .map(|t| t.format(TIME_FMT).to_string())
            .unwrap_or_default(),
        habit.streak_count,
        habit.highest_badge,
        habit
            .last_completed_date
            .map(|d| d.format(DATE_FMT).to_string())
            .unwrap_or_default(),
        dates
    )
}

/// Parse one record, defaulting any field that is missing or fails to
/// parse instead of rejecting the line. Returns `None` only when the
/// line cannot yield a minimally valid habit (no name at all).
pub fn from_line(line: &str) -> Option<Habit> {
    let p: Vec<&str> = line.split(',').collect();

    let name = p.first().copied().unwrap_or_default().to_string();
    if name.trim().is_empty() {
        return None;
    }

    let frequency = field(&p, 1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Frequency::Daily);
    let total_days = num_field(&p, 2);
    let reminder_time =
        field(&p, 4).and_then(|s| NaiveTime::parse_from_str(s, TIME_FMT).ok());

    let mut habit = Habit::new(name, frequency, total_days, reminder_time);
    habit.completed_days = num_field(&p, 3);
    habit.streak_count = num_field(&p, 5);
    habit.highest_badge = num_field(&p, 6);
    habit.last_completed_date = date_field(&p, 7);

    // The completed-dates list, when present, is authoritative: the
    // derived fields are recomputed from it even if the explicit fields
    // above disagreed. This heals inconsistent legacy records.
    if let Some(dates) = field(&p, 8) {
        habit.completed_dates = dates
            .split(';')
            .filter_map(|t| NaiveDate::parse_from_str(t, DATE_FMT).ok())
            .collect();
        habit.recompute_derived();
    }

    Some(habit)
}

fn field<'a>(p: &[&'a str], idx: usize) -> Option<&'a str> {
    p.get(idx).copied().filter(|s| !s.is_empty())
}

fn num_field(p: &[&str], idx: usize) -> u32 {
    field(p, idx).and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn date_field(p: &[&str], idx: usize) -> Option<NaiveDate> {
    field(p, idx).and_then(|s| NaiveDate::parse_from_str(s, DATE_FMT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_record_round_trips() {
        let mut h = Habit::new(
            "Read",
            Frequency::Daily,
            10,
            NaiveTime::from_hms_opt(21, 0, 0),
        );
        h.mark_done(date(2024, 1, 1));
        h.mark_done(date(2024, 1, 2));
        h.mark_done(date(2024, 1, 5));
        h.highest_badge = 25;

        let parsed = from_line(&to_line(&h)).unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn serialized_field_order_is_fixed() {
        let mut h = Habit::new("Walk", Frequency::Weekly, 5, None);
        h.mark_done(date(2024, 2, 1));
        assert_eq!(to_line(&h), "Walk,Weekly,5,1,,1,0,2024-02-01,2024-02-01");
    }

    #[test]
    fn legacy_four_field_record_loads() {
        let h = from_line("Read,Daily,30,12").unwrap();
        assert_eq!(h.name, "Read");
        assert_eq!(h.frequency, Frequency::Daily);
        assert_eq!(h.total_days, 30);
        assert_eq!(h.completed_days, 12);
        assert_eq!(h.streak_count, 0);
        assert_eq!(h.highest_badge, 0);
        assert_eq!(h.last_completed_date, None);
        assert!(h.completed_dates.is_empty());
    }

    #[test]
    fn completed_dates_list_overrides_stale_fields() {
        // completedDays says 7, streak says 9, but the list has 2 dates
        let h = from_line("Read,Daily,30,7,,9,0,2023-01-01,2024-01-01;2024-01-02").unwrap();
        assert_eq!(h.completed_days, 2);
        assert_eq!(h.streak_count, 2);
        assert_eq!(h.last_completed_date, Some(date(2024, 1, 2)));
    }

    #[test]
    fn malformed_fields_default_instead_of_failing() {
        let h = from_line("Read,sometimes,abc,xyz,25:99").unwrap();
        assert_eq!(h.frequency, Frequency::Daily);
        assert_eq!(h.total_days, 0);
        assert_eq!(h.completed_days, 0);
        assert_eq!(h.reminder_time, None);
    }

    #[test]
    fn bad_date_tokens_in_list_are_skipped() {
        let h = from_line("Read,Daily,30,0,,0,0,,2024-01-01;garbage;2024-01-03").unwrap();
        assert_eq!(h.completed_days, 2);
        assert_eq!(h.last_completed_date, Some(date(2024, 1, 3)));
    }

    #[test]
    fn nameless_line_is_rejected() {
        assert!(from_line("").is_none());
        assert!(from_line("   ").is_none());
        assert!(from_line(",Daily,10").is_none());
    }
}
