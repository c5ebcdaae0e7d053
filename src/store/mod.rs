//! Single-writer state container for one profile's habits.
//!
//! All mutating entry points are meant to be called from the owning
//! thread; timer threads send events back instead of touching the
//! store directly (see `crate::reminder`). Every mutation rewrites the
//! whole habit file and, when a badge was awarded, the badge file. The
//! rewrite is not atomic (no temp-file rename); a crash mid-write can
//! corrupt the file. A failed persist is reported to the caller but the
//! in-memory state remains authoritative for the session.

mod ledger;
mod record;
mod report;

pub use ledger::BadgeLedger;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};

use crate::error::StoreError;
use crate::models::{Badge, Habit, Profile};

/// Emitted when a `mark_complete` call crosses a badge threshold.
/// Presentation (congratulations, quotes) is entirely the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeEvent {
    pub habit_name: String,
    pub badge: Badge,
}

pub struct HabitStore {
    habits: Vec<Habit>,
    ledger: BadgeLedger,
    data_dir: PathBuf,
    profile: String,
}

impl HabitStore {
    /// Load the store for a profile. Missing files mean an empty
    /// collection, not an error; unparseable lines are dropped.
    pub fn open(data_dir: impl Into<PathBuf>, profile: &str) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        let mut store = Self {
            habits: Vec::new(),
            ledger: BadgeLedger::new(),
            data_dir,
            profile: profile.to_string(),
        };
        store.habits = load_habits(&store.habits_path())?;
        store.ledger = load_ledger(&store.badges_path())?;
        Ok(store)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn badge_counts(&self) -> &BadgeLedger {
        &self.ledger
    }

    pub fn profile_name(&self) -> &str {
        &self.profile
    }

    fn habits_path(&self) -> PathBuf {
        self.data_dir.join(format!("habits_{}.txt", self.profile))
    }

    fn badges_path(&self) -> PathBuf {
        self.data_dir.join(format!("badges_{}.txt", self.profile))
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join(format!("user_{}.txt", self.profile))
    }

    pub(crate) fn report_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("habit_report_{}.txt", self.profile))
    }

    // ─── CRUD ────────────────────────────────────────────────────────

    pub fn add(&mut self, habit: Habit) -> Result<(), StoreError> {
        validate(&habit)?;
        self.habits.push(habit);
        self.save_habits()
    }

    /// Remove the habit at `index`. Out-of-range indices are a no-op;
    /// the removed habit is returned so the caller can cancel its
    /// reminder.
    pub fn delete(&mut self, index: usize) -> Result<Option<Habit>, StoreError> {
        if index >= self.habits.len() {
            log::debug!("delete: index {} out of range", index);
            return Ok(None);
        }
        let removed = self.habits.remove(index);
        self.save_habits()?;
        Ok(Some(removed))
    }

    /// Replace the habit at `index`. Out-of-range indices are a no-op.
    pub fn update(&mut self, index: usize, habit: Habit) -> Result<(), StoreError> {
        validate(&habit)?;
        let Some(slot) = self.habits.get_mut(index) else {
            log::debug!("update: index {} out of range", index);
            return Ok(());
        };
        *slot = habit;
        self.save_habits()
    }

    /// Mark the habit at `index` done for `today`, then run the badge
    /// check: thresholds are tried highest-first and at most one tier is
    /// awarded per call, even when a single completion jumps over
    /// several thresholds.
    pub fn mark_complete(
        &mut self,
        index: usize,
        today: NaiveDate,
    ) -> Result<Option<BadgeEvent>, StoreError> {
        let Some(habit) = self.habits.get_mut(index) else {
            log::debug!("mark_complete: index {} out of range", index);
            return Ok(None);
        };
        habit.mark_done(today);

        let progress = habit.progress();
        let mut event = None;
        for badge in Badge::descending() {
            let threshold = badge.threshold();
            if progress >= threshold as f64 && habit.highest_badge < threshold {
                habit.highest_badge = threshold;
                self.ledger.award(badge);
                event = Some(BadgeEvent {
                    habit_name: habit.name.clone(),
                    badge,
                });
                break;
            }
        }

        self.save_habits()?;
        if event.is_some() {
            self.save_badges()?;
        }
        Ok(event)
    }

    // ─── Profile ─────────────────────────────────────────────────────

    pub fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        let path = self.profile_path();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content.lines().next().and_then(Profile::from_line)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io("read", path, e)),
        }
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let path = self.profile_path();
        fs::write(&path, profile.to_line()).map_err(|e| StoreError::io("write", path, e))
    }

    // ─── Persistence ─────────────────────────────────────────────────

    fn save_habits(&self) -> Result<(), StoreError> {
        let mut out = String::new();
        for habit in &self.habits {
            out.push_str(&record::to_line(habit));
            out.push('\n');
        }
        let path = self.habits_path();
        log::debug!("Writing {} habit(s) to {:?}", self.habits.len(), path);
        fs::write(&path, out).map_err(|e| StoreError::io("write", path, e))
    }

    fn save_badges(&self) -> Result<(), StoreError> {
        let path = self.badges_path();
        fs::write(&path, self.ledger.to_lines()).map_err(|e| StoreError::io("write", path, e))
    }
}

/// Parse a "H:mm" reminder string; empty means no reminder.
pub fn parse_reminder(s: &str) -> Result<Option<NaiveTime>, StoreError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map(Some)
        .map_err(|_| StoreError::validation(format!("invalid reminder time {:?}, expected H:mm", s)))
}

fn validate(habit: &Habit) -> Result<(), StoreError> {
    if habit.name.trim().is_empty() {
        return Err(StoreError::validation("habit name cannot be empty"));
    }
    if habit.total_days == 0 {
        return Err(StoreError::validation("total days must be positive"));
    }
    Ok(())
}

fn load_habits(path: &Path) -> Result<Vec<Habit>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io("read", path.to_path_buf(), e)),
    };
    let mut habits = Vec::new();
    for line in content.lines() {
        match record::from_line(line) {
            Some(habit) => habits.push(habit),
            None => log::warn!("Skipping unparseable habit record: {:?}", line),
        }
    }
    Ok(habits)
}

fn load_ledger(path: &Path) -> Result<BadgeLedger, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(BadgeLedger::from_lines(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BadgeLedger::new()),
        Err(e) => Err(StoreError::io("read", path.to_path_buf(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_store(dir: &TempDir) -> HabitStore {
        HabitStore::open(dir.path(), "test").unwrap()
    }

    #[test]
    fn missing_files_mean_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.habits().is_empty());
        assert_eq!(store.badge_counts().total(), 0);
    }

    #[test]
    fn read_habit_scenario_earns_starter_badge() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let reminder = parse_reminder("21:00").unwrap();
        store
            .add(Habit::new("Read", Frequency::Daily, 10, reminder))
            .unwrap();

        assert!(store.mark_complete(0, date(2024, 1, 1)).unwrap().is_none());
        assert!(store.mark_complete(0, date(2024, 1, 2)).unwrap().is_none());
        let event = store.mark_complete(0, date(2024, 1, 3)).unwrap();

        let habit = &store.habits()[0];
        assert_eq!(habit.progress(), 30.0);
        assert_eq!(habit.streak_count, 3);
        assert_eq!(habit.highest_badge, 25);
        assert_eq!(
            event,
            Some(BadgeEvent {
                habit_name: "Read".to_string(),
                badge: Badge::Starter,
            })
        );
        assert_eq!(store.badge_counts().count(Badge::Starter), 1);
    }

    #[test]
    fn single_jump_awards_only_the_top_tier() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store
            .add(Habit::new("Stretch", Frequency::Daily, 1, None))
            .unwrap();

        let event = store.mark_complete(0, date(2024, 5, 1)).unwrap();
        assert_eq!(event.unwrap().badge, Badge::Gold);
        assert_eq!(store.habits()[0].highest_badge, 100);
        assert_eq!(store.badge_counts().count(Badge::Gold), 1);
        assert_eq!(store.badge_counts().total(), 1);
    }

    #[test]
    fn badge_awarding_is_monotonic() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store
            .add(Habit::new("Run", Frequency::Daily, 4, None))
            .unwrap();

        let mut events = 0;
        for day in 1..=6 {
            if store.mark_complete(0, date(2024, 6, day)).unwrap().is_some() {
                events += 1;
            }
            // repeat of the same day: no new badge, no regression
            assert!(store.mark_complete(0, date(2024, 6, day)).unwrap().is_none());
        }
        // thresholds crossed: 25 (day 1), 50 (day 2), 75 (day 3), 100 (day 4)
        assert_eq!(events, 4);
        assert_eq!(store.habits()[0].highest_badge, 100);
    }

    #[test]
    fn store_round_trips_through_files() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = open_store(&dir);
            store
                .add(Habit::new(
                    "Read",
                    Frequency::Daily,
                    10,
                    parse_reminder("7:30").unwrap(),
                ))
                .unwrap();
            store.mark_complete(0, date(2024, 1, 1)).unwrap();
            store.mark_complete(0, date(2024, 1, 2)).unwrap();
            store.mark_complete(0, date(2024, 1, 3)).unwrap();
        }

        let reopened = open_store(&dir);
        assert_eq!(reopened.habits().len(), 1);
        let habit = &reopened.habits()[0];
        assert_eq!(habit.completed_days, 3);
        assert_eq!(habit.streak_count, 3);
        assert_eq!(habit.highest_badge, 25);
        assert_eq!(reopened.badge_counts().count(Badge::Starter), 1);
    }

    #[test]
    fn validation_rejects_before_mutation() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let err = store
            .add(Habit::new("", Frequency::Daily, 10, None))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let err = store
            .add(Habit::new("Read", Frequency::Daily, 0, None))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.habits().is_empty());

        assert!(parse_reminder("not a time").is_err());
        assert_eq!(parse_reminder("").unwrap(), None);
    }

    #[test]
    fn out_of_range_indices_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store
            .add(Habit::new("Read", Frequency::Daily, 10, None))
            .unwrap();

        assert!(store.delete(5).unwrap().is_none());
        assert!(store.mark_complete(5, date(2024, 1, 1)).unwrap().is_none());
        store
            .update(5, Habit::new("Other", Frequency::Weekly, 3, None))
            .unwrap();
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].name, "Read");
    }

    #[test]
    fn delete_returns_removed_habit() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store
            .add(Habit::new("Read", Frequency::Daily, 10, None))
            .unwrap();
        store
            .add(Habit::new("Run", Frequency::Weekly, 4, None))
            .unwrap();

        let removed = store.delete(0).unwrap().unwrap();
        assert_eq!(removed.name, "Read");
        assert_eq!(store.habits().len(), 1);

        let reopened = open_store(&dir);
        assert_eq!(reopened.habits().len(), 1);
        assert_eq!(reopened.habits()[0].name, "Run");
    }

    #[test]
    fn unparseable_lines_are_dropped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits_test.txt");
        std::fs::write(&path, "Read,Daily,10,2\n\n,orphan,record\nRun,Weekly,4,1\n").unwrap();

        let store = open_store(&dir);
        let names: Vec<&str> = store.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Read", "Run"]);
    }

    #[test]
    fn profile_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert_eq!(store.load_profile().unwrap(), None);

        let profile = Profile {
            display_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            gender: "F".to_string(),
        };
        store.save_profile(&profile).unwrap();
        assert_eq!(store.load_profile().unwrap(), Some(profile));
    }
}
