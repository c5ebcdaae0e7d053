use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::error::StoreError;
use crate::store::HabitStore;

impl HabitStore {
    /// Write a fixed-width progress summary to the profile's report
    /// file and return its path. Write-only artifact; never read back.
    pub fn export_report(&self) -> Result<PathBuf, StoreError> {
        let mut out = String::new();
        out.push_str(&format!("HabitPal Report for {}\n", self.profile_name()));
        out.push_str(&format!(
            "Generated on: {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!(
            "{:<20} {:<8} {:<10} {:<8} {:<10} {:<10}\n",
            "Name", "Freq", "Done", "Streak", "Progress", "Reminder"
        ));
        out.push_str(&"-".repeat(71));
        out.push('\n');

        let mut total_progress = 0.0;
        for habit in self.habits() {
            total_progress += habit.progress();
            let reminder = habit
                .reminder_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "{:<20} {:<8} {:>2}/{:<7} {:<8} {:<9.1} {:<10}\n",
                habit.name,
                habit.frequency,
                habit.completed_days,
                habit.total_days,
                habit.streak_count,
                habit.progress(),
                reminder
            ));
        }

        if !self.habits().is_empty() {
            let avg = total_progress / self.habits().len() as f64;
            out.push_str(&format!("\nAverage Progress: {:.1}%\n", avg));
        }
        out.push_str("\nBadges Earned:\n");
        for (badge, count) in self.badge_counts().iter() {
            out.push_str(&format!(" - {}: {}\n", badge, count));
        }

        let path = self.report_path();
        fs::write(&path, out).map_err(|e| StoreError::io("write", path.clone(), e))?;
        Ok(path)
    }
}
