use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::Local;

use crate::cli::args::ProfileCommands;
use crate::config::AppConfig;
use crate::models::{Frequency, Habit, Profile};
use crate::quotes;
use crate::reminder::{ReminderAction, ReminderScheduler};
use crate::store::{self, BadgeEvent, HabitStore};
use crate::utils::format::{format_duration_secs, format_time, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Add / edit / delete ─────────────────────────────────────────────────────

pub fn handle_add(
    store: &mut HabitStore,
    name: &str,
    total: u32,
    freq: &str,
    remind: Option<&str>,
) -> Result<()> {
    let frequency: Frequency = freq.parse()?;
    let reminder = store::parse_reminder(remind.unwrap_or(""))?;
    store.add(Habit::new(name, frequency, total, reminder))?;
    println_colored!(GREEN, "  ✓ Added habit: {}", name);
    Ok(())
}

pub fn handle_delete(store: &mut HabitStore, index: usize) -> Result<()> {
    let idx = resolve_index(store, index)?;
    if let Some(removed) = store.delete(idx)? {
        println_colored!(RED, "  ✗ Deleted habit: {}", removed.name);
    }
    Ok(())
}

pub fn handle_edit(
    store: &mut HabitStore,
    index: usize,
    name: Option<&str>,
    total: Option<u32>,
    freq: Option<&str>,
    remind: Option<&str>,
) -> Result<()> {
    let idx = resolve_index(store, index)?;
    let mut habit = store.habits()[idx].clone();

    if let Some(name) = name {
        habit.name = name.to_string();
    }
    if let Some(total) = total {
        habit.total_days = total;
    }
    if let Some(freq) = freq {
        habit.frequency = freq.parse()?;
    }
    if let Some(remind) = remind {
        habit.reminder_time = store::parse_reminder(remind)?;
    }

    let name = habit.name.clone();
    store.update(idx, habit)?;
    println_colored!(GREEN, "  ✓ Updated habit: {}", name);
    Ok(())
}

// ─── List / mark done ────────────────────────────────────────────────────────

pub fn handle_list(store: &HabitStore) -> Result<()> {
    println!();
    if store.habits().is_empty() {
        println_colored!(DIM, "  No habits yet. Add one with `habitpal add`.");
        println!();
        return Ok(());
    }
    println_colored!(GOLD, "  Habits ({})", store.profile_name());
    println!();
    let today = Local::now().date_naive();
    for (i, habit) in store.habits().iter().enumerate() {
        let bar = progress_bar(habit.completed_days, habit.total_days, 20);
        let mark = if habit.is_done_on(today) { "✓" } else { " " };
        println!("  {:>2}. {} {}  {}", i + 1, mark, bar, habit);
    }
    println!();
    Ok(())
}

pub fn handle_done(store: &mut HabitStore, index: usize) -> Result<()> {
    let idx = resolve_index(store, index)?;
    let today = Local::now().date_naive();
    let event = store.mark_complete(idx, today)?;

    let habit = &store.habits()[idx];
    println_colored!(
        GREEN,
        "  ✓ Marked '{}' done — streak {} day(s), progress {:.1}%",
        habit.name,
        habit.streak_count,
        habit.progress()
    );
    if let Some(event) = &event {
        announce_badge(event);
    }
    println_colored!(DIM, "  {}", quotes::random_quote());
    Ok(())
}

fn announce_badge(event: &BadgeEvent) {
    use crate::models::Badge;
    let line = match event.badge {
        Badge::Gold => "🏆 GOLD badge — habit goal completed 100%!",
        Badge::Silver => "🎖 SILVER badge — 75% of the goal reached!",
        Badge::Bronze => "🥉 BRONZE badge — halfway through the goal!",
        Badge::Starter => "💪 STARTER badge — 25% of the goal crossed!",
    };
    println_colored!(GOLD, "  {}", line);
}

// ─── Stats / export ──────────────────────────────────────────────────────────

pub fn handle_stats(store: &HabitStore) -> Result<()> {
    println!();
    println_colored!(GOLD, "  Statistics ({})", store.profile_name());
    println!();
    for habit in store.habits() {
        let last = habit
            .last_completed_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string());
        println_colored!(
            BOLD,
            "  {:<20} streak {:<4} best badge {:<4} last done {}",
            habit.name,
            habit.streak_count,
            habit.highest_badge,
            last
        );
    }

    println!();
    println_colored!(GOLD, "  Badges earned");
    let ledger = store.badge_counts();
    if ledger.total() == 0 {
        println_colored!(DIM, "  none yet");
    } else {
        for badge in crate::models::Badge::all() {
            println!("  {:<10} {}", badge.display_name(), ledger.count(badge));
        }
    }
    println!();
    Ok(())
}

pub fn handle_export(store: &HabitStore) -> Result<()> {
    let path = store.export_report()?;
    println_colored!(GREEN, "  ✓ Report exported to {:?}", path);
    Ok(())
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub fn handle_profile(
    store: &HabitStore,
    config: &mut AppConfig,
    action: Option<&ProfileCommands>,
) -> Result<()> {
    match action {
        None | Some(ProfileCommands::Show) => match store.load_profile()? {
            Some(profile) => {
                println!("  Name:   {}", profile.display_name);
                println!("  Email:  {}", profile.email);
                println!("  Gender: {}", profile.gender);
            }
            None => println_colored!(DIM, "  No profile saved"),
        },
        Some(ProfileCommands::Set {
            name,
            email,
            gender,
        }) => {
            store.save_profile(&Profile {
                display_name: name.clone(),
                email: email.clone(),
                gender: gender.clone(),
            })?;
            println_colored!(GREEN, "  ✓ Profile saved");
        }
        Some(ProfileCommands::Use { name }) => {
            config.profile = name.clone();
            config.save()?;
            println_colored!(GREEN, "  ✓ Default profile set to {}", name);
        }
    }
    Ok(())
}

// ─── Reminder loop ───────────────────────────────────────────────────────────

/// Foreground reminder mode: arms one timer per habit with a reminder
/// time and answers each fired reminder from stdin. The store is only
/// touched from this thread; timer threads just send habit names back.
pub fn handle_remind(store: &mut HabitStore) -> Result<()> {
    let mut scheduler = ReminderScheduler::new();
    scheduler.schedule_all(store.habits());

    let now = Local::now().naive_local();
    let mut armed = 0;
    for habit in store.habits() {
        if let Some(time) = habit.reminder_time {
            let delay = crate::reminder::delay_until(now, time);
            println_colored!(
                AMBER,
                "  {} at {} (in {})",
                habit.name,
                format_time(time),
                format_duration_secs(delay.as_secs() as i64)
            );
            armed += 1;
        }
    }
    if armed == 0 {
        println_colored!(DIM, "  No habits have a reminder time configured.");
        return Ok(());
    }
    println_colored!(DIM, "  Watching {} reminder(s). Ctrl-C to quit.", armed);

    loop {
        let fired = scheduler.recv()?;
        let Some(idx) = store
            .habits()
            .iter()
            .position(|h| h.name == fired.habit_name)
        else {
            // habit was deleted while its timer was pending
            continue;
        };

        match prompt_action(&fired.habit_name)? {
            ReminderAction::MarkDone => {
                let today = Local::now().date_naive();
                let event = store.mark_complete(idx, today)?;
                let habit = &store.habits()[idx];
                println_colored!(
                    GREEN,
                    "  ✓ Marked '{}' done — streak {} day(s)",
                    habit.name,
                    habit.streak_count
                );
                if let Some(event) = &event {
                    announce_badge(event);
                }
                println_colored!(DIM, "  {}", quotes::random_quote());
                rearm(&mut scheduler, store, idx);
            }
            ReminderAction::SnoozeMinutes(minutes) => {
                println_colored!(AMBER, "  Snoozed for {} minutes", minutes);
                scheduler
                    .schedule_after(&fired.habit_name, Duration::from_secs(minutes as u64 * 60));
            }
            ReminderAction::Skip => {
                println_colored!(DIM, "  Skipped");
                rearm(&mut scheduler, store, idx);
            }
        }
    }
}

/// Re-arm a habit's reminder for its next occurrence (tomorrow, since
/// the time of day just passed).
fn rearm(scheduler: &mut ReminderScheduler, store: &HabitStore, idx: usize) {
    let habit = &store.habits()[idx];
    if let Some(time) = habit.reminder_time {
        scheduler.schedule(&habit.name, time);
    }
}

fn prompt_action(habit_name: &str) -> Result<ReminderAction> {
    println!();
    println_colored!(BOLD, "  ⏰ Time for your habit: {}", habit_name);
    let answer = prompt("  [d]one / [s]nooze 10 min / s[k]ip? ")?;
    Ok(match answer.trim().to_lowercase().as_str() {
        "s" => ReminderAction::SnoozeMinutes(10),
        "k" => ReminderAction::Skip,
        _ => ReminderAction::MarkDone,
    })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Convert a 1-based CLI index into a bounds-checked vec index.
fn resolve_index(store: &HabitStore, index: usize) -> Result<usize> {
    index
        .checked_sub(1)
        .filter(|i| *i < store.habits().len())
        .ok_or_else(|| anyhow!("No habit at index {} — see `habitpal list`", index))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}
