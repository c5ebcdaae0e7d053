//! Time-of-day reminders.
//!
//! Timer threads never touch the habit store: when a reminder fires
//! they send a [`ReminderFired`] event over a channel back to the
//! owning thread, which decides what to do with it. One pending timer
//! exists per habit name; rescheduling or deleting a habit cancels the
//! old timer through a shared flag the thread polls while sleeping.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};

use crate::models::Habit;

/// What the owning thread chose to do with a fired reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    MarkDone,
    SnoozeMinutes(u32),
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFired {
    pub habit_name: String,
}

/// Delay from `now` until the next occurrence of `target`. A target
/// equal to or already past `now` rolls over to tomorrow, so the
/// result is always positive.
pub fn delay_until(now: NaiveDateTime, target: NaiveTime) -> Duration {
    let mut next = now.date().and_time(target);
    if next <= now {
        next += TimeDelta::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

pub struct ReminderScheduler {
    tx: mpsc::Sender<ReminderFired>,
    rx: mpsc::Receiver<ReminderFired>,
    pending: HashMap<String, Arc<AtomicBool>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            pending: HashMap::new(),
        }
    }

    /// Block until the next reminder fires.
    pub fn recv(&self) -> Result<ReminderFired, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<ReminderFired, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Arm a reminder for the next occurrence of `time`, replacing any
    /// pending reminder for the same habit.
    pub fn schedule(&mut self, name: &str, time: NaiveTime) {
        let delay = delay_until(Local::now().naive_local(), time);
        log::debug!("Reminder for {:?} in {}s", name, delay.as_secs());
        self.schedule_after(name, delay);
    }

    /// Arm a reminder after a fixed delay (snooze path).
    pub fn schedule_after(&mut self, name: &str, delay: Duration) {
        self.cancel(name);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.pending.insert(name.to_string(), cancelled.clone());

        let tx = self.tx.clone();
        let habit_name = name.to_string();
        thread::spawn(move || {
            if sleep_unless_cancelled(delay, &cancelled) {
                let _ = tx.send(ReminderFired { habit_name });
            }
        });
    }

    /// Cancel the pending reminder for a habit, if any.
    pub fn cancel(&mut self, name: &str) {
        if let Some(flag) = self.pending.remove(name) {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Cancel everything and re-arm one reminder per habit that has a
    /// reminder time. Used after edits, since indices are reused and a
    /// replaced habit's time may have changed.
    pub fn schedule_all(&mut self, habits: &[Habit]) {
        for flag in self.pending.values() {
            flag.store(true, Ordering::Relaxed);
        }
        self.pending.clear();
        for habit in habits {
            if let Some(time) = habit.reminder_time {
                self.schedule(&habit.name, time);
            }
        }
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep in short slices so a cancelled timer wakes up promptly.
/// Returns false when cancelled before the full delay elapsed.
fn sleep_unless_cancelled(total: Duration, cancelled: &AtomicBool) -> bool {
    let mut remaining = total;
    while !remaining.is_zero() {
        if cancelled.load(Ordering::Relaxed) {
            return false;
        }
        let step = remaining.min(Duration::from_millis(250));
        thread::sleep(step);
        remaining -= step;
    }
    !cancelled.load(Ordering::Relaxed)
}
