use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "habitpal", version, about = "A terminal companion for building daily habits")]
pub struct Cli {
    /// Profile name (overrides the configured one)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Target number of completions
        #[arg(long)]
        total: u32,
        /// Frequency: daily or weekly
        #[arg(long, default_value = "daily")]
        freq: String,
        /// Reminder time of day (H:mm), omit for none
        #[arg(long)]
        remind: Option<String>,
    },
    /// List habits with their progress
    List,
    /// Mark a habit done today (1-based index from `list`)
    Done {
        index: usize,
    },
    /// Delete a habit
    Delete {
        index: usize,
    },
    /// Edit a habit in place
    Edit {
        index: usize,
        /// New habit name
        #[arg(long)]
        name: Option<String>,
        /// New target number of completions
        #[arg(long)]
        total: Option<u32>,
        /// New frequency: daily or weekly
        #[arg(long)]
        freq: Option<String>,
        /// New reminder time (H:mm); pass an empty string to clear
        #[arg(long)]
        remind: Option<String>,
    },
    /// Show streaks and badge counts
    Stats,
    /// Export a fixed-width progress report
    Export,
    /// Show or set the user profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },
    /// Run in the foreground and fire reminders at their times
    Remind,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Print the stored profile
    Show,
    /// Replace the stored profile
    Set {
        name: String,
        email: String,
        #[arg(default_value = "")]
        gender: String,
    },
    /// Switch the default profile for future runs
    Use {
        name: String,
    },
}
