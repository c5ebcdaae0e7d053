pub mod badge;
pub mod habit;
pub mod profile;

pub use badge::Badge;
pub use habit::{Frequency, Habit};
pub use profile::Profile;
