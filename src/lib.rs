/// Balance Notifier - low-balance notices for subscribers
///
/// This library sends a subscriber a notice when their account balance runs
/// low, either through the cloud SMS / mail API or directly over SMTP.
pub mod cli;
pub mod config;
pub mod core;
pub mod events;
pub mod formatting;
pub mod notification;
pub mod signing;

// Re-export core types for convenience
pub use crate::core::*;
pub use events::BalanceEvent;
pub use notification::{BalanceNotifier, NotifyError};
