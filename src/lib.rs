//! telewaves - Telegram media monitor
//!
//! Watches a personal Telegram account for incoming media documents and
//! downloads the ones that pass the configured chat and extension filters.
//! The protocol layer is delegated to the grammers client; this crate is
//! the filtering-and-persistence layer on top of it.

pub mod config;
pub mod error;
pub mod filename;
pub mod filter;
pub mod monitor;
pub mod telegram;

pub use config::Config;
pub use error::{Error, Result};
pub use monitor::Monitor;
pub use telegram::TelegramAccount;
