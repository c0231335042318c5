//! Message filtering
//!
//! Two allow-lists decide what gets downloaded:
//! - the chat filter restricts which conversations are monitored
//! - the extension filter restricts which attachment types are saved

mod chat;
mod extension;

pub use chat::ChatFilter;
pub use extension::{ExtensionFilter, EXTENSION_PRESETS};
