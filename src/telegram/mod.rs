//! Telegram account client
//!
//! Everything protocol-shaped lives behind this module:
//! - session handling and sign-in
//! - the update stream
//! - media introspection and byte transfer
//!
//! The rest of the crate treats the client as an opaque, already-correct
//! dependency.

mod client;
mod media;

pub use client::TelegramAccount;
pub use media::{document_info, DocumentInfo};
