//! Media monitoring service
//!
//! Owns the Telegram account client, drives the update stream, and runs the
//! per-message pipeline: chat filter, filename derivation, extension filter,
//! download, post-download validation. One message is processed at a time.

use crate::config::Config;
use crate::error::Result;
use crate::filename;
use crate::filter::{ChatFilter, ExtensionFilter};
use crate::telegram::{self, TelegramAccount};

use grammers_client::types::update::Message;
use grammers_client::types::Media;
use grammers_client::{InvocationError, Update};
use tracing::{debug, error, info, warn};

/// The telewaves service: filters incoming messages and downloads matching
/// media documents
pub struct Monitor {
    config: Config,
    chat_filter: ChatFilter,
    extension_filter: ExtensionFilter,
}

impl Monitor {
    /// Build the service from a loaded configuration
    pub fn new(config: Config) -> Self {
        let chat_filter = ChatFilter::new(config.chat_filter.clone());
        if chat_filter.is_empty() {
            info!("No chat filter - monitoring all chats");
        } else {
            info!("Chat filter enabled for: {}", chat_filter.describe());
        }

        let extension_filter = ExtensionFilter::resolve(&config.extensions_filter);
        if extension_filter.is_empty() {
            info!("No extension filter - downloading all media types");
        } else {
            info!("Selected extensions: {}", extension_filter.describe());
        }

        Monitor {
            config,
            chat_filter,
            extension_filter,
        }
    }

    /// Connect, sign in if needed, and process updates until disconnected.
    ///
    /// The client is released on every exit path, including errors.
    pub async fn run(&self) -> Result<()> {
        info!("Starting telewaves service...");
        info!("Download directory: {}", self.config.download_dir.display());

        let mut account = TelegramAccount::connect(&self.config).await?;

        let result = self.serve(&mut account).await;
        account.disconnect().await;

        if let Err(e) = &result {
            error!("Service stopped with error: {}", e);
            if e.is_auth_shaped() {
                error!("This may be an authentication issue. Check your API credentials and session.");
            }
        }
        result
    }

    async fn serve(&self, account: &mut TelegramAccount) -> Result<()> {
        if !account.is_authorized().await? {
            info!("Session not authorized yet - starting interactive sign-in");
            account.sign_in_interactive().await?;
        }
        info!("Signed in as {}", account.whoami().await?);
        info!("Monitoring Telegram messages for media files...");

        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    if let Err(e) = signal {
                        warn!("Failed to listen for Ctrl+C: {}", e);
                    }
                    info!("Shutdown signal received");
                    return Ok(());
                }
                update = account.next_update() => {
                    match update {
                        Ok(Update::NewMessage(message)) => {
                            self.process_message(account, &message).await;
                        }
                        Ok(_) => {}
                        Err(InvocationError::Dropped) => {
                            info!("Update stream closed - shutting down");
                            return Ok(());
                        }
                        Err(e) => warn!("Update stream error: {}", e),
                    }
                }
            }
        }
    }

    /// One-shot pipeline for a single message notification.
    ///
    /// Failures are logged and absorbed; the update loop keeps running.
    async fn process_message(&self, account: &TelegramAccount, message: &Message) {
        let Some(media) = message.media() else {
            return;
        };

        let chat_id = message.peer_id().bot_api_dialog_id();
        let (sender_id, sender_handle) = match message.sender() {
            Some(peer) => (
                Some(peer.id().bot_api_dialog_id()),
                peer.username().map(str::to_string),
            ),
            None => (None, None),
        };
        let sender_label = sender_handle
            .as_deref()
            .map(|handle| format!("@{}", handle))
            .or_else(|| sender_id.map(|id| id.to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        if !self
            .chat_filter
            .should_process(chat_id, sender_id, sender_handle.as_deref())
        {
            debug!(
                "Skipping message from {} in chat {} (filtered out)",
                sender_label, chat_id
            );
            return;
        }

        let Some(document) = telegram::document_info(&media) else {
            debug!("Ignoring non-document media in chat {}", chat_id);
            return;
        };

        info!("Processing message from {} in chat {}", sender_label, chat_id);

        let mime = document.mime_type.as_deref();
        let name = derive_filename(document.file_name.as_deref(), document.id, mime);

        if !self.extension_filter.matches(&name) {
            debug!(
                "Document {} does not match extension filter (MIME: {})",
                name,
                mime.unwrap_or("unknown")
            );
            return;
        }

        info!("Found matching file: {} (MIME: {})", name, mime.unwrap_or("unknown"));

        if let Err(e) = self.download(account, &media, &name).await {
            error!("Failed to process media file {}: {}", name, e);
        }
    }

    /// Download into a collision-free path and validate the saved file
    async fn download(
        &self,
        account: &TelegramAccount,
        media: &Media,
        original_name: &str,
    ) -> Result<()> {
        let safe_name = filename::sanitize(original_name);
        let target = filename::unique_path(&self.config.download_dir, &safe_name);

        info!("Downloading file to: {}", target.display());
        account.download_media(media, &target).await?;

        // The transfer controls the final on-disk name; re-check it.
        if !self.extension_filter.matches(&target) {
            warn!(
                "Downloaded file does not match extension filter: {}",
                target.display()
            );
            std::fs::remove_file(&target)?;
            info!("Removed filtered file: {}", target.display());
            return Ok(());
        }

        let size = std::fs::metadata(&target)?.len();
        info!(
            "Successfully downloaded: {} ({:.2} MB)",
            target.display(),
            size as f64 / (1024.0 * 1024.0)
        );
        Ok(())
    }
}

/// Filename for a document: the declared attribute name when present,
/// otherwise `document_<id>` with a MIME-guessed extension
fn derive_filename(declared: Option<&str>, doc_id: i64, mime: Option<&str>) -> String {
    if let Some(name) = declared {
        return name.to_string();
    }

    let mut name = format!("document_{}", doc_id);
    if let Some(ext) = mime.and_then(filename::extension_for_mime) {
        name.push_str(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_filename_prefers_declared_name() {
        assert_eq!(
            derive_filename(Some("song.mp3"), 42, Some("audio/mpeg")),
            "song.mp3"
        );
    }

    #[test]
    fn test_derive_filename_synthesizes_from_mime() {
        assert_eq!(
            derive_filename(None, 42, Some("audio/flac")),
            "document_42.flac"
        );
    }

    #[test]
    fn test_derive_filename_unmapped_mime_has_no_extension() {
        assert_eq!(
            derive_filename(None, 42, Some("application/x-unknown")),
            "document_42"
        );
        assert_eq!(derive_filename(None, 42, None), "document_42");
    }
}
