//! Grammers-backed client wrapper
//!
//! Owns the session store, the sender pool, and the update stream. The
//! service acquires the connection through [`TelegramAccount::connect`] and
//! must release it through [`TelegramAccount::disconnect`] on every exit
//! path.

use crate::config::Config;
use crate::error::{Error, Result};

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use grammers_client::client::updates::UpdateStream;
use grammers_client::session::storages::SqliteSession;
use grammers_client::types::Media;
use grammers_client::{Client, InvocationError, SignInError, Update, UpdatesConfiguration};
use grammers_mtsender::{SenderPool, SenderPoolHandle};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Owned handle to a connected Telegram account
pub struct TelegramAccount {
    client: Client,
    handle: SenderPoolHandle,
    runner: JoinHandle<()>,
    updates: UpdateStream,
    api_hash: String,
}

impl TelegramAccount {
    /// Open the session store and start the sender pool.
    ///
    /// Does not sign in; authorization state comes from the persisted
    /// session, or from [`TelegramAccount::sign_in_interactive`].
    pub async fn connect(config: &Config) -> Result<Self> {
        let session_path = config.session_path();
        debug!("Opening session store at {}", session_path.display());

        let session = SqliteSession::open(&session_path).map_err(|e| {
            Error::Session(format!(
                "failed to open session {}: {}",
                session_path.display(),
                e
            ))
        })?;

        let pool = SenderPool::new(Arc::new(session), config.api_id);
        let client = Client::new(&pool);
        let SenderPool {
            runner,
            updates,
            handle,
        } = pool;
        let runner = tokio::spawn(runner.run());

        let updates = client.stream_updates(
            updates,
            UpdatesConfiguration {
                catch_up: false,
                ..Default::default()
            },
        );

        info!("Connected to Telegram");

        Ok(TelegramAccount {
            client,
            handle,
            runner,
            updates,
            api_hash: config.api_hash.clone(),
        })
    }

    /// Whether the persisted session is already signed in
    pub async fn is_authorized(&self) -> Result<bool> {
        Ok(self.client.is_authorized().await?)
    }

    /// First-run interactive sign-in: phone number, login code, and the
    /// account password when two-step verification is enabled.
    ///
    /// Stdin EOF means there is no terminal to prompt on; that is reported
    /// as [`Error::AuthRequired`] instead of an opaque parse failure.
    pub async fn sign_in_interactive(&self) -> Result<()> {
        let phone = prompt("Enter your phone number (international format): ")?;
        let token = self
            .client
            .request_login_code(&phone, &self.api_hash)
            .await?;

        let code = prompt("Enter the login code you received: ")?;
        match self.client.sign_in(&token, &code).await {
            Ok(_) => Ok(()),
            Err(SignInError::PasswordRequired(password_token)) => {
                let password = rpassword::prompt_password("Enter your account password: ")
                    .map_err(|_| Error::AuthRequired)?;
                self.client
                    .check_password(password_token, password.trim())
                    .await
                    .map_err(|e| Error::Auth(e.to_string()))?;
                Ok(())
            }
            Err(e) => Err(Error::Auth(e.to_string())),
        }
    }

    /// Display label for the signed-in account
    pub async fn whoami(&self) -> Result<String> {
        let me = self.client.get_me().await?;
        Ok(match me.username() {
            Some(handle) => format!("@{}", handle),
            None => me.bare_id().to_string(),
        })
    }

    /// Next notification from the update stream
    pub async fn next_update(&mut self) -> std::result::Result<Update, InvocationError> {
        self.updates.next().await
    }

    /// Stream the media payload of a message into `path`
    pub async fn download_media(&self, media: &Media, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;

        let mut download = self.client.iter_download(media);
        while let Some(chunk) = download.next().await? {
            file.write_all(&chunk)?;
        }
        file.sync_all()?;

        Ok(())
    }

    /// Quit the sender pool and wait for its runner to wind down
    pub async fn disconnect(self) {
        self.handle.quit();
        if let Err(e) = self.runner.await {
            warn!("Sender pool shutdown join failed: {}", e);
        }
        info!("Disconnected from Telegram");
    }
}

/// Read one trimmed line from stdin, treating EOF as a missing terminal
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Err(Error::AuthRequired);
    }
    Ok(line.trim().to_string())
}
