//! Persistent session state: the bearer token and a guest's pending outfit.

use crate::adapters::http::ApiClient;
use crate::domain::model::{NewOutfit, RecordId};
use crate::domain::ports::Storage;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_non_empty_string;

pub const TOKEN_KEY: &str = "token";
pub const PENDING_OUTFIT_KEY: &str = "pendingOutfit.json";

#[derive(Debug, Clone, PartialEq)]
pub enum PendingOutcome {
    Nothing,
    Saved(Option<RecordId>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub pending: PendingOutcome,
}

impl LoginOutcome {
    pub fn message(&self) -> &'static str {
        match self.pending {
            PendingOutcome::Nothing => "Welcome back! 👋",
            PendingOutcome::Saved(_) => "Welcome back! Saved your outfit to wardrobe. 🧥",
            PendingOutcome::Failed(_) => "Welcome back! (Couldn't save pending outfit)",
        }
    }
}

pub struct Session<S: Storage> {
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        let token = self
            .storage
            .read_file(TOKEN_KEY)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(token)
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }

    /// Gate for operations that need an account.
    pub async fn require_token(&self) -> Result<String> {
        self.token().await?.ok_or(AppError::NotAuthenticated)
    }

    pub async fn store_token(&self, token: &str) -> Result<()> {
        validate_non_empty_string("access_token", token)?;
        self.storage.write_file(TOKEN_KEY, token.as_bytes()).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.storage.remove_file(TOKEN_KEY).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn pending_outfit(&self) -> Result<Option<NewOutfit>> {
        let Some(bytes) = self.storage.read_file(PENDING_OUTFIT_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(outfit) => Ok(Some(outfit)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable pending outfit: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn stash_pending_outfit(&self, outfit: &NewOutfit) -> Result<()> {
        let data = serde_json::to_vec_pretty(outfit)?;
        self.storage.write_file(PENDING_OUTFIT_KEY, &data).await
    }

    pub async fn clear_pending_outfit(&self) -> Result<()> {
        self.storage.remove_file(PENDING_OUTFIT_KEY).await
    }

    /// Logs in, persists the token on `api` and on disk, then saves any
    /// outfit the user analysed while logged out.
    pub async fn login(&self, api: &mut ApiClient, email: &str, password: &str) -> Result<LoginOutcome> {
        validate_non_empty_string("email", email)?;
        validate_non_empty_string("password", password)?;

        let token = api.login(email, password).await?;
        self.store_token(&token.access_token).await?;
        api.set_token(Some(token.access_token));
        tracing::info!("Logged in as {}", email);

        let pending = match self.pending_outfit().await? {
            None => PendingOutcome::Nothing,
            Some(outfit) => match api.save_outfit(&outfit).await {
                Ok(id) => {
                    if let Err(e) = self.clear_pending_outfit().await {
                        tracing::warn!("Saved pending outfit but could not clear it: {}", e);
                    }
                    PendingOutcome::Saved(id)
                }
                Err(e) => {
                    tracing::error!("Failed to save pending outfit: {}", e);
                    PendingOutcome::Failed(e.user_friendly_message())
                }
            },
        };

        Ok(LoginOutcome { pending })
    }

    pub async fn signup(&self, api: &ApiClient, email: &str, password: &str) -> Result<serde_json::Value> {
        validate_non_empty_string("email", email)?;
        validate_non_empty_string("password", password)?;
        if !email.contains('@') {
            return Err(AppError::validation(format!("'{}' is not an email address", email)));
        }
        api.signup(email, password).await
    }
}
