//! # Session
//!
//! Local trader identity kept in the key/value store under `user`.
//! There is no real authentication here: the first run generates an
//! identity, `login` renames it, `logout` forgets it together with any
//! backend token.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::services::storage::{KeyValueStore, AUTH_TOKEN_KEY, LOGIN_URL_KEY, USER_KEY};
use crate::utils::validation::validate_display_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub id: String,
    #[serde(alias = "display_name")]
    pub display_name: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl LocalUser {
    /// Fresh identity named `Trader-XXXX` after the id's first hex digits.
    pub fn generate() -> Self {
        let id = Uuid::new_v4().to_string();
        let display_name = format!("Trader-{}", id[..4].to_ascii_uppercase());
        Self {
            id,
            display_name,
            created_at: Utc::now(),
        }
    }
}

pub struct Session {
    store: Arc<dyn KeyValueStore>,
    user: RwLock<Option<LocalUser>>,
}

impl Session {
    /// Read the stored identity, creating one on first run.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let stored = store.get(USER_KEY).and_then(|raw| match serde_json::from_str::<LocalUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is unreadable, generating a new identity");
                None
            }
        });

        let session = Self {
            store,
            user: RwLock::new(stored),
        };
        session.ensure_user()?;
        Ok(session)
    }

    pub fn current(&self) -> Option<LocalUser> {
        self.user.read().clone()
    }

    /// The current identity, generating and persisting one if needed.
    pub fn ensure_user(&self) -> Result<LocalUser> {
        if let Some(user) = self.current() {
            return Ok(user);
        }
        let user = LocalUser::generate();
        self.persist(&user)?;
        tracing::info!(user_id = %user.id, display_name = %user.display_name, "Generated local identity");
        *self.user.write() = Some(user.clone());
        Ok(user)
    }

    /// Rename the identity.
    pub fn login(&self, display_name: &str) -> Result<LocalUser> {
        validate_display_name(display_name).into_result()?;
        let mut user = self.ensure_user()?;
        user.display_name = display_name.trim().to_string();
        self.persist(&user)?;
        *self.user.write() = Some(user.clone());
        tracing::info!(user_id = %user.id, "Display name updated");
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(LOGIN_URL_KEY)?;
        *self.user.write() = None;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Validation("Token cannot be empty".to_string()));
        }
        self.store.set(AUTH_TOKEN_KEY, token)?;
        // a fresh token settles any pending login
        self.store.remove(LOGIN_URL_KEY)
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// Login URL left behind by the last 401.
    pub fn pending_login_url(&self) -> Option<String> {
        self.store.get(LOGIN_URL_KEY)
    }

    fn persist(&self, user: &LocalUser) -> Result<()> {
        let raw = serde_json::to_string(user).map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(USER_KEY, &raw)
    }
}
