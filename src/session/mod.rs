//! Operator session: the bearer credential read by every request, its persisted
//! record, and the cached profile blob. The record mirrors the browser cookie
//! the console used to set (two day expiry, `Secure`, `SameSite=Lax`, path `/`)
//! and is treated as absent once expired. Tokens are held as `SecretString`
//! and must never be logged.

pub mod jwt;
pub mod profile;
pub mod storage;

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::guard::Navigator;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

pub const SESSION_COOKIE_NAME: &str = "schooldesk-session";
pub const STORAGE_PROFILE_DATA: &str = "schooldesk-profileData";
pub const SESSION_TTL_DAYS: i64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Attributes of the session cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub ttl: TimeDelta,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: &'static str,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE_NAME,
            ttl: TimeDelta::days(SESSION_TTL_DAYS),
            secure: true,
            same_site: SameSite::Lax,
            path: "/",
        }
    }
}

impl SessionCookie {
    /// Renders a `Set-Cookie` value carrying `token`.
    #[must_use]
    pub fn set_cookie(&self, token: &str) -> String {
        let mut value = format!(
            "{}={token}; Max-Age={}; Path={}; SameSite={}",
            self.name,
            self.ttl.num_seconds(),
            self.path,
            self.same_site.as_str()
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }

    /// Renders a `Set-Cookie` value that expires the cookie immediately.
    #[must_use]
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; expires=Thu, 01 Jan 1970 00:00:00 UTC; Path={}",
            self.name, self.path
        )
    }
}

/// Persisted form of the credential.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Credential holder shared by the request layer and the screens.
#[derive(Clone)]
pub struct Session {
    credential: Arc<RwLock<Option<SecretString>>>,
    storage: Arc<dyn Storage>,
    cookie: SessionCookie,
    navigator: Navigator,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("cookie", &self.cookie.name)
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            credential: Arc::new(RwLock::new(None)),
            storage,
            cookie: SessionCookie::default(),
            navigator: Navigator::default(),
        }
    }

    /// Session backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    #[must_use]
    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Current bearer credential, read at request time.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Loads the persisted credential. Expired or unreadable records are
    /// removed and leave the session signed out.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store fails.
    pub fn restore(&self) -> Result<bool, StorageError> {
        self.restore_at(Utc::now())
    }

    /// [`Session::restore`] against an explicit clock.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store fails.
    pub fn restore_at(&self, now: DateTime<Utc>) -> Result<bool, StorageError> {
        let Some(raw) = self.storage.get(self.cookie.name)? else {
            self.set_credential(None);
            return Ok(false);
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) if !stored.is_expired(now) && !stored.token.is_empty() => {
                self.set_credential(Some(SecretString::from(stored.token)));
                Ok(true)
            }
            Ok(_) => {
                debug!("stored session expired");
                self.destroy()?;
                Ok(false)
            }
            Err(err) => {
                debug!("discarding unreadable session record: {err}");
                self.destroy()?;
                Ok(false)
            }
        }
    }

    /// Stores `token` in memory and persists it for the cookie lifetime.
    ///
    /// # Errors
    /// Returns `StorageError` if the record cannot be persisted.
    pub fn create(&self, token: &str) -> Result<(), StorageError> {
        self.create_at(token, Utc::now())
    }

    /// [`Session::create`] against an explicit clock.
    ///
    /// # Errors
    /// Returns `StorageError` if the record cannot be persisted.
    pub fn create_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), StorageError> {
        let stored = StoredSession {
            token: token.to_string(),
            expires_at: now + self.cookie.ttl,
        };
        let raw = serde_json::to_string(&stored).map_err(|err| StorageError::Corrupt {
            key: self.cookie.name.to_string(),
            message: err.to_string(),
        })?;
        self.storage.set(self.cookie.name, &raw)?;
        self.set_credential(Some(SecretString::from(token.to_string())));
        Ok(())
    }

    /// Clears the credential, the persisted record and the profile blob.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store fails; the in-memory
    /// credential is cleared regardless.
    pub fn destroy(&self) -> Result<(), StorageError> {
        self.set_credential(None);
        self.storage.remove(self.cookie.name)?;
        self.storage.remove(STORAGE_PROFILE_DATA)
    }

    /// Header value for an authenticated request.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    fn set_credential(&self, token: Option<SecretString>) {
        let mut credential = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *credential = token;
    }
}
