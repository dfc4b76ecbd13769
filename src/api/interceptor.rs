//! Status handler table consulted after every response. Handlers are looked up
//! by status code, so new reactions are registered here instead of at call
//! sites.

use std::{fmt, sync::Arc};
use tracing::warn;

use super::error::ApiError;
use crate::{guard::LOGIN_PATH, session::Session};

/// Side effect triggered by a matching response status.
pub trait StatusAction: Send + Sync {
    fn on_status(&self, error: &ApiError);
}

#[derive(Clone, Default)]
pub struct StatusHandlers {
    handlers: Vec<(u16, Arc<dyn StatusAction>)>,
}

impl StatusHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` for `status`. A later registration for the same
    /// status runs after the earlier ones.
    #[must_use]
    pub fn register(mut self, status: u16, action: Arc<dyn StatusAction>) -> Self {
        self.handlers.push((status, action));
        self
    }

    /// Runs every handler registered for the error's status.
    /// Returns how many handlers ran.
    pub fn dispatch(&self, error: &ApiError) -> usize {
        let Some(status) = error.status() else {
            return 0;
        };

        let mut ran = 0;
        for (_, action) in self.handlers.iter().filter(|(code, _)| *code == status) {
            action.on_status(error);
            ran += 1;
        }
        ran
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for StatusHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<u16> = self.handlers.iter().map(|(code, _)| *code).collect();
        f.debug_struct("StatusHandlers")
            .field("statuses", &codes)
            .finish()
    }
}

/// Clears the persisted credential and sends the operator back to login.
/// Registered for `401 Unauthorized`.
pub struct SessionExpired {
    session: Session,
}

impl SessionExpired {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl StatusAction for SessionExpired {
    fn on_status(&self, _error: &ApiError) {
        warn!("session rejected by the server, signing out");
        if let Err(err) = self.session.destroy() {
            warn!("failed to clear persisted session: {err}");
        }
        self.session.navigator().redirect(LOGIN_PATH);
    }
}
