//! Route guard and navigation target. The guard is evaluated before a screen
//! loads anything, so an unauthenticated dashboard visit is redirected without
//! a single backend request. This is a UX guard; access control lives in the
//! API.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const HOME_PATH: &str = "/dashboard/home";
pub const SCHOOL_DETAILS_PATH: &str = "/dashboard/settings/school-details";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Proceed,
    Redirect(&'static str),
}

/// Decides where a visit to `path` ends up.
#[must_use]
pub fn guard(path: &str, authenticated: bool) -> RouteDecision {
    let path = normalize(path);

    if path == "/" || path == "/auth" {
        return RouteDecision::Redirect(LOGIN_PATH);
    }

    if !authenticated && (path == "/dashboard" || path.starts_with("/dashboard/")) {
        return RouteDecision::Redirect(LOGIN_PATH);
    }

    if authenticated && (path == LOGIN_PATH || path == REGISTER_PATH) {
        return RouteDecision::Redirect(HOME_PATH);
    }

    RouteDecision::Proceed
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Current location of the console; redirects issued by handlers land here.
#[derive(Clone, Debug)]
pub struct Navigator {
    location: Arc<Mutex<String>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            location: Arc::new(Mutex::new("/".to_string())),
        }
    }
}

impl Navigator {
    pub fn redirect(&self, path: &str) {
        debug!("navigating to {path}");
        let mut location = self.location.lock().unwrap_or_else(PoisonError::into_inner);
        *location = path.to_string();
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies the guard to `path` and moves to the resulting location.
    /// Returns the decision so callers can skip loading a redirected screen.
    pub fn visit(&self, path: &str, authenticated: bool) -> RouteDecision {
        let decision = guard(path, authenticated);
        match decision {
            RouteDecision::Proceed => self.redirect(normalize(path)),
            RouteDecision::Redirect(target) => self.redirect(target),
        }
        decision
    }
}
