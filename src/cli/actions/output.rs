//! Results go to stdout as pretty JSON; notices go to stderr. An error notice
//! becomes the command's error so the exit status reflects it.

use anyhow::{Result, anyhow, bail};
use serde::Serialize;

use crate::{context::AppContext, guard::RouteDecision, notice::Notice};

/// # Errors
/// Returns an error if `value` cannot be encoded.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// # Errors
/// Returns the notice text when it reports a failure.
pub fn report(notice: &Notice) -> Result<()> {
    if notice.is_success() {
        eprintln!("{notice}");
        Ok(())
    } else {
        Err(anyhow!(notice.message.clone()))
    }
}

/// Guards a dashboard screen before anything is loaded for it.
///
/// # Errors
/// Returns an error when the visit is redirected.
pub fn open_screen(ctx: &AppContext, path: &str) -> Result<()> {
    match ctx.visit(path) {
        RouteDecision::Proceed => Ok(()),
        RouteDecision::Redirect(target) => {
            bail!("not signed in: {path} redirects to {target}; run `schooldesk login` first")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ClientConfig, session::MemoryStorage};
    use std::sync::Arc;

    #[test]
    fn error_notice_becomes_error() {
        let err = report(&Notice::error("Failed to add subject")).err();
        assert_eq!(err.map(|e| e.to_string()), Some("Failed to add subject".to_string()));
        assert!(report(&Notice::success("Subject added")).is_ok());
    }

    #[test]
    fn dashboard_needs_session() -> Result<()> {
        let config = ClientConfig::new("http://localhost:9")?;
        let ctx = AppContext::new(config, Arc::new(MemoryStorage::new()))?;
        assert!(open_screen(&ctx, "/dashboard/students").is_err());
        assert_eq!(ctx.navigator().location(), "/auth/login");
        Ok(())
    }
}
