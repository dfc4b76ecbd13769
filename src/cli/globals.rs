use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use crate::{
    api::{ClientConfig, config::DEFAULT_UPLOAD_MAX_MB},
    context::AppContext,
    session::FileStorage,
};

pub const STATE_DIR_NAME: &str = ".schooldesk";

/// `~/.schooldesk`, or `./.schooldesk` when `HOME` is not set.
#[must_use]
pub fn default_state_dir() -> PathBuf {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| Path::new(".").join(STATE_DIR_NAME), |home| {
            PathBuf::from(home).join(STATE_DIR_NAME)
        })
}

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub timeout: Option<Duration>,
    pub upload_max_mb: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            state_dir: default_state_dir(),
            timeout: None,
            upload_max_mb: DEFAULT_UPLOAD_MAX_MB,
        }
    }

    /// Builds the application context over the state directory and loads any
    /// persisted session.
    ///
    /// # Errors
    /// Returns an error if the API URL is invalid, the HTTP client cannot be
    /// built, or the stored session cannot be read.
    pub fn context(&self) -> Result<AppContext> {
        let config = ClientConfig::new(&self.api_url)
            .context("invalid SCHOOLDESK_API_URL")?
            .with_timeout(self.timeout)
            .with_upload_max_mb(self.upload_max_mb);

        let storage = Arc::new(FileStorage::new(self.state_dir.clone()));
        let ctx = AppContext::new(config, storage).context("failed to build the API client")?;
        ctx.restore().with_context(|| {
            format!("failed to read the session in {}", self.state_dir.display())
        })?;
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new("https://api.school.tld".to_string());
        assert_eq!(args.api_url, "https://api.school.tld");
        assert_eq!(args.timeout, None);
        assert_eq!(args.upload_max_mb, DEFAULT_UPLOAD_MAX_MB);
    }

    #[test]
    fn test_default_state_dir_uses_home() {
        temp_env::with_var("HOME", Some("/home/office"), || {
            assert_eq!(default_state_dir(), PathBuf::from("/home/office/.schooldesk"));
        });
        temp_env::with_var("HOME", None::<&str>, || {
            assert_eq!(default_state_dir(), PathBuf::from("./.schooldesk"));
        });
    }

    #[test]
    fn test_context_rejects_bad_url() {
        let args = GlobalArgs::new("ftp://api.school.tld".to_string());
        let err = args.context().err().map(|err| format!("{err:#}"));
        assert!(err.is_some_and(|message| message.contains("SCHOOLDESK_API_URL")));
    }

    #[test]
    fn test_context_over_empty_state_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut args = GlobalArgs::new("https://api.school.tld".to_string());
        args.state_dir = dir.path().to_path_buf();
        let ctx = args.context()?;
        assert!(!ctx.session().is_authenticated());
        Ok(())
    }
}
