//! Session setup and initialization

use super::{Identity, SessionManager};
use crate::api::{ApiClient, FinanceApi};
use crate::config::AppConfig;
use crate::credentials::FileCredentialStore;
use log::debug;
use std::error::Error;
use std::sync::Arc;

/// Everything a command needs to talk to the backend on the user's behalf.
pub struct SessionData {
    /// Resolved configuration
    pub config: AppConfig,
    /// Session state, restored from the credential store
    pub manager: SessionManager,
    /// Backend client shared by all panels
    pub api: Arc<dyn FinanceApi>,
}

impl SessionData {
    /// The signed-in identity, or an error telling the user to log in.
    pub fn require_identity(&self) -> Result<Identity, Box<dyn Error>> {
        self.manager
            .identity()
            .cloned()
            .ok_or_else(|| Box::from("Not signed in. Run `fintrack login` first."))
    }
}

/// Restores the session and builds the API client.
///
/// A stored credential that no longer decodes is discarded here, so the
/// caller always starts from a consistent state.
///
/// # Errors
/// Returns an error if the credential file cannot be accessed or the HTTP
/// client cannot be built.
pub fn setup_session(config: AppConfig) -> Result<SessionData, Box<dyn Error>> {
    let store = FileCredentialStore::new(config.credential_path.clone());
    let mut manager = SessionManager::new(Box::new(store));
    manager.restore()?;

    let api = ApiClient::new(&config.api_url)?;
    debug!("Using backend at {}", api.base_url());

    Ok(SessionData {
        config,
        manager,
        api: Arc::new(api),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::session::claims::token_with_payload;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn anonymous_session_requires_login() {
        let dir = tempdir().unwrap();
        let session = setup_session(AppConfig::new(dir.path(), Environment::Local)).unwrap();

        assert!(session.manager.identity().is_none());
        let err = session.require_identity().unwrap_err();
        assert!(err.to_string().contains("fintrack login"));
    }

    #[test]
    fn stored_credential_is_restored() {
        let dir = tempdir().unwrap();
        let config = AppConfig::new(dir.path(), Environment::Local);
        let token = token_with_payload(&json!({"name": "Ada", "email": "a@x.com"}));
        fs::write(
            &config.credential_path,
            json!({ "auth_token": token }).to_string(),
        )
        .unwrap();

        let session = setup_session(config).unwrap();

        assert_eq!(session.require_identity().unwrap().email, "a@x.com");
    }
}
