//! Login/logout state machine.

use super::claims::{ClaimsError, Identity, decode_identity};
use crate::credentials::{CredentialError, CredentialStore};
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Credential rejected: {0}")]
    Claims(#[from] ClaimsError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Identity),
}

/// Owns the session state and the credential store behind it.
pub struct SessionManager {
    store: Box<dyn CredentialStore>,
    state: SessionState,
}

impl SessionManager {
    /// Creates an anonymous session. Call [`SessionManager::restore`] to pick up
    /// a previously stored credential.
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            store,
            state: SessionState::Anonymous,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Anonymous => None,
        }
    }

    /// Restores the session from the credential store.
    ///
    /// A stored credential that cannot be read or decoded is removed and the
    /// session stays anonymous. Only a failure to remove it is returned.
    pub fn restore(&mut self) -> Result<&SessionState, SessionError> {
        self.state = SessionState::Anonymous;

        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(&self.state),
            Err(CredentialError::Malformed(e)) => {
                warn!("Discarding unreadable credential file: {}", e);
                self.store.clear()?;
                return Ok(&self.state);
            }
            Err(e) => return Err(e.into()),
        };

        match decode_identity(&token) {
            Ok(identity) => {
                info!("Restored session for {}", identity.email);
                self.state = SessionState::Authenticated(identity);
            }
            Err(e) => {
                warn!("Discarding stored credential: {}", e);
                self.store.clear()?;
            }
        }
        Ok(&self.state)
    }

    /// Signs in with a credential freshly issued by the identity provider.
    ///
    /// The credential is only persisted once it decodes. On decode failure the
    /// store is cleared and the session is anonymous.
    pub fn login(&mut self, credential: &str) -> Result<Identity, SessionError> {
        let credential = credential.trim();
        let identity = match decode_identity(credential) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Login rejected: {}", e);
                self.state = SessionState::Anonymous;
                self.store.clear()?;
                return Err(e.into());
            }
        };

        self.store.save(credential)?;
        info!("Signed in as {}", identity.email);
        self.state = SessionState::Authenticated(identity.clone());
        Ok(identity)
    }

    /// Signs out: forgets the identity and deletes the stored credential.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let SessionState::Authenticated(identity) = &self.state {
            info!("Signing out {}", identity.email);
        }
        self.state = SessionState::Anonymous;
        self.store.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::FileCredentialStore;
    use crate::session::claims::token_with_payload;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn manager_in(dir: &TempDir) -> (SessionManager, FileCredentialStore, PathBuf) {
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);
        (
            SessionManager::new(Box::new(store.clone())),
            store,
            path,
        )
    }

    fn valid_token(email: &str) -> String {
        token_with_payload(&json!({"email": email, "name": "Ada", "picture": "p"}))
    }

    #[test]
    fn starts_anonymous_without_credential() {
        let dir = tempdir().unwrap();
        let (mut manager, _, _) = manager_in(&dir);

        assert_eq!(manager.restore().unwrap(), &SessionState::Anonymous);
        assert!(manager.identity().is_none());
    }

    #[test]
    fn restores_stored_credential() {
        let dir = tempdir().unwrap();
        let (mut manager, store, _) = manager_in(&dir);
        store.save(&valid_token("a@x.com")).unwrap();

        manager.restore().unwrap();
        assert_eq!(manager.identity().unwrap().email, "a@x.com");
    }

    #[test]
    /// A stored string that is not a token leaves the session anonymous and the store empty.
    fn malformed_stored_credential_is_cleared() {
        let dir = tempdir().unwrap();
        let (mut manager, store, path) = manager_in(&dir);
        store.save("definitely not a jwt").unwrap();

        assert_eq!(manager.restore().unwrap(), &SessionState::Anonymous);
        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_credential_file_is_cleared() {
        let dir = tempdir().unwrap();
        let (mut manager, store, path) = manager_in(&dir);
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(manager.restore().unwrap(), &SessionState::Anonymous);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn login_sets_identity_from_email_claim_and_persists() {
        let dir = tempdir().unwrap();
        let (mut manager, store, _) = manager_in(&dir);
        let token = valid_token("b@y.org");

        let identity = manager.login(&token).unwrap();

        assert_eq!(identity.email, "b@y.org");
        assert_eq!(manager.identity(), Some(&identity));
        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    /// A rejected login clears any previous credential instead of keeping it.
    fn failed_login_clears_store_and_stays_anonymous() {
        let dir = tempdir().unwrap();
        let (mut manager, store, _) = manager_in(&dir);
        store.save(&valid_token("old@x.com")).unwrap();

        let result = manager.login("garbage");

        assert!(matches!(result, Err(SessionError::Claims(_))));
        assert_eq!(manager.identity(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn logout_clears_identity_and_store() {
        let dir = tempdir().unwrap();
        let (mut manager, store, _) = manager_in(&dir);
        manager.login(&valid_token("a@x.com")).unwrap();

        manager.logout().unwrap();

        assert!(manager.identity().is_none());
        assert_eq!(store.load().unwrap(), None);

        // A fresh manager over the same store does not resurrect the session.
        let (mut again, _, _) = manager_in(&dir);
        assert_eq!(again.restore().unwrap(), &SessionState::Anonymous);
    }
}
