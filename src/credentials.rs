//! Durable storage for the identity provider's credential.
//!
//! The credential is an opaque string as far as this module is concerned:
//! it is written, read back and removed, never inspected.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not hold a credential record.
    #[error("Credential file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub trait CredentialStore: Send + Sync {
    /// Persists `token`, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), CredentialError>;

    /// Returns the stored token, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>, CredentialError>;

    /// Removes the stored token. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), CredentialError>;
}

/// On-disk record. A single well-known key, mirroring browser local storage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct StoredCredential {
    auth_token: String,
}

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    /// Directories will be created if they don't exist. This method overwrites existing files.
    fn save(&self, token: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = StoredCredential {
            auth_token: token.to_string(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let buf = fs::read(&self.path)?;
        let record: StoredCredential = serde_json::from_slice(&buf)?;
        if record.auth_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(record.auth_token))
    }

    fn clear(&self) -> Result<(), CredentialError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved credential should return the same token.
    fn load_recovers_saved_token() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.save("header.payload.signature").unwrap();

        assert_eq!(
            store.load().unwrap().as_deref(),
            Some("header.payload.signature")
        );
    }

    #[test]
    // Saving should create directories if they don't exist.
    fn save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("credentials.json");
        let store = FileCredentialStore::new(&path);

        assert!(store.save("token").is_ok(), "Failed to save credential");
        assert!(path.exists());
    }

    #[test]
    // Saving should overwrite an existing credential.
    fn save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.save("first").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn load_without_file_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);

        store.save("token").unwrap();
        store.clear().unwrap();
        assert!(!path.exists());

        // Second clear is a no-op.
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.load(), Err(CredentialError::Malformed(_))));
    }
}
