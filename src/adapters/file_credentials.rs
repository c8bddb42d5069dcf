//! File-based credential store adapter.
//!
//! Wraps [`CredentialsManager`] and implements [`CredentialStore`]. File I/O
//! runs on the blocking pool so store calls never stall the async workers.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::auth::credentials::{Credentials, CredentialsManager, TokenPair, UserInfo};
use crate::traits::{CredentialStore, CredentialsError};

/// File-based credential store.
///
/// Credentials are stored in `~/.securesocial/credentials.json` unless a path
/// is given. Read-modify-write cycles are serialized so two concurrent
/// `save_*` calls cannot interleave and drop each other's fields.
///
/// # Example
///
/// ```ignore
/// use securesocial::adapters::FileCredentialStore;
/// use securesocial::traits::CredentialStore;
///
/// let store = FileCredentialStore::new()?;
/// if let Some(token) = store.get_access_token().await? {
///     println!("signed in");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    manager: CredentialsManager,
    write_lock: Arc<Mutex<()>>,
}

impl FileCredentialStore {
    /// Create a store at the default location.
    ///
    /// # Returns
    /// The store, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsManager::new()
            .map(Self::from_manager)
            .ok_or_else(|| {
                CredentialsError::Other("Failed to determine home directory".to_string())
            })
    }

    /// Create a store backed by an explicit file.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self::from_manager(CredentialsManager::with_path(path.as_ref()))
    }

    fn from_manager(manager: CredentialsManager) -> Self {
        Self {
            manager,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        self.manager.credentials_path()
    }

    async fn read(&self) -> Result<Credentials, CredentialsError> {
        self.load_raw()
            .await?
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))
    }

    async fn load_raw(&self) -> Result<io::Result<Credentials>, CredentialsError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.load())
            .await
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))
    }

    /// Snapshot to update before a write. An unparseable file is replaced
    /// rather than blocking every future save.
    async fn read_for_update(&self) -> Result<Credentials, CredentialsError> {
        match self.load_raw().await? {
            Ok(creds) => Ok(creds),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(
                    path = %self.credentials_path().display(),
                    error = %e,
                    "Credentials file is corrupt, overwriting"
                );
                Ok(Credentials::default())
            }
            Err(e) => Err(CredentialsError::LoadFailed(e.to_string())),
        }
    }

    async fn write(&self, creds: Credentials) -> Result<(), CredentialsError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.save(&creds))
            .await
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }

    /// Apply `update` to the stored snapshot under the write lock.
    async fn modify<F>(&self, update: F) -> Result<(), CredentialsError>
    where
        F: FnOnce(&mut Credentials) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut creds = self.read_for_update().await?;
        update(&mut creds);
        self.write(creds).await
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credentials, CredentialsError> {
        self.read().await
    }

    async fn save_tokens(&self, pair: &TokenPair) -> Result<(), CredentialsError> {
        self.modify(|creds| creds.set_tokens(pair)).await
    }

    async fn save_user(&self, user: &UserInfo) -> Result<(), CredentialsError> {
        self.modify(|creds| creds.set_user(user)).await
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        let _guard = self.write_lock.lock().await;
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.clear())
            .await
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))?
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }
}
