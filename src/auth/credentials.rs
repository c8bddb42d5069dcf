//! Credentials storage and management.
//!
//! This module provides the credential snapshot types and the file-backed
//! manager that stores them in `~/.securesocial/credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".securesocial";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Access/refresh token pair returned by login and refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Snapshot of everything the credential store holds.
///
/// Empty at install, populated after login, fully cleared on logout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Short-lived token presented on each authenticated request.
    pub access_token: Option<String>,
    /// Longer-lived token exchanged for a new pair when the access token expires.
    pub refresh_token: Option<String>,
    /// The authenticated user's ID.
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the credentials have a non-blank access token.
    pub fn has_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    /// Whether nothing at all is stored.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite both tokens with `pair`, keeping the profile fields.
    pub fn set_tokens(&mut self, pair: &TokenPair) {
        self.access_token = Some(pair.access_token.clone());
        self.refresh_token = Some(pair.refresh_token.clone());
    }

    /// Overwrite the profile fields with `user`, keeping the tokens.
    pub fn set_user(&mut self, user: &UserInfo) {
        self.user_id = Some(user.id.clone());
        self.username = Some(user.username.clone());
        self.email = Some(user.email.clone());
    }

    /// The stored profile, only when id, username and email are all present.
    pub fn user_info(&self) -> Option<UserInfo> {
        Some(UserInfo {
            id: self.user_id.clone()?,
            username: self.username.clone()?,
            email: self.email.clone()?,
        })
    }
}

/// Manages credential storage and retrieval on disk.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// A missing file is not an error and yields empty credentials.
    pub fn load(&self) -> io::Result<Credentials> {
        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Credentials::default()),
            Err(e) => return Err(e),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save credentials to the credentials file.
    ///
    /// Writes a sibling temp file and renames it over the target, so readers
    /// observe either the previous snapshot or the new one. Creates the
    /// parent directory if it doesn't exist.
    pub fn save(&self, credentials: &Credentials) -> io::Result<()> {
        let parent = self
            .credentials_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.credentials_path.with_extension("json.tmp");
        {
            let file = create_private(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, credentials)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        restrict_permissions(&tmp_path)?;

        fs::rename(&tmp_path, &self.credentials_path)
    }

    /// Clear all stored credentials.
    ///
    /// Removes the credentials file; succeeds if it didn't exist.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.credentials_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Create (or truncate) `path` with owner-only permissions from the start.
#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    File::create(path)
}

/// `mode` only applies to newly created files; a leftover temp file keeps
/// its old mode until this runs.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
