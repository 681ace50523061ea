//! File-backed identity collaborators for the admin CLI.
//!
//! The session document is written by whatever completes the provider's
//! sign-in flow; this module only reads it and deletes it on sign-out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::session::{SessionError, SessionProvider, SignOutOptions};
use super::signout::CredentialStore;

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Reads a JSON session document (`{ "user": { ... } }`) from disk.
#[derive(Debug, Clone)]
pub struct FileSessionProvider {
    path: PathBuf,
}

impl FileSessionProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SessionProvider for FileSessionProvider {
    async fn session(&self) -> Result<Option<serde_json::Value>, SessionError> {
        let raw = read_optional(&self.path).map_err(|e| SessionError::Provider(e.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SessionError::Provider(format!("invalid session file: {e}")))
    }

    async fn sign_out(&self, options: SignOutOptions) -> Result<(), SessionError> {
        remove_if_present(&self.path).map_err(|e| SessionError::Provider(e.to_string()))?;
        tracing::info!(
            path = %self.path.display(),
            redirect = options.redirect,
            callback_url = options.callback_url.as_deref().unwrap_or(""),
            "session ended"
        );
        Ok(())
    }
}

// =============================================================================
// CREDENTIAL CACHE
// =============================================================================

/// Caches the bearer token in a plain file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(read_optional(&self.path)?
            .map(|raw| raw.trim().to_owned())
            .filter(|token| !token.is_empty()))
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        remove_if_present(&self.path)
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
