//! TOML-document secret store.

use crate::{Error, Result, SecretStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the secrets document location.
pub const SECRETS_PATH_VAR: &str = "UBILL_SECRETS_PATH";

/// Document path relative to the working directory.
const LOCAL_SECRETS_PATH: &str = ".ubill/secrets.toml";

/// Document path relative to the user config directory.
const USER_SECRETS_PATH: &str = "ubill/secrets.toml";

/// Secret store backed by the TOML key/value document the hosting platform
/// mounts.
///
/// The document is parsed once at load. Top-level scalar values are
/// normalized to strings (integers, floats, booleans, and datetimes render
/// to their literal form); arrays and tables are not addressable as
/// configuration values and are skipped. Keys keep their exact spelling.
#[derive(Debug, Clone)]
pub struct TomlSecretStore {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl TomlSecretStore {
    /// Load a secrets document from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Toml`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            source,
            path: path.to_path_buf(),
        })?;

        let table: toml::Table = content.parse().map_err(|source| Error::Toml {
            source: Box::new(source),
            path: path.to_path_buf(),
        })?;

        let mut values = HashMap::with_capacity(table.len());
        for (key, value) in table {
            match scalar_to_string(&value) {
                Some(rendered) => {
                    values.insert(key, rendered);
                }
                None => {
                    tracing::debug!(key = %key, "Skipping non-scalar secrets entry");
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            keys = values.len(),
            "Loaded secrets document"
        );

        Ok(Self {
            values,
            path: path.to_path_buf(),
        })
    }

    /// Find and load the platform secrets document, if one is present.
    ///
    /// Candidates, in order: the [`SECRETS_PATH_VAR`] override,
    /// `.ubill/secrets.toml` under the working directory, then
    /// `ubill/secrets.toml` under the user config directory.
    ///
    /// Returns `None` when no candidate exists - the process is simply not
    /// running under the hosting platform. An unreadable or malformed
    /// document is logged and also treated as absent, so discovery never
    /// fails the caller.
    #[must_use]
    pub fn discover() -> Option<Self> {
        for candidate in Self::candidate_paths() {
            if !candidate.is_file() {
                continue;
            }
            match Self::load(&candidate) {
                Ok(store) => return Some(store),
                Err(err) => {
                    tracing::warn!(
                        path = %candidate.display(),
                        error = %err,
                        "Ignoring unusable secrets document"
                    );
                    return None;
                }
            }
        }

        tracing::debug!("No secrets document found; platform store absent");
        None
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        if let Ok(overridden) = std::env::var(SECRETS_PATH_VAR) {
            candidates.push(PathBuf::from(overridden));
        }
        candidates.push(PathBuf::from(LOCAL_SECRETS_PATH));
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(USER_SECRETS_PATH));
        }
        candidates
    }

    /// Path the document was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of usable (scalar) keys in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the document held no usable keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SecretStore for TomlSecretStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn provider_name(&self) -> &'static str {
        "platform-secrets"
    }
}

/// Render a scalar TOML value to the single string representation the
/// configuration layer uses. Non-scalars yield `None`.
fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(dt) => Some(dt.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}
