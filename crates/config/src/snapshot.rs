//! The configuration snapshot and its ordered-fallback resolver.
//!
//! A [`Config`] is built once at process entry and passed by reference into
//! every component that needs it. Construction is where all I/O happens:
//! the platform secret store is loaded (or found absent), the process
//! environment is captured, and a local `.env` file fills any gaps. After
//! that, every lookup is a pure read over the snapshot - repeated calls
//! with the same key return the same result, and nothing mutates.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use ubill_secrets::{SecretStore, TomlSecretStore};

/// An immutable configuration snapshot with ordered-fallback lookup.
///
/// Resolution order is fixed and total: the platform secret store first
/// (skipped when the process is not running under the platform), then the
/// environment snapshot, then the caller's default. A missing key is never
/// an error for [`get`](Self::get) and [`get_or`](Self::get_or); callers
/// that cannot run without a key use [`require`](Self::require).
///
/// # Example
///
/// ```
/// use ubill_config::Config;
///
/// let config = Config::builder()
///     .process_env([("DB_PORT".to_string(), "5432".to_string())])
///     .build()?;
///
/// assert_eq!(config.get("DB_PORT"), Some("5432"));
/// assert_eq!(config.get_or("OPENAI_MODEL", "gpt-4o-mini"), "gpt-4o-mini");
/// assert!(config.require("DB_PASSWORD").is_err());
/// # Ok::<(), ubill_config::Error>(())
/// ```
pub struct Config {
    store: Option<Box<dyn SecretStore>>,
    env: HashMap<String, String>,
}

impl Config {
    /// Start building a snapshot.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build the conventional snapshot for process entry: discovered
    /// platform secrets, the real process environment, and a `.env` file in
    /// the working directory when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a `.env` file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::builder()
            .discover_secrets()
            .dotenv_if_present(".env")
            .build()
    }

    /// Resolve a key: secret store first, then the environment snapshot.
    ///
    /// Returns `None` when the key is absent from both - never an error.
    /// Keys are case-sensitive and looked up verbatim.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(store) = &self.store
            && let Some(value) = store.get(key)
        {
            return Some(value);
        }
        self.env.get(key).map(String::as_str)
    }

    /// Resolve a key, degrading to `default` when absent from every source.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Strict variant: resolve a key the application cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] naming the key and the sources that
    /// were searched.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            sources: self.sources_description(),
        })
    }

    /// Whether a platform secret store was attached.
    #[must_use]
    pub fn has_secret_store(&self) -> bool {
        self.store.is_some()
    }

    fn sources_description(&self) -> String {
        match &self.store {
            Some(store) => format!("{}, environment", store.provider_name()),
            None => "environment".to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("env_keys", &self.env.len())
            .field(
                "secret_store",
                &self.store.as_ref().map(|s| s.provider_name()),
            )
            .finish()
    }
}

/// Builder for [`Config`].
///
/// Defaults: the environment snapshot is captured from the real process
/// environment, no `.env` file is read, and no secret store is attached.
#[derive(Default)]
pub struct ConfigBuilder {
    store: Option<Box<dyn SecretStore>>,
    secrets_path: Option<PathBuf>,
    discover_secrets: bool,
    env: Option<HashMap<String, String>>,
    dotenv_path: Option<PathBuf>,
    dotenv_optional: bool,
}

impl ConfigBuilder {
    /// Attach a secret store directly. Test code passes an in-memory fake
    /// here.
    #[must_use]
    pub fn secret_store(mut self, store: impl SecretStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Load the secrets document from an explicit path at build time.
    ///
    /// Unlike discovery, an unreadable or malformed document at a pinned
    /// path is surfaced as an error from [`build`](Self::build).
    #[must_use]
    pub fn secrets_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = Some(path.into());
        self
    }

    /// Look for the platform secrets document at build time; an absent or
    /// unusable document means no store, not an error.
    #[must_use]
    pub fn discover_secrets(mut self) -> Self {
        self.discover_secrets = true;
        self
    }

    /// Use the given map as the environment snapshot instead of capturing
    /// the real process environment.
    #[must_use]
    pub fn process_env(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = Some(env.into_iter().collect());
        self
    }

    /// Merge a `.env` file into the environment snapshot. Keys already
    /// present in the snapshot win. A missing file is an error.
    #[must_use]
    pub fn dotenv(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self.dotenv_optional = false;
        self
    }

    /// Like [`dotenv`](Self::dotenv), but a missing file is skipped - the
    /// conventional behavior for the local development file.
    #[must_use]
    pub fn dotenv_if_present(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self.dotenv_optional = true;
        self
    }

    /// Build the snapshot. All source I/O happens here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file is required but unreadable or
    /// malformed, or if an explicitly pinned secrets document fails to
    /// load.
    pub fn build(self) -> Result<Config> {
        let Self {
            store,
            secrets_path,
            discover_secrets,
            env,
            dotenv_path,
            dotenv_optional,
        } = self;

        let mut env = env.unwrap_or_else(|| std::env::vars().collect());

        if let Some(path) = &dotenv_path {
            if path.is_file() || !dotenv_optional {
                let file = ubill_dotenv::EnvFile::load(path)?;
                let added = file.merge_into(&mut env);
                tracing::debug!(
                    path = %path.display(),
                    added,
                    "Merged .env file into environment snapshot"
                );
            } else {
                tracing::debug!(path = %path.display(), "No .env file; skipping");
            }
        }

        let store: Option<Box<dyn SecretStore>> = match (store, secrets_path) {
            (Some(store), _) => Some(store),
            (None, Some(path)) => Some(Box::new(TomlSecretStore::load(path)?)),
            (None, None) if discover_secrets => TomlSecretStore::discover()
                .map(|store| Box::new(store) as Box<dyn SecretStore>),
            (None, None) => None,
        };

        tracing::debug!(
            env_keys = env.len(),
            secret_store = store.as_ref().map(|s| s.provider_name()),
            "Built configuration snapshot"
        );

        Ok(Config { store, env })
    }
}
