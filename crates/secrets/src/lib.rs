//! Platform secret store access for ubill.
//!
//! In production the hosting platform mounts a structured TOML document of
//! key/value secrets; locally no such document exists and configuration
//! comes from the process environment instead. This crate provides the
//! [`SecretStore`] seam the configuration layer looks through, the
//! TOML-document store behind it, and a redacting wrapper for values that
//! must not leak into logs.
//!
//! Stores are loaded once, ahead of any lookup; lookups themselves are
//! read-only, infallible, and safe for concurrent readers.
//!
//! ```no_run
//! use ubill_secrets::{SecretStore, TomlSecretStore};
//!
//! // `None` when not running under the hosting platform.
//! if let Some(store) = TomlSecretStore::discover()
//!     && let Some(key) = store.get("OPENAI_API_KEY")
//! {
//!     tracing::debug!(len = key.len(), "provider key available");
//! }
//! ```

mod value;

pub mod stores;

pub use stores::TomlSecretStore;
pub use value::SecureSecret;

use std::path::PathBuf;

/// Errors that can occur while loading a secret store.
///
/// These surface only from explicit-path loads; discovery treats every
/// failure as "store absent" and logs it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while reading the secrets document.
    #[error("Failed to read secrets document {path}: {source}")]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path that was being read.
        path: PathBuf,
    },

    /// The secrets document is not valid TOML.
    #[error("Malformed secrets document {path}: {source}")]
    Toml {
        /// The underlying TOML parse error.
        #[source]
        source: Box<toml::de::Error>,
        /// Path that was being parsed.
        path: PathBuf,
    },
}

/// Result type for secret store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A read-only secret store, loaded once and queried many times.
///
/// Implementors normalize every value to a string at load time so the
/// configuration layer sees one representation per key regardless of how
/// the backing document typed it. Keys are case-sensitive and looked up
/// verbatim.
pub trait SecretStore: Send + Sync {
    /// Look up a secret by key. Absence is not an error.
    fn get(&self, key: &str) -> Option<&str>;

    /// Identifier for this store, used in logs and missing-key diagnostics.
    fn provider_name(&self) -> &'static str;

    /// Whether the store has a value for `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
