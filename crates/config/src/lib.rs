//! Configuration resolution for the ubill platform.
//!
//! Every deployment question the platform asks - which database, which
//! model, which bucket - goes through one ordered fallback: the platform
//! secret store when the process runs under the hosting platform, then the
//! process environment (seeded from a local `.env` file in development),
//! then a caller-supplied default.
//!
//! The fallback is snapshotted into a [`Config`] once at process entry and
//! passed by reference from there; no component queries the environment
//! ambiently. Lookups never fail for a missing key - absence degrades to
//! the default - while [`Config::require`] and [`Settings::from_config`]
//! give the strict behavior for keys the application cannot run without.
//!
//! # Example
//!
//! ```no_run
//! use ubill_config::{Config, Settings};
//!
//! let config = Config::load()?;
//! let settings = Settings::from_config(&config)?;
//!
//! tracing::info!(model = %settings.llm.model, "starting up");
//! # Ok::<(), ubill_config::Error>(())
//! ```

mod error;
pub mod keys;
mod settings;
mod snapshot;

pub use error::{Error, Result};
pub use settings::{
    AirflowSettings, DatabaseKind, DatabaseSettings, LlmSettings, Settings, StorageSettings,
    DEFAULT_AIRFLOW_API_URL, DEFAULT_DAG_ID, DEFAULT_OPENAI_MODEL, DEFAULT_RUN_ENV,
    DEFAULT_SQLITE_PATH,
};
pub use snapshot::{Config, ConfigBuilder};

// The store seam and the redacting wrapper appear in this crate's API;
// re-exported so most callers depend on one crate.
pub use ubill_secrets::{SecretStore, SecureSecret, TomlSecretStore};
