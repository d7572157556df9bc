//! Error types for configuration resolution.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building configuration or resolving
/// required keys.
///
/// Plain lookups never produce these: `get` and `get_or` degrade to the
/// default instead of failing. Only the strict operations and the
/// construction boundary report.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A required key is absent from every source.
    #[error("Configuration key '{key}' not found in {sources}")]
    #[diagnostic(
        code(ubill::config::missing_key),
        help(
            "Set the key in your .env file for local development, or in the platform secrets document for deployments"
        )
    )]
    MissingKey {
        /// The key that was looked up, verbatim.
        key: String,
        /// The sources that were searched, for the error message.
        sources: String,
    },

    /// A key resolved to a value the caller cannot use.
    #[error("Configuration key '{key}' has an invalid value: {reason}")]
    #[diagnostic(
        code(ubill::config::invalid_value),
        help("Fix the value where it is defined; resolved values are strings and are converted at the settings boundary")
    )]
    InvalidValue {
        /// The key whose value failed conversion or validation.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The local `.env` file could not be read or parsed.
    #[error(transparent)]
    #[diagnostic(
        code(ubill::config::dotenv),
        help("Check the .env file referenced by the configuration builder for syntax errors")
    )]
    Dotenv(#[from] ubill_dotenv::Error),

    /// An explicitly configured secrets document could not be loaded.
    #[error(transparent)]
    #[diagnostic(
        code(ubill::config::secrets),
        help(
            "The secrets document path was given explicitly, so load failures are surfaced instead of being treated as an absent store"
        )
    )]
    Secrets(#[from] ubill_secrets::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_key_and_sources() {
        let err = Error::MissingKey {
            key: "DB_PASSWORD".to_string(),
            sources: "platform-secrets, environment".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("DB_PASSWORD"));
        assert!(message.contains("platform-secrets"));
    }

    #[test]
    fn missing_key_has_diagnostic_code_and_help() {
        use miette::Diagnostic;

        let err = Error::MissingKey {
            key: "K".to_string(),
            sources: "environment".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("ubill::config::missing_key".to_string())
        );
        assert!(err.help().is_some());
    }

    #[test]
    fn invalid_value_names_key_and_reason() {
        let err = Error::InvalidValue {
            key: "DB_PORT".to_string(),
            reason: "not a valid port number: fivethousand".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("DB_PORT"));
        assert!(message.contains("fivethousand"));
    }

    #[test]
    fn dotenv_error_converts() {
        let inner = ubill_dotenv::EnvFile::parse("broken line\n").unwrap_err();
        let err: Error = inner.into();
        assert!(matches!(err, Error::Dotenv(_)));
        assert!(err.to_string().contains("line 1"));
    }
}
