//! Names of the configuration keys the platform reads.
//!
//! Keys are case-sensitive and looked up verbatim in every source. Two of
//! the storage keys carry unconventional capitalization; deployments define
//! them that way, so they are spelled here exactly once and referenced
//! everywhere else.

/// Database engine selector: `"postgres"` or anything else for SQLite.
pub const DB_TYPE: &str = "DB_TYPE";

/// Database host (Postgres only).
pub const DB_HOST: &str = "DB_HOST";

/// Database port (Postgres only). Resolves as text; converted at the
/// settings boundary.
pub const DB_PORT: &str = "DB_PORT";

/// Database user (Postgres only).
pub const DB_USER: &str = "DB_USER";

/// Database password (Postgres only).
pub const DB_PASSWORD: &str = "DB_PASSWORD";

/// Database name (Postgres only).
pub const DB_NAME: &str = "DB_NAME";

/// SQLite database file path.
pub const DB_PATH: &str = "DB_PATH";

/// Object storage access key id. Lower-case in every deployment.
pub const AWS_ACCESS_KEY_ID: &str = "aws_access_key_id";

/// Object storage secret key. Capitalized exactly like this in every
/// deployment.
pub const AWS_SECRET_ACCESS_KEY: &str = "Secret_access_key";

/// Object storage bucket name.
pub const AWS_BUCKET_NAME: &str = "AWS_BUCKET_NAME";

/// Object storage region.
pub const AWS_REGION: &str = "AWS_REGION";

/// API key for the LLM provider.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Model identifier for the LLM provider.
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";

/// Base URL of the orchestrator's REST API.
pub const AIRFLOW_API_URL: &str = "AIRFLOW_API_URL";

/// User for the orchestrator's REST API.
pub const AIRFLOW_API_USER: &str = "AIRFLOW_API_USER";

/// Password for the orchestrator's REST API.
pub const AIRFLOW_API_PASSWORD: &str = "AIRFLOW_API_PASSWORD";

/// Id of the pipeline the platform triggers.
pub const AIRFLOW_DAG_ID: &str = "AIRFLOW_DAG_ID";

/// Deployment environment name, e.g. `"dev"` or `"prod"`.
pub const ENV: &str = "ENV";
