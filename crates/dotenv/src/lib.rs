//! `.env` file parsing for the ubill platform.
//!
//! Local development reads configuration from a `key=value`-per-line file
//! (conventionally `.env`, never committed) that seeds the process
//! environment at startup. This crate parses that file into an ordered
//! entry list and merges it into an environment map where values already
//! present in the map win over values from the file.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use ubill_dotenv::EnvFile;
//!
//! let file = EnvFile::parse("DB_HOST=localhost\nDB_PORT=5432\n")?;
//!
//! let mut env = HashMap::from([("DB_HOST".to_string(), "db.internal".to_string())]);
//! let added = file.merge_into(&mut env);
//!
//! assert_eq!(added, 1); // DB_HOST was already set and is kept
//! assert_eq!(env.get("DB_HOST").map(String::as_str), Some("db.internal"));
//! assert_eq!(env.get("DB_PORT").map(String::as_str), Some("5432"));
//! # Ok::<(), ubill_dotenv::Error>(())
//! ```
//!
//! # Grammar
//!
//! - Blank lines and `#` comment lines are skipped.
//! - An optional leading `export ` prefix is stripped.
//! - The first `=` separates key from value; both are trimmed.
//! - Double-quoted values process the escapes `\n`, `\t`, `\r`, `\\`, `\"`.
//!   Single-quoted values are taken literally. Unquoted values are taken
//!   literally, including any `#`.
//! - No variable interpolation. Duplicate keys: the last occurrence wins.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Errors that can occur while reading a `.env` file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A non-blank, non-comment line that does not contain `=`.
    #[error("Malformed line {line} in env file: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// IO error while reading the file.
    #[error("Failed to read env file {path}: {source}")]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path that was being read.
        path: PathBuf,
    },
}

/// Result type for env file operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A parsed `.env` file: an ordered list of `key=value` entries.
///
/// Entries keep file order so that later occurrences of a key shadow
/// earlier ones, the way shells and python-dotenv treat repeated
/// assignments.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Parse env file content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for a non-blank, non-comment line without
    /// `=` or with an empty key.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").map_or(line, str::trim_start);

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::Parse {
                    line: line_no,
                    reason: "expected key=value".to_string(),
                });
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(Error::Parse {
                    line: line_no,
                    reason: "empty key".to_string(),
                });
            }

            entries.push((key.to_string(), parse_value(value.trim())));
        }

        Ok(Self { entries })
    }

    /// Read and parse a `.env` file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Parse`] for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            source,
            path: path.to_path_buf(),
        })?;

        let parsed = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            entries = parsed.entries.len(),
            "Loaded env file"
        );
        Ok(parsed)
    }

    /// Look up a key, honoring last-occurrence-wins for duplicates.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file contained no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge entries into an environment map without overwriting keys the
    /// map already has: the real process environment wins over `.env`.
    ///
    /// Returns the number of keys added from the file.
    pub fn merge_into(&self, env: &mut HashMap<String, String>) -> usize {
        let preexisting: HashSet<String> = env.keys().cloned().collect();
        let mut added = 0;

        for (key, value) in &self.entries {
            if preexisting.contains(key) {
                tracing::debug!(key = %key, "Keeping process environment value over .env");
                continue;
            }
            if env.insert(key.clone(), value.clone()).is_none() {
                added += 1;
            }
        }

        added
    }
}

/// Strip quoting from a raw value.
fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 {
        if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            return unescape_double_quoted(inner);
        }
        if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
            return inner.to_string();
        }
    }
    raw.to_string()
}

/// Process the escapes a double-quoted value supports.
fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            // Unknown escape: keep both characters verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_entries_in_order() {
        let file = EnvFile::parse("A=1\nB=2\nC=3\n").unwrap();
        let entries: Vec<_> = file.entries().collect();
        assert_eq!(entries, vec![("A", "1"), ("B", "2"), ("C", "3")]);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let file = EnvFile::parse("\n# comment\n  # indented comment\nKEY=value\n\n").unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file.get("KEY"), Some("value"));
    }

    #[test]
    fn strips_export_prefix() {
        let file = EnvFile::parse("export DB_HOST=localhost\n").unwrap();
        assert_eq!(file.get("DB_HOST"), Some("localhost"));
    }

    #[test]
    fn trims_whitespace_around_key_and_value() {
        let file = EnvFile::parse("  DB_PORT =  5432  \n").unwrap();
        assert_eq!(file.get("DB_PORT"), Some("5432"));
    }

    #[test]
    fn double_quoted_values_process_escapes() {
        let file = EnvFile::parse(r#"MSG="line1\nline2\t\"quoted\"""#).unwrap();
        assert_eq!(file.get("MSG"), Some("line1\nline2\t\"quoted\""));
    }

    #[test]
    fn single_quoted_values_are_literal() {
        let file = EnvFile::parse(r"PASS='p\nss#word'").unwrap();
        assert_eq!(file.get("PASS"), Some(r"p\nss#word"));
    }

    #[test]
    fn unquoted_value_keeps_hash() {
        let file = EnvFile::parse("TOKEN=abc#def\n").unwrap();
        assert_eq!(file.get("TOKEN"), Some("abc#def"));
    }

    #[test]
    fn value_may_contain_equals() {
        let file = EnvFile::parse("DB_URL=postgres://u:p@h/db?sslmode=require\n").unwrap();
        assert_eq!(
            file.get("DB_URL"),
            Some("postgres://u:p@h/db?sslmode=require")
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        let file = EnvFile::parse("OPENAI_API_KEY=\n").unwrap();
        assert_eq!(file.get("OPENAI_API_KEY"), Some(""));
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let file = EnvFile::parse("K=first\nK=second\n").unwrap();
        assert_eq!(file.get("K"), Some("second"));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let file = EnvFile::parse("aws_access_key_id=lower\nAWS_ACCESS_KEY_ID=upper\n").unwrap();
        assert_eq!(file.get("aws_access_key_id"), Some("lower"));
        assert_eq!(file.get("AWS_ACCESS_KEY_ID"), Some("upper"));
    }

    #[test]
    fn line_without_equals_is_an_error() {
        let err = EnvFile::parse("A=1\nnot a pair\n").unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_key_is_an_error() {
        assert!(matches!(
            EnvFile::parse("=value\n"),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn merge_does_not_overwrite_existing_keys() {
        let file = EnvFile::parse("DB_HOST=localhost\nDB_NAME=billing\n").unwrap();
        let mut env = HashMap::from([("DB_HOST".to_string(), "db.internal".to_string())]);

        let added = file.merge_into(&mut env);

        assert_eq!(added, 1);
        assert_eq!(env.get("DB_HOST").map(String::as_str), Some("db.internal"));
        assert_eq!(env.get("DB_NAME").map(String::as_str), Some("billing"));
    }

    #[test]
    fn merge_duplicate_in_file_last_wins() {
        let file = EnvFile::parse("K=first\nK=second\n").unwrap();
        let mut env = HashMap::new();

        let added = file.merge_into(&mut env);

        assert_eq!(added, 1);
        assert_eq!(env.get("K").map(String::as_str), Some("second"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "DB_TYPE=postgres\n").unwrap();

        let file = EnvFile::load(&path).unwrap();
        assert_eq!(file.get("DB_TYPE"), Some("postgres"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnvFile::load(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
