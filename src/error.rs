//! Error types shared across the crate.
//!
//! Every failure the application can recover from is represented here. Dataset
//! load failures are logged and swallowed by the browser, optimizer failures are
//! surfaced to the user as an alert, and problem-file errors stop a submission
//! before any request is made.

use std::path::PathBuf;

use thiserror::Error;

/// The fetched document does not have the `{headers, data}` shape the browser needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("row {index} has {found} cells, expected {expected}")]
    RaggedRow {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure while fetching the nutrition dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network response was not ok: {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid dataset: {0}")]
    Invalid(#[from] DatasetError),
}

/// Failure while reading or validating an optimizer problem file.
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed problem file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{section} row {index} is missing \"{field}\".")]
    MissingField {
        section: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Failure during the optimizer round trip.
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("{0}")]
    Http(reqwest::Error),

    #[error("Response status: {0}")]
    Status(u16),

    #[error("Malformed optimizer response: {0}")]
    Decode(reqwest::Error),

    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Failure while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_render_like_the_browser_messages() {
        let load = LoadError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(load.to_string(), "Network response was not ok: Not Found");

        assert_eq!(OptimizeError::Status(500).to_string(), "Response status: 500");
    }

    #[test]
    fn missing_field_names_the_row() {
        let err = ProblemError::MissingField {
            section: "foods",
            index: 2,
            field: "name",
        };
        assert_eq!(err.to_string(), "foods row 2 is missing \"name\".");
    }
}
