//! Fetches the nutrition dataset once at startup.
//!
//! The source is either an `http(s)://` URL or a local path (a `file://`
//! prefix is accepted). The fetch runs as a bubbletea command; its outcome
//! comes back to the browser as [`DatasetLoadedMsg`] or
//! [`DatasetLoadFailedMsg`]. Failures are never retried.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bubbletea_rs::{Cmd, Msg};
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::LoadError;

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl From<&str> for DataSource {
    /// `http://` and `https://` strings are URLs; anything else is a path,
    /// with an optional `file://` prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::path::PathBuf;
    /// use nutrition_tui::loader::DataSource;
    ///
    /// assert!(matches!(DataSource::from("https://host/data.json"), DataSource::Url(_)));
    /// assert_eq!(
    ///     DataSource::from("file:///tmp/data.json"),
    ///     DataSource::File(PathBuf::from("/tmp/data.json"))
    /// );
    /// ```
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Self::Url(s.to_string())
        } else {
            Self::File(PathBuf::from(s.strip_prefix("file://").unwrap_or(s)))
        }
    }
}

impl FromStr for DataSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Delivered when the dataset was fetched and parsed.
#[derive(Debug)]
pub struct DatasetLoadedMsg(pub Dataset);

/// Delivered when the fetch failed; the browser logs it and stays empty.
#[derive(Debug)]
pub struct DatasetLoadFailedMsg(pub LoadError);

/// Fetches and parses the dataset from `source`.
pub async fn fetch_dataset(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<Dataset, LoadError> {
    info!("Fetching dataset from {source}");

    let bytes = match source {
        DataSource::Url(url) => {
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("").to_string(),
                });
            }
            response.bytes().await?.to_vec()
        }
        DataSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };
    debug!("Read {} bytes of dataset", bytes.len());

    Dataset::from_json(&bytes)
}

/// Returns the command that performs the startup fetch.
pub fn load_cmd(client: reqwest::Client, source: DataSource) -> Cmd {
    Box::pin(async move {
        let msg: Msg = match fetch_dataset(&client, &source).await {
            Ok(dataset) => Box::new(DatasetLoadedMsg(dataset)),
            Err(err) => Box::new(DatasetLoadFailedMsg(err)),
        };
        Some(msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_sources() {
        assert_eq!(
            "https://example.com/data.json".parse::<DataSource>().unwrap(),
            DataSource::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            "static/nutrition_data.json".parse::<DataSource>().unwrap(),
            DataSource::File(PathBuf::from("static/nutrition_data.json"))
        );
        assert_eq!(
            "file:///tmp/data.json".parse::<DataSource>().unwrap(),
            DataSource::File(PathBuf::from("/tmp/data.json"))
        );
    }

    #[tokio::test]
    async fn reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"headers": ["Food"], "data": [["Egg"], ["Rice"]]}}"#).unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let dataset = fetch_dataset(&reqwest::Client::new(), &source).await.unwrap();

        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.json"));
        let err = fetch_dataset(&reqwest::Client::new(), &source)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn load_cmd_reports_failure_as_message() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.json"));
        let msg = load_cmd(reqwest::Client::new(), source)
            .await
            .expect("load message");

        assert!(msg.downcast_ref::<DatasetLoadFailedMsg>().is_some());
    }
}
