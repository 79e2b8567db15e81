//! Loading of sheet bytes from local files or HTTP(S) URLs.

mod basic;
mod source;

pub use basic::BasicClient;
pub use source::{SheetSource, discover_sources};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Request, Response};
use tracing::warn;

/// Sends requests for remote sheets; swapped out in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Downloads `url`, failing on non-success status codes.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Reads one sheet source into memory.
#[tracing::instrument(skip_all, fields(source = %source))]
pub async fn load_source<C: HttpClient>(client: &C, source: &SheetSource) -> Result<Vec<u8>> {
    match source {
        SheetSource::File(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        SheetSource::Url(url) => fetch_bytes(client, url)
            .await
            .with_context(|| format!("failed to fetch {url}")),
    }
}

/// Loads every source in order. A source that cannot be read or fetched is
/// logged and skipped, so an empty result means no source data is available.
pub async fn load_sources<C: HttpClient>(
    client: &C,
    sources: &[SheetSource],
) -> Vec<(SheetSource, Vec<u8>)> {
    let mut loaded = Vec::with_capacity(sources.len());

    for source in sources {
        match load_source(client, source).await {
            Ok(bytes) => loaded.push((source.clone(), bytes)),
            Err(e) => warn!(source = %source, error = %format!("{e:#}"), "Source unavailable, skipping"),
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    /// Fails every request with a builder error, never touching the network.
    struct OfflineClient;

    #[async_trait]
    impl HttpClient for OfflineClient {
        async fn execute(&self, _req: Request) -> reqwest::Result<Response> {
            match reqwest::Client::new().get("not a url").build() {
                Err(e) => Err(e),
                Ok(_) => unreachable!("a relative URL never builds"),
            }
        }
    }

    #[tokio::test]
    async fn test_load_source_from_file() {
        let path = env::temp_dir().join("admission_score_model_test_load.csv");
        fs::write(&path, "大学,日语\n東京大学,300\n").unwrap();

        let client = BasicClient::new().unwrap();
        let bytes = load_source(&client, &SheetSource::File(path.clone())).await.unwrap();
        assert!(bytes.starts_with("大学".as_bytes()));

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let client = BasicClient::new().unwrap();
        let source = SheetSource::File(env::temp_dir().join("admission_score_model_missing.csv"));
        assert!(load_source(&client, &source).await.is_err());
    }

    #[tokio::test]
    async fn test_load_sources_skips_failures() {
        let path = env::temp_dir().join("admission_score_model_test_load_many.csv");
        fs::write(&path, "大学,日语\n").unwrap();

        let sources = vec![
            SheetSource::Url("http://example.invalid/2024.csv".to_string()),
            SheetSource::File(path.clone()),
            SheetSource::File(env::temp_dir().join("admission_score_model_gone.csv")),
        ];
        let loaded = load_sources(&OfflineClient, &sources).await;

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, SheetSource::File(path.clone()));

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_sources_all_failing_is_empty() {
        let sources = vec![SheetSource::Url("http://example.invalid/2023.csv".to_string())];
        assert!(load_sources(&OfflineClient, &sources).await.is_empty());
    }
}
