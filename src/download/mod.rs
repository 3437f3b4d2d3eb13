//! Streaming asset downloads
//!
//! Assets are written to disk chunk by chunk rather than buffered whole;
//! catalog assets can run to gigabytes.

use crate::catalog::Record;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Errors that can occur while downloading an asset
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads a record's asset into `dir`, returning the written path
pub async fn download_asset(
    client: &Client,
    record: &Record,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    tokio::fs::create_dir_all(dir).await?;

    let url = record.asset_url.clone();
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|source| DownloadError::Http {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let path = dir.join(asset_filename(record));
    let mut file = tokio::fs::File::create(&path).await?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::Http {
            url: url.clone(),
            source,
        })?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(path)
}

/// Filename for a record's asset
///
/// Taken from the asset URL's last path segment when there is one, with the
/// record title as fallback for slash-terminated or opaque URLs.
fn asset_filename(record: &Record) -> String {
    let from_url = Url::parse(&record.asset_url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.last().map(str::to_string))
            .filter(|segment| !segment.is_empty())
    });

    match from_url {
        Some(name) => sanitize_filename(&name),
        None => format!("{}.bin", sanitize_filename(&record.title)),
    }
}

/// Replaces path separators and other filesystem-hostile characters
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
