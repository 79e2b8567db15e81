//! Persistence of the finished model.
//!
//! Supports pretty JSON write/read, timestamped backups of the previous
//! model, and optional upload to S3.

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::Model;

/// Object key used for S3 uploads, `.gz` appended when compressed.
pub const MODEL_KEY: &str = "admission_score_model.json";

/// Writes the model as pretty-printed UTF-8 JSON, creating parent directories.
pub fn write_model(path: &Path, model: &Model) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    debug!(path = %path.display(), "Model written");
    Ok(())
}

/// Reads a model previously written by [`write_model`].
pub fn read_model(path: &Path) -> Result<Model> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let model = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse model {}", path.display()))?;
    Ok(model)
}

/// Copies an existing model at `path` to
/// `<backup_dir>/admission_score_model_<timestamp>.json`.
///
/// Returns `None` when there is nothing to back up.
pub fn backup_existing(path: &Path, backup_dir: &Path, timestamp: &str) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    fs::create_dir_all(backup_dir)
        .with_context(|| format!("failed to create {}", backup_dir.display()))?;
    let target = backup_dir.join(format!("admission_score_model_{timestamp}.json"));
    fs::copy(path, &target)
        .with_context(|| format!("failed to back up {} to {}", path.display(), target.display()))?;

    info!(backup = %target.display(), "Previous model backed up");
    Ok(Some(target))
}

/// Logs the institution count per branch and the model metadata.
pub fn log_summary(model: &Model) {
    info!(
        bunka = model.liberal.len(),
        rika = model.science.len(),
        version = %model.version,
        generated_at = %model.generated_at,
        "Model summary"
    );
}

/// Serializes the model and, if requested, gzip-compresses it.
///
/// Returns the body together with its S3 key.
pub fn encode_for_upload(model: &Model, gzip: bool) -> Result<(Vec<u8>, String)> {
    let body = serde_json::to_vec(model)?;

    if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        Ok((encoder.finish()?, format!("{MODEL_KEY}.gz")))
    } else {
        Ok((body, MODEL_KEY.to_string()))
    }
}

/// Uploads the model to `bucket` with `application/json` content type.
#[tracing::instrument(skip(client, model))]
pub async fn upload_model(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    model: &Model,
    gzip: bool,
) -> Result<()> {
    let (body, key) = encode_for_upload(model, gzip)?;

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(body))
        .content_type("application/json");
    if gzip {
        request = request.content_encoding("gzip");
    }
    request.send().await?;

    info!(bucket, key = %key, "Model uploaded to S3");
    Ok(())
}
