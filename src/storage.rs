//! Local filesystem storage for uploaded documents.
//!
//! Uploads are grouped into per-form buckets under a single root directory
//! and served back at `/files/{bucket}/{object}`. Object names are prefixed
//! with a millisecond timestamp so repeated uploads of the same file never
//! collide.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::types::StorageBucket;

/// Filesystem-backed document store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that `/files` is served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` into `bucket` and return the public URL of the object.
    pub fn upload(
        &self,
        bucket: StorageBucket,
        file_name: &str,
        bytes: &[u8],
    ) -> io::Result<String> {
        let object = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        let dir = self.root.join(bucket.as_str());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(&object), bytes)?;
        Ok(public_url(bucket, &object))
    }
}

/// Public URL under which an uploaded object is served.
pub fn public_url(bucket: StorageBucket, object: &str) -> String {
    format!("/files/{}/{}", bucket.as_str(), object)
}

/// Replace anything that is not a safe file name character.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
