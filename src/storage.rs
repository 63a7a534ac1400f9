//! Local disk storage for uploaded videos.
//!
//! Uploads are copied from any [`AsyncRead`] through a fixed-size buffer, so
//! memory use depends on the configured chunk size and never on the size of
//! the upload. Nothing in here knows about HTTP.

use crate::{AppError, Config, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt, BufReader};
use uuid::Uuid;

const MAX_STEM_LEN: usize = 120;

pub const NO_FILE_MESSAGE: &str = "No video file provided";

/// A file that finished streaming to disk.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Name of the file inside the upload directory
    pub filename: String,
    pub bytes_written: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    chunk_size: usize,
    sanitize: bool,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, chunk_size: usize, sanitize: bool) -> Self {
        Self {
            dir: dir.into(),
            chunk_size: chunk_size.max(1),
            sanitize,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.upload_dir,
            config.upload_chunk_size_bytes(),
            config.sanitize_filenames,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Turn a client-supplied filename into the name used on disk.
    ///
    /// Without sanitizing, the name is used verbatim. That includes names
    /// with path separators, which can land outside the upload directory.
    pub fn resolve(&self, filename: &str) -> Result<String> {
        if filename.is_empty() {
            return Err(AppError::BadRequest(NO_FILE_MESSAGE.to_string()));
        }

        if !self.sanitize {
            return Ok(filename.to_string());
        }

        Ok(sanitized_filename(filename))
    }

    /// Stream `reader` into `<dir>/<filename>`, replacing any existing file.
    ///
    /// The destination handle lives only inside this future: it is closed on
    /// success, on a read or write error, and when the future is dropped
    /// half way. Partially written files are left on disk.
    pub async fn store<R>(&self, filename: &str, reader: R) -> Result<StoredUpload>
    where
        R: AsyncRead + Unpin,
    {
        let filename = self.resolve(filename)?;
        let path = self.dir.join(&filename);

        let mut file = File::create(&path).await?;
        let mut reader = BufReader::with_capacity(self.chunk_size, reader);

        // Flush even when the copy fails so no write is still in flight
        // against the file once this returns.
        let copied = tokio::io::copy_buf(&mut reader, &mut file).await;
        let flushed = file.flush().await;
        let bytes_written = copied?;
        flushed?;

        tracing::debug!("Wrote {} bytes to {:?}", bytes_written, path);

        Ok(StoredUpload {
            filename,
            bytes_written,
            path,
        })
    }
}

fn sanitize_stem(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut last_was_sep = false;

    for ch in trimmed.chars() {
        let is_allowed = ch.is_ascii_alphanumeric() || ch == ' ' || ch == '-' || ch == '_';
        let mapped = if is_allowed { ch } else { '-' };

        let is_sep = mapped == ' ' || mapped == '-' || mapped == '_';
        if is_sep {
            if last_was_sep {
                continue;
            }
            last_was_sep = true;
        } else {
            last_was_sep = false;
        }
        out.push(mapped);
    }

    out.trim_matches([' ', '-', '_']).to_string()
}

fn extract_ext(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn sanitized_filename(filename: &str) -> String {
    // Only the last path component counts; directories are dropped.
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let ext = extract_ext(base);
    let stem = Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let mut safe_stem = sanitize_stem(stem);
    if safe_stem.len() > MAX_STEM_LEN {
        safe_stem.truncate(MAX_STEM_LEN);
        safe_stem = safe_stem.trim_matches([' ', '-', '_']).to_string();
    }

    if safe_stem.is_empty() {
        safe_stem = Uuid::new_v4().to_string()[..8].to_string();
    }

    if ext.is_empty() {
        safe_stem
    } else {
        format!("{}.{}", safe_stem, ext)
    }
}
