//! Temp-file staging for the Base64 pipeline.
//!
//! Every conversion stages exactly one input and one output file inside the
//! converter's temp directory. Names combine a process-wide counter with a
//! UUIDv7 so concurrent calls in one process can never collide, and calls
//! from other processes sharing the directory practically never do.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::ConversionError;

static NEXT_STAGED_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a unique file name: `[prefix]_[counter]_[UUIDv7].[extension]`.
pub fn generate_unique_filename(prefix: &str, extension: &str) -> String {
    let seq = NEXT_STAGED_ID.fetch_add(1, Ordering::Relaxed);
    let uuid = Uuid::now_v7().simple();
    format!(
        "{}_{}_{}.{}",
        prefix,
        seq,
        uuid,
        extension.trim_start_matches('.')
    )
}

/// The converter-owned temp directory.
///
/// Created on first use, and again whenever it has gone missing. The
/// converter never removes it.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    /// Create a staging area rooted at `root`. Nothing touches the disk yet.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The temp directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the temp directory if it is absent.
    ///
    /// Runs on every staging call so a directory removed by a tmp cleaner
    /// is recreated. `create_dir_all` tolerates a concurrent creator.
    pub async fn ensure(&self) -> Result<&Path, ConversionError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(&self.root)
    }

    /// Reserve a unique path for a file the external tool will create.
    ///
    /// The returned handle removes the file if it ever appears.
    pub async fn reserve(
        &self,
        prefix: &str,
        extension: &str,
    ) -> Result<TempFile, ConversionError> {
        let dir = self.ensure().await?;
        Ok(TempFile::new(
            dir.join(generate_unique_filename(prefix, extension)),
        ))
    }

    /// Write `bytes` to a new uniquely named file.
    ///
    /// The file is opened with create-new semantics: an existing file is
    /// never overwritten.
    pub async fn write_new(
        &self,
        prefix: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<TempFile, ConversionError> {
        let dir = self.ensure().await?;
        let path = dir.join(generate_unique_filename(prefix, extension));

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        // From here on the handle owns the file, so a failed write still cleans up.
        let staged = TempFile::new(path);
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(staged)
    }
}

/// A path that owns one staged file for the duration of one conversion.
///
/// Call [`TempFile::remove`] when done. If the handle is dropped without
/// that (e.g. the owning future was dropped), `Drop` removes the file
/// synchronously.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    removed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    /// The staged file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. A file that was never created is not an error.
    pub async fn remove(mut self) {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove temp file"
                );
            }
        }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.removed {
            // Blocking, but only reached when the owning future is dropped early.
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
