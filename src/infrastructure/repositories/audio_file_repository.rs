use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const WRITE_CHECK_FILE: &str = ".write-check.part";

/// Writes generated clips under a base directory.
///
/// Every write goes through a sibling `.part` file that is renamed over the
/// target, so a reader never observes a truncated clip and a failed write
/// leaves the previous clip in place.
#[derive(Debug, Default)]
pub struct AudioFileRepository;

impl AudioFileRepository {
    pub fn new() -> Self {
        Self
    }

    /// Create `dir` and its parents, then check that files can be created in it.
    ///
    /// An existing directory is accepted only if a scratch file can be
    /// written and removed there.
    pub async fn ensure_directory(&self, dir: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(dir).await?;

        let scratch = dir.join(WRITE_CHECK_FILE);
        tokio::fs::write(&scratch, b"").await?;
        tokio::fs::remove_file(&scratch).await
    }

    /// `base/identifier.extension`
    pub fn target_path(&self, base: &Path, identifier: &str, extension: &str) -> PathBuf {
        if extension.is_empty() {
            base.join(identifier)
        } else {
            base.join(format!("{identifier}.{extension}"))
        }
    }

    /// Replace the content of `target` with `bytes`
    pub async fn write(&self, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let part = part_path(target);

        let result = write_then_rename(&part, target, bytes).await;
        if result.is_err() {
            // Best-effort: the part file may not exist yet.
            let _ = tokio::fs::remove_file(&part).await;
        }
        result
    }
}

async fn write_then_rename(part: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(part).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(part, target).await?;
    tracing::debug!(path = %target.display(), bytes = bytes.len(), "File replaced");
    Ok(())
}

fn part_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("clip"));
    name.push(".part");
    target.with_file_name(name)
}
