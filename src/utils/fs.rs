//! Filesystem helpers

use crate::{Error, Result};
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `contents` to `path` as UTF-8.
///
/// Missing parent directories are created first. Byte sequences that are not
/// valid UTF-8 are dropped, not replaced. The file is truncated before writing
/// and the write is not atomic.
///
/// Refuses to write when `path` is a symlink.
pub fn safe_write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tracing::debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    if path.is_symlink() {
        tracing::warn!("Refusing to write through symlink {}", path.display());
        return Err(Error::unsafe_path(path.display().to_string()));
    }

    let text = strip_invalid_utf8(contents.as_ref());

    let mut file = fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Decode `bytes` as UTF-8, silently dropping invalid sequences
pub fn strip_invalid_utf8(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}
