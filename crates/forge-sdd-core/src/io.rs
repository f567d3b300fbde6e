use crate::error::{ForgeError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Same-directory tempfile for `atomic_write`. On unix it is created with
/// mode 0666 so the kernel applies the umask, like a plain `fs::write`.
fn tempfile_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// A failed write leaves any existing file at `path` untouched and no
/// tempfile behind.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;
    let write_err = |source| ForgeError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = tempfile_in(dir).map_err(write_err)?;
    tmp.write_all(data).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ForgeError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ForgeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ForgeError::Read {
        path: path.to_path_buf(),
        source,
    })
}
