//! File and directory copy primitives used to lay toolkit content into a
//! project.
//!
//! Each file is written through a same-directory tempfile and renamed into
//! place, so a failure never leaves a half-written destination. Directory
//! copies are not transactional: when a file fails, everything copied before
//! it stays on disk and the caller decides whether to clean up.

use crate::error::{ForgeError, Result};
use crate::io;
use crate::transform;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How a single file is carried over. Built per copy, consumed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Rewrite toolkit-relative paths, then validate the result.
    pub transform: bool,
    /// Prepend the provenance header.
    pub add_header: bool,
    /// Replace the destination's final extension, e.g. `.prompt.md`.
    pub new_extension: Option<String>,
    /// Origin recorded in the header; defaults to the source path.
    pub header_source: Option<String>,
}

impl CopyOptions {
    /// Byte-for-byte copy.
    pub fn verbatim() -> Self {
        Self::default()
    }

    pub fn transformed() -> Self {
        Self {
            transform: true,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, source: impl Into<String>) -> Self {
        self.add_header = true;
        self.header_source = Some(source.into());
        self
    }

    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.new_extension = Some(ext.into());
        self
    }

    fn rewrites_content(&self) -> bool {
        self.transform || self.add_header
    }
}

/// Swap the final extension segment of `path`'s file name for `new_ext`.
///
/// `foo.md` + `.prompt.md` gives `foo.prompt.md`. A name without an
/// extension gets `new_ext` appended. Dotfiles such as `.gitignore` count as
/// having no extension, so they keep their name: `.gitignore.prompt.md`.
pub fn with_new_extension(path: &Path, new_ext: &str) -> PathBuf {
    let ext = if new_ext.starts_with('.') {
        new_ext.to_string()
    } else {
        format!(".{new_ext}")
    };
    let stem = match (path.file_stem(), path.extension()) {
        (Some(stem), Some(_)) => stem.to_os_string(),
        _ => path.file_name().map(|n| n.to_os_string()).unwrap_or_default(),
    };
    let mut name = stem;
    name.push(ext);
    path.with_file_name(name)
}

/// Copy one file from `source` to `destination`.
///
/// Returns the path actually written, which differs from `destination` when
/// `new_extension` is set.
pub fn copy_file(source: &Path, destination: &Path, options: &CopyOptions) -> Result<PathBuf> {
    let target = match &options.new_extension {
        Some(ext) => with_new_extension(destination, ext),
        None => destination.to_path_buf(),
    };

    if let Some(parent) = target.parent() {
        io::ensure_dir(parent)?;
    }

    if !options.rewrites_content() {
        let bytes = io::read_bytes(source)?;
        io::atomic_write(&target, &bytes)?;
        tracing::debug!(source = %source.display(), target = %target.display(), "copied");
        return Ok(target);
    }

    let mut content = io::read_text(source)?;

    if options.transform {
        let counts = transform::stats(&content);
        content = transform::transform(&content);
        transform::validate(&content)?;
        tracing::debug!(
            source = %source.display(),
            rewritten = counts.total(),
            stats = ?counts.iter().map(|c| (c.rule, c.count)).collect::<Vec<_>>(),
            "transformed paths"
        );
    }

    if options.add_header {
        let origin = match &options.header_source {
            Some(origin) => origin.clone(),
            None => source.display().to_string(),
        };
        content = transform::add_header(&content, &origin);
    }

    io::atomic_write(&target, content.as_bytes())?;
    tracing::debug!(source = %source.display(), target = %target.display(), "copied");
    Ok(target)
}

/// Mirror the tree under `source` into `destination`, copying every file with
/// `options`. Stops at the first failure without rolling back.
pub fn copy_directory(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> Result<Vec<PathBuf>> {
    io::ensure_dir(destination)?;

    let mut written = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source_err| ForgeError::Walk {
            path: source_err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source.to_path_buf()),
            source: source_err,
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| Path::new(entry.file_name()));
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            io::ensure_dir(&target)?;
        } else {
            written.push(copy_file(entry.path(), &target, options)?);
        }
    }

    Ok(written)
}
