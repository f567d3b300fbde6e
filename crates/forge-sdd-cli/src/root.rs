use forge_sdd_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the forge-sdd project root.
///
/// Priority:
/// 1. `--root` flag / `FORGE_SDD_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.forge-sdd/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = current_dir();
    find_project_root(&cwd).unwrap_or(cwd)
}

/// Directory `init` creates the new project in: `--root` if given, else `cwd`.
pub fn init_parent(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(current_dir)
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(paths::FORGE_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_forge_dir_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".forge-sdd")).unwrap();
        let subdir = dir.path().join("docs/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_project_root(&subdir).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_forge_dir_finds_nothing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_project_root(dir.path()), None);
    }

    #[test]
    fn init_parent_prefers_explicit() {
        let dir = TempDir::new().unwrap();
        assert_eq!(init_parent(Some(dir.path())), dir.path());
    }
}
