use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `AUTOGEN_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `autogen.yaml`
/// 3. Walk upward from `cwd` looking for a `VERSION` file
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
///
/// The result is always absolute: actions run tools with the root as their
/// working directory and hand it to re-invoked dispatchers.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match explicit {
        Some(p) => absolute(&cwd, p),
        None => absolute(&cwd, &resolve_from(&cwd)),
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = cwd.join(path);
    std::fs::canonicalize(&joined).unwrap_or(joined)
}

fn resolve_from(cwd: &Path) -> PathBuf {
    let markers: [(&str, fn(&Path) -> bool); 3] = [
        ("autogen.yaml", Path::is_file),
        ("VERSION", Path::is_file),
        (".git", Path::is_dir),
    ];
    for (marker, check) in markers {
        if let Some(dir) = cwd.ancestors().find(|d| check(&d.join(marker))) {
            return dir.to_path_buf();
        }
    }
    cwd.to_path_buf()
}
