use crate::error::{AutogenError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Remove `path` if it exists and create it empty. Nothing from a previous
/// run survives.
pub fn fresh_dir(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Copy a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(AutogenError::MissingSource(src.display().to_string()));
    }
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(src, dst)?;
    Ok(())
}

/// Recursively copy the directory `src` to `dst`. `dst` must not exist yet.
///
/// Symlinks are followed, so a linked directory is staged as real content.
/// Failures name the source path that could not be copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(AutogenError::MissingSource(src.display().to_string()));
    }
    if dst.exists() {
        return Err(AutogenError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", dst.display()),
        )));
    }
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| copy_error(e.path().unwrap_or(src), e.to_string()))?;
        let path = entry.path();
        let relative = path
            .strip_prefix(src)
            .map_err(|e| copy_error(path, e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| copy_error(path, e.to_string()))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| copy_error(path, e.to_string()))?;
            }
            std::fs::copy(path, &target).map_err(|e| copy_error(path, e.to_string()))?;
        }
    }
    Ok(())
}

fn copy_error(path: &Path, reason: String) -> AutogenError {
    AutogenError::Copy {
        path: path.display().to_string(),
        reason,
    }
}

/// Set unix permission bits. A no-op on platforms without them.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/control");
        atomic_write(&path, b"Package: x\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Package: x\n");
    }

    #[test]
    fn fresh_dir_drops_stale_content() {
        let dir = TempDir::new().unwrap();
        let stage = dir.path().join("stage");
        std::fs::create_dir_all(stage.join("old")).unwrap();
        std::fs::write(stage.join("old/leftover"), "x").unwrap();

        fresh_dir(&stage).unwrap();

        assert!(stage.is_dir());
        assert_eq!(std::fs::read_dir(&stage).unwrap().count(), 0);
    }

    #[test]
    fn copy_tree_is_recursive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("www-data");
        std::fs::create_dir_all(src.join("js")).unwrap();
        std::fs::write(src.join("index.html"), "<html>").unwrap();
        std::fs::write(src.join("js/app.js"), "1;").unwrap();

        let dst = dir.path().join("out/www-data");
        copy_tree(&src, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("index.html")).unwrap(), "<html>");
        assert_eq!(std::fs::read_to_string(dst.join("js/app.js")).unwrap(), "1;");
    }

    #[cfg(unix)]
    #[test]
    fn copy_tree_follows_symlinked_directories() {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared-templates");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(shared.join("page.html"), "{{ body }}").unwrap();

        let src = dir.path().join("webserver");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("index.html"), "<html>").unwrap();
        std::os::unix::fs::symlink(&shared, src.join("templates")).unwrap();

        let dst = dir.path().join("out/webserver");
        copy_tree(&src, &dst).unwrap();

        let templates = dst.join("templates");
        assert!(!std::fs::symlink_metadata(&templates).unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(templates.join("page.html")).unwrap(),
            "{{ body }}"
        );
        assert_eq!(std::fs::read_to_string(dst.join("index.html")).unwrap(), "<html>");
    }

    #[cfg(unix)]
    #[test]
    fn copy_tree_error_names_the_failing_path() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("webserver");
        std::fs::create_dir_all(&src).unwrap();
        let dangling = src.join("missing-link");
        std::os::unix::fs::symlink(dir.path().join("gone"), &dangling).unwrap();

        let err = copy_tree(&src, &dir.path().join("out")).unwrap_err();

        assert!(matches!(err, AutogenError::Copy { .. }));
        assert!(err.to_string().contains(&dangling.display().to_string()));
    }

    #[test]
    fn copy_file_reports_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(&dir.path().join("nope"), &dir.path().join("dst")).unwrap_err();
        assert!(matches!(err, AutogenError::MissingSource(_)));
    }

    #[cfg(unix)]
    #[test]
    fn set_mode_applies_bits() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("postinst");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        set_mode(&path, 0o775).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o775);
    }
}
