use crate::error::{AutogenError, Result};
use std::path::Path;

/// Read the single-line version marker. Surrounding whitespace is stripped;
/// the format itself is not checked.
pub fn read_version(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)?;
    let version = raw.trim();
    if version.is_empty() {
        return Err(AutogenError::EmptyVersion(path.display().to_string()));
    }
    Ok(version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn trims_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        std::fs::write(&path, "1.2.3\n").unwrap();
        assert_eq!(read_version(&path).unwrap(), "1.2.3");
    }

    #[test]
    fn accepts_free_form_versions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        std::fs::write(&path, "  2024.1-rc~beta  ").unwrap();
        assert_eq!(read_version(&path).unwrap(), "2024.1-rc~beta");
    }

    #[test]
    fn blank_marker_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("VERSION");
        std::fs::write(&path, "\n \n").unwrap();
        assert!(matches!(
            read_version(&path).unwrap_err(),
            AutogenError::EmptyVersion(_)
        ));
    }

    #[test]
    fn missing_marker_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_version(&dir.path().join("VERSION")).unwrap_err(),
            AutogenError::Io(_)
        ));
    }
}
