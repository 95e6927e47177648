use crate::error::{AutogenError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants (relative to the project root)
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "autogen.yaml";
pub const VERSION_FILE: &str = "VERSION";
pub const ACTIONS_DIR: &str = "scripts/actions";
pub const PACKAGE_DIR: &str = "package";
pub const BUILD_INFO_FILE: &str = "conanbuildinfo.txt";
pub const OPENSSL_CONFIG: &str = "etc/openssl.cnf";
pub const PREMAKE_BIN: &str = "vendor/premake/premake5";
pub const RELEASE_BIN_DIR: &str = "build/x86_64-release/bin";

pub const DEBIAN_DIR: &str = "DEBIAN";
pub const CONTROL_FILE: &str = "control";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Staging directory for one package build: `<package_dir>/<name>_<version>_<arch>`.
pub fn staging_dir(package_dir: &Path, name: &str, version: &str, arch: &str) -> PathBuf {
    package_dir.join(format!("{name}_{version}_{arch}"))
}

pub fn control_path(staging: &Path) -> PathBuf {
    staging.join(DEBIAN_DIR).join(CONTROL_FILE)
}

// ---------------------------------------------------------------------------
// Action name validation
// ---------------------------------------------------------------------------

static ACTION_RE: OnceLock<Regex> = OnceLock::new();

fn action_re() -> &'static Regex {
    ACTION_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*$").unwrap())
}

/// Action names double as file stems under the actions directory, so they
/// must not contain separators, dots or uppercase letters.
pub fn validate_action_name(name: &str) -> Result<()> {
    if name.len() > 64 || !action_re().is_match(name) {
        return Err(AutogenError::InvalidActionName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_action_names() {
        for name in ["build", "dpack-example", "generate-certs", "x1"] {
            validate_action_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_action_names() {
        for name in ["", "-lead", "Build", "../etc", "a.py", "has space", "a/b"] {
            assert!(validate_action_name(name).is_err(), "expected invalid: {name}");
        }
    }

    #[test]
    fn staging_dir_layout() {
        let dir = staging_dir(Path::new("/tmp/proj/package"), "sci-bat", "1.2.3", "amd64");
        assert_eq!(dir, PathBuf::from("/tmp/proj/package/sci-bat_1.2.3_amd64"));
        assert_eq!(
            control_path(&dir),
            PathBuf::from("/tmp/proj/package/sci-bat_1.2.3_amd64/DEBIAN/control")
        );
    }
}
