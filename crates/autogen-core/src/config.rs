use crate::certs::{self, CertTarget};
use crate::error::Result;
use crate::package::{self, PackageSpec};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings from `autogen.yaml`. Every field has a default, so an
/// absent file and an empty file both mean "built-in layout".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_actions_dir")]
    pub actions_dir: String,
    #[serde(default = "default_package_dir")]
    pub package_dir: String,
    #[serde(default = "default_version_file")]
    pub version_file: String,
    #[serde(default = "default_build_info")]
    pub build_info: String,
    #[serde(default = "default_openssl_config")]
    pub openssl_config: String,
    #[serde(default = "certs::default_targets")]
    pub certificates: Vec<CertTarget>,
    #[serde(default = "default_packages")]
    pub packages: Vec<PackageSpec>,
}

fn default_actions_dir() -> String {
    paths::ACTIONS_DIR.to_string()
}

fn default_package_dir() -> String {
    paths::PACKAGE_DIR.to_string()
}

fn default_version_file() -> String {
    paths::VERSION_FILE.to_string()
}

fn default_build_info() -> String {
    paths::BUILD_INFO_FILE.to_string()
}

fn default_openssl_config() -> String {
    format!("./{}", paths::OPENSSL_CONFIG)
}

fn default_packages() -> Vec<PackageSpec> {
    vec![package::sci_bat(), package::sci_bat_example()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actions_dir: default_actions_dir(),
            package_dir: default_package_dir(),
            version_file: default_version_file(),
            build_info: default_build_info(),
            openssl_config: default_openssl_config(),
            certificates: certs::default_targets(),
            packages: default_packages(),
        }
    }
}

impl Config {
    /// Load `autogen.yaml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!("no {} found, using defaults", paths::CONFIG_FILE);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&text)?;
        Ok(config)
    }

    pub fn actions_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.actions_dir)
    }

    pub fn package_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.package_dir)
    }

    pub fn version_file(&self, root: &Path) -> PathBuf {
        root.join(&self.version_file)
    }

    pub fn build_info(&self, root: &Path) -> PathBuf {
        root.join(&self.build_info)
    }

    pub fn package_for_action(&self, action: &str) -> Option<&PackageSpec> {
        self.packages.iter().find(|p| p.action == action)
    }

    /// Check the configuration for problems. `reserved` are action names
    /// already taken by built-in actions.
    pub fn validate(&self, reserved: &[&str]) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut names = HashSet::new();
        let mut actions = HashSet::new();

        for pkg in &self.packages {
            if !names.insert(pkg.name.as_str()) {
                warnings.push(error(format!("duplicate package name '{}'", pkg.name)));
            }
            if !actions.insert(pkg.action.as_str()) {
                warnings.push(error(format!(
                    "action '{}' is assigned to more than one package",
                    pkg.action
                )));
            }
            if paths::validate_action_name(&pkg.action).is_err() {
                warnings.push(error(format!(
                    "package '{}' uses invalid action name '{}'",
                    pkg.name, pkg.action
                )));
            }
            if reserved.contains(&pkg.action.as_str()) {
                warnings.push(error(format!(
                    "package '{}' action '{}' shadows a built-in action",
                    pkg.name, pkg.action
                )));
            }
            if pkg.maintainer_scripts.is_empty() {
                warnings.push(warning(format!(
                    "package '{}' has no maintainer scripts",
                    pkg.name
                )));
            }
            if pkg.control.maintainer.trim().is_empty() {
                warnings.push(warning(format!("package '{}' has no maintainer", pkg.name)));
            }
        }

        let mut outputs = HashSet::new();
        for target in &self.certificates {
            for path in [&target.key, &target.cert] {
                if !outputs.insert(path.as_str()) {
                    warnings.push(error(format!(
                        "certificate output '{path}' is written more than once"
                    )));
                }
            }
        }

        warnings
    }
}

fn warning(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Warning,
        message,
    }
}

fn error(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Error,
        message,
    }
}
