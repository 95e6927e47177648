//! Debian control descriptor: a typed record plus the writer that renders
//! it in `dpkg-deb`'s `Key: value` format.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Literal packaging metadata for one package, minus the version (which
/// comes from the version marker at run time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default = "default_architecture")]
    pub architecture: String,
    #[serde(default)]
    pub essential: bool,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub depends: Vec<String>,
    pub maintainer: String,
    pub description: String,
    /// Installed size in KiB.
    #[serde(default)]
    pub installed_size: u64,
}

fn default_architecture() -> String {
    "amd64".to_string()
}

fn default_priority() -> String {
    "optional".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDescriptor {
    pub package: String,
    pub version: String,
    pub architecture: String,
    pub essential: bool,
    pub priority: String,
    pub depends: Vec<String>,
    pub maintainer: String,
    pub description: String,
    pub installed_size: u64,
}

impl ControlDescriptor {
    pub fn new(package: &str, version: &str, meta: &PackageMetadata) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
            architecture: meta.architecture.clone(),
            essential: meta.essential,
            priority: meta.priority.clone(),
            depends: meta.depends.clone(),
            maintainer: meta.maintainer.clone(),
            description: meta.description.clone(),
            installed_size: meta.installed_size,
        }
    }

    /// Render in control-file format, one field per line in a fixed order.
    ///
    /// `Depends` is omitted when empty. A multi-line description becomes a
    /// synopsis plus continuation lines, with blank lines written as ` .`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        field(&mut out, "Package", &self.package);
        field(&mut out, "Version", &self.version);
        field(&mut out, "Architecture", &self.architecture);
        field(&mut out, "Essential", if self.essential { "yes" } else { "no" });
        field(&mut out, "Priority", &self.priority);
        if !self.depends.is_empty() {
            field(&mut out, "Depends", &self.depends.join(", "));
        }
        field(&mut out, "Maintainer", &self.maintainer);

        let mut lines = self.description.trim_end().lines();
        field(&mut out, "Description", lines.next().unwrap_or_default());
        for line in lines {
            if line.trim().is_empty() {
                out.push_str(" .\n");
            } else {
                let _ = writeln!(out, " {}", line.trim_end());
            }
        }

        field(&mut out, "Installed-Size", &self.installed_size.to_string());
        out
    }
}

fn field(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{key}: {value}");
}
