//! Reader for the dependency installer's `conanbuildinfo.txt`.
//!
//! The file is a list of `[section]` headers, each followed by one entry per
//! line. A section ends at a blank line, the next header, or end of file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const BIN_DIRS: &str = "bindirs";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInfo {
    sections: BTreeMap<String, Vec<String>>,
}

/// Outcome of looking a tool up among the manifest's bin directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolLookup {
    /// The manifest has no `[bindirs]` section.
    NoBinDirs,
    /// Exactly one bin directory matched.
    Found(PathBuf),
    /// Zero or several bin directories matched.
    NotUnique(usize),
}

impl BuildInfo {
    pub fn parse(text: &str) -> Self {
        let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in text.lines().map(str::trim) {
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }
            if line.is_empty() {
                current = None;
                continue;
            }
            if let Some(name) = &current {
                if let Some(entries) = sections.get_mut(name) {
                    entries.push(line.to_string());
                }
            }
        }

        Self { sections }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn section(&self, name: &str) -> Option<&[String]> {
        self.sections.get(name).map(|v| v.as_slice())
    }

    pub fn bin_dirs(&self) -> Option<&[String]> {
        self.section(BIN_DIRS)
    }

    /// Find the single bin directory whose path contains `needle` and join
    /// `exe` onto it.
    pub fn find_tool(&self, needle: &str, exe: &str) -> ToolLookup {
        let Some(dirs) = self.bin_dirs() else {
            return ToolLookup::NoBinDirs;
        };
        let matches: Vec<&String> = dirs.iter().filter(|d| d.contains(needle)).collect();
        match matches.as_slice() {
            [only] => ToolLookup::Found(Path::new(only.as_str()).join(exe)),
            other => ToolLookup::NotUnique(other.len()),
        }
    }
}
