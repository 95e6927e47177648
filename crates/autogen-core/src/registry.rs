//! The table of built-in actions.

use serde::Serialize;
use std::path::Path;

use crate::actions::{script, Action, Build, GenerateCerts, GenerateProject, Package};
use crate::config::Config;
use crate::error::Result;

/// Names of the actions that exist regardless of configuration.
pub const BUILTIN_ACTIONS: &[&str] = &["generate-project", "build", "generate-certs"];

pub struct Registry {
    actions: Vec<Box<dyn Action>>,
}

/// One row of `autogen --list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionInfo {
    pub name: String,
    pub kind: ActionKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Builtin,
    Package,
    Script,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Builtin => "builtin",
            ActionKind::Package => "package",
            ActionKind::Script => "script",
        }
    }
}

impl Registry {
    /// Built-in actions plus one packaging action per configured package.
    /// Packages whose action would shadow an earlier entry are skipped.
    pub fn new(config: &Config) -> Self {
        let mut actions: Vec<Box<dyn Action>> = vec![
            Box::new(GenerateProject),
            Box::new(Build),
            Box::new(GenerateCerts),
        ];
        for spec in &config.packages {
            if actions.iter().any(|a| a.name() == spec.action) {
                tracing::warn!(action = %spec.action, package = %spec.name, "duplicate action name, package skipped");
                continue;
            }
            actions.push(Box::new(Package::new(spec.clone())));
        }
        Self { actions }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Registry entries followed by scripts in `actions_dir` that no entry
    /// already answers to.
    pub fn list(&self, actions_dir: &Path) -> Result<Vec<ActionInfo>> {
        let mut rows: Vec<ActionInfo> = self
            .actions
            .iter()
            .map(|a| ActionInfo {
                name: a.name().to_string(),
                kind: if BUILTIN_ACTIONS.contains(&a.name()) {
                    ActionKind::Builtin
                } else {
                    ActionKind::Package
                },
                description: a.description(),
            })
            .collect();

        for (name, path) in script::discover_scripts(actions_dir)? {
            if self.get(&name).is_some() {
                continue;
            }
            rows.push(ActionInfo {
                name,
                kind: ActionKind::Script,
                description: format!("script {}", path.display()),
            });
        }
        Ok(rows)
    }
}
