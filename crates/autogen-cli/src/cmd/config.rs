use crate::output::print_json;
use anyhow::Context;
use autogen_core::config::{Config, WarnLevel};
use autogen_core::registry::BUILTIN_ACTIONS;
use std::path::Path;

/// Print the effective configuration, then its warnings on stderr.
/// Fails when any warning is an error.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load autogen.yaml")?;
    let warnings = config.validate(BUILTIN_ACTIONS);

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config": config,
            "warnings": warnings,
        }))?;
    } else {
        let yaml = serde_yaml::to_string(&config).context("failed to render config")?;
        print!("{yaml}");
        for w in &warnings {
            let tag = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            eprintln!("{tag}: {}", w.message);
        }
    }

    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("configuration has {errors} error(s)");
    }
    Ok(())
}
