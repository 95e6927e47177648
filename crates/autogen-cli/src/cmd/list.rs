use crate::output::{print_json, print_table};
use anyhow::Context;
use autogen_core::config::Config;
use autogen_core::registry::Registry;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load autogen.yaml")?;
    let registry = Registry::new(&config);
    let rows = registry
        .list(&config.actions_dir(root))
        .context("failed to scan actions directory")?;

    if json {
        print_json(&rows)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| vec![r.name, r.kind.as_str().to_string(), r.description])
        .collect();
    print_table(&["ACTION", "KIND", "DESCRIPTION"], &rows);
    Ok(())
}
