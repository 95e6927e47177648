use anyhow::Context as _;
use autogen_core::actions::Context;
use autogen_core::config::Config;
use autogen_core::dispatch::dispatch;
use autogen_core::host::Host;
use autogen_core::registry::{Registry, BUILTIN_ACTIONS};
use autogen_core::runner::{CommandRunner, RecordingRunner, SystemRunner};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Dispatch `command[0]` with the remaining elements as its arguments.
pub fn run(root: &Path, command: &[String], opts: RunOptions) -> anyhow::Result<()> {
    let Some((action, args)) = command.split_first() else {
        anyhow::bail!("no action given; run 'autogen --list' to see available actions");
    };

    let config = Config::load(root).context("failed to load autogen.yaml")?;
    for warning in config.validate(BUILTIN_ACTIONS) {
        tracing::warn!(level = ?warning.level, "{}", warning.message);
    }
    let registry = Registry::new(&config);

    let host = Host::detect();
    let self_exe = std::env::current_exe().context("cannot locate the autogen executable")?;
    let mut dispatcher = host
        .dispatcher(&self_exe)
        .args(["--root".to_string(), root.display().to_string()]);
    if opts.verbose {
        dispatcher = dispatcher.arg("--verbose");
    }

    let runner: Box<dyn CommandRunner> = if opts.dry_run {
        Box::new(RecordingRunner::echoing())
    } else {
        Box::new(SystemRunner)
    };

    let ctx = Context {
        root: root.to_path_buf(),
        host,
        config,
        runner: runner.as_ref(),
        dispatcher,
    };

    tracing::debug!(%host, root = %root.display(), "resolved environment");
    dispatch(&ctx, &registry, action, args)?;
    Ok(())
}
