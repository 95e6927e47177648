mod cmd;
mod output;
mod root;

use autogen_core::AutogenError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "autogen",
    about = "Run project generation, build, certificate and Debian packaging actions",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Project root (default: auto-detect from autogen.yaml, VERSION or .git/)
    #[arg(long, env = "AUTOGEN_ROOT")]
    root: Option<PathBuf>,

    /// Print external commands instead of running them (files are still staged)
    #[arg(long)]
    dry_run: bool,

    /// Log each step
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List available actions
    #[arg(long, conflicts_with_all = ["command", "show_config"])]
    list: bool,

    /// Print the effective configuration and any configuration warnings
    #[arg(long, conflicts_with = "command")]
    show_config: bool,

    /// Output as JSON (with --list or --show-config)
    #[arg(long, short = 'j')]
    json: bool,

    /// Action name followed by the arguments forwarded to it
    #[arg(
        value_name = "ACTION [ARGS]...",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = if cli.list {
        cmd::list::run(&root, cli.json)
    } else if cli.show_config {
        cmd::config::run(&root, cli.json)
    } else {
        let opts = cmd::run::RunOptions {
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        };
        cmd::run::run(&root, &cli.command, opts)
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<AutogenError>()
            .map(AutogenError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
