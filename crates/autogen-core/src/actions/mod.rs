//! The actions autogen can run.
//!
//! Each action is a fixed sequence of external invocations and file
//! operations. Actions never call each other in-process; when one needs
//! another (a release build before packaging), it re-enters the dispatcher
//! through [`Context::dispatcher`] as a child process.

pub mod build;
pub mod certs;
pub mod generate;
pub mod package;
pub mod script;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::host::Host;
use crate::runner::{CommandRunner, Invocation};

pub use build::Build;
pub use certs::GenerateCerts;
pub use generate::GenerateProject;
pub use package::Package;
pub use script::ScriptAction;

/// Build type used when none is given on the command line.
pub const DEFAULT_BUILD_TYPE: &str = "Debug";

/// Everything an action needs from its surroundings.
pub struct Context<'a> {
    pub root: PathBuf,
    pub host: Host,
    pub config: Config,
    pub runner: &'a dyn CommandRunner,
    /// How to re-enter the dispatcher; action name and args are appended.
    pub dispatcher: Invocation,
}

impl Context<'_> {
    /// An invocation of the dispatcher running `action` with `args`.
    pub fn redispatch<I, S>(&self, action: &str, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatcher
            .clone()
            .arg(action)
            .args(args)
            .current_dir(&self.root)
    }
}

pub trait Action {
    fn name(&self) -> &str;

    fn description(&self) -> String;

    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()>;
}

/// First positional argument as a build type, or [`DEFAULT_BUILD_TYPE`].
pub(crate) fn build_type(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or(DEFAULT_BUILD_TYPE)
}
