use super::{build_type, Action, Context};
use crate::error::Result;
use crate::runner::{run_step, Invocation};

/// `build [build-type]`: regenerate the project through the dispatcher, then
/// run the native build where the host has one.
pub struct Build;

impl Action for Build {
    fn name(&self) -> &str {
        "build"
    }

    fn description(&self) -> String {
        "Generate the project and run the native build".to_string()
    }

    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        run_step(ctx.runner, &ctx.redispatch("generate-project", args.iter().cloned()))?;

        if !ctx.host.has_native_build() {
            tracing::info!(host = %ctx.host, "no native build step for this host, project generated only");
            return Ok(());
        }

        let make = Invocation::new("make")
            .arg(format!("config={}", build_type(args).to_lowercase()))
            .current_dir(&ctx.root);
        run_step(ctx.runner, &make)
    }
}
