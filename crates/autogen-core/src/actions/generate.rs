use super::{build_type, Action, Context};
use crate::error::Result;
use crate::paths;
use crate::runner::{run_step, Invocation};

/// `generate-project [build-type]`: install third-party dependencies with
/// conan, then generate build files with premake.
pub struct GenerateProject;

impl Action for GenerateProject {
    fn name(&self) -> &str {
        "generate-project"
    }

    fn description(&self) -> String {
        "Install dependencies with conan and generate the project with premake".to_string()
    }

    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        let build_type = build_type(args);
        if args.len() > 1 {
            tracing::warn!(ignored = ?&args[1..], "generate-project takes a single build type");
        }

        println!("Installing 3rd party dependencies ({build_type})...");
        let conan = Invocation::new("conan")
            .args(["install", ".", "--build", "missing", "-s"])
            .arg(format!("build_type={build_type}"))
            .current_dir(&ctx.root);
        run_step(ctx.runner, &conan)?;

        println!("Generating project ({})...", ctx.host.generator());
        let premake = Invocation::new(paths::PREMAKE_BIN)
            .arg(ctx.host.generator())
            .current_dir(&ctx.root);
        run_step(ctx.runner, &premake)
    }
}
