use super::{Action, Context};
use crate::certs;
use crate::error::Result;
use crate::manifest::{BuildInfo, ToolLookup};
use crate::runner::run_step;

/// `generate-certs`: locate openssl through the conan manifest and create
/// the self-signed key/certificate pairs.
///
/// A missing or incomplete manifest is not an error. The condition is
/// reported and nothing is generated.
pub struct GenerateCerts;

impl Action for GenerateCerts {
    fn name(&self) -> &str {
        "generate-certs"
    }

    fn description(&self) -> String {
        "Generate self-signed SSL certificates with the conan-provided openssl".to_string()
    }

    fn run(&self, ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        let manifest = ctx.config.build_info(&ctx.root);
        if !manifest.is_file() {
            println!(
                "{} not found! Run generate-project first.",
                ctx.config.build_info
            );
            return Ok(());
        }

        let info = BuildInfo::load(&manifest)?;
        let openssl = match info.find_tool("openssl", ctx.host.openssl_exe()) {
            ToolLookup::Found(path) => path,
            ToolLookup::NoBinDirs => {
                println!(
                    "Invalid {}! Run generate-project first.",
                    ctx.config.build_info
                );
                return Ok(());
            }
            ToolLookup::NotUnique(count) => {
                tracing::debug!(count, "openssl bin dirs matched");
                println!("Openssl not found in buildinfo");
                return Ok(());
            }
        };

        for target in &ctx.config.certificates {
            println!(
                "{}",
                console::style(format!(
                    "Generating self signed ssl certificates for {}",
                    target.label
                ))
                .yellow()
            );
            let req = certs::self_signed(&openssl, &ctx.config.openssl_config, target, &ctx.root);
            run_step(ctx.runner, &req)?;
        }
        Ok(())
    }
}
