use super::{Action, Context};
use crate::error::Result;
use crate::io;
use crate::package::{self, PackageSpec};
use crate::runner::run_step;
use crate::version;

/// Build type every packaging run compiles with.
pub const PACKAGE_BUILD_TYPE: &str = "Release";

/// A packaging action (`dpack`, `dpack-example`, or one from `autogen.yaml`):
/// release build, fresh staging tree, `dpkg-deb`.
pub struct Package {
    spec: PackageSpec,
}

impl Package {
    pub fn new(spec: PackageSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &PackageSpec {
        &self.spec
    }
}

impl Action for Package {
    fn name(&self) -> &str {
        &self.spec.action
    }

    fn description(&self) -> String {
        format!("Release build and Debian package '{}'", self.spec.name)
    }

    fn run(&self, ctx: &Context<'_>, _args: &[String]) -> Result<()> {
        run_step(ctx.runner, &ctx.redispatch("build", [PACKAGE_BUILD_TYPE]))?;

        if !ctx.host.can_package_deb() {
            println!(
                "Debian packaging is only available on Linux; skipping '{}' on {}.",
                self.spec.name, ctx.host
            );
            return Ok(());
        }

        let package_dir = ctx.config.package_dir(&ctx.root);
        io::ensure_dir(&package_dir)?;
        let version = version::read_version(&ctx.config.version_file(&ctx.root))?;
        println!("Using version {version} from VERSION file.");

        let staging = package::assemble(&ctx.root, &package_dir, &self.spec, &version)?;
        tracing::info!(package = %self.spec.name, dir = %staging.display(), "staged");

        run_step(ctx.runner, &package::deb_build(&ctx.root, &staging))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{context, SELF_EXE};
    use crate::error::AutogenError;
    use crate::host::Host;
    use crate::package::{sci_bat, sci_bat_example, seed_sources};
    use crate::runner::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn builds_release_then_packs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("VERSION"), "1.2.3\n").unwrap();
        seed_sources(root, &sci_bat());
        let runner = RecordingRunner::new();
        let ctx = context(root, Host::Linux, &runner);

        Package::new(sci_bat()).run(&ctx, &[]).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, SELF_EXE);
        assert_eq!(calls[0].args, ["build", "Release"]);
        assert_eq!(calls[1].program, "dpkg-deb");
        let staging = root.join("package/sci-bat_1.2.3_amd64");
        assert_eq!(calls[1].args[2], staging.display().to_string());

        let control = std::fs::read_to_string(staging.join("DEBIAN/control")).unwrap();
        assert!(control.contains("Version: 1.2.3\n"));
    }

    #[test]
    fn example_package_has_three_binaries() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("VERSION"), "0.1.0").unwrap();
        seed_sources(root, &sci_bat_example());
        let runner = RecordingRunner::new();
        let ctx = context(root, Host::Linux, &runner);

        Package::new(sci_bat_example()).run(&ctx, &[]).unwrap();

        let bin = root.join("package/sci-bat-example_0.1.0_amd64/usr/bin");
        for exe in ["webserver", "mqtt", "modbus"] {
            assert!(bin.join(format!("sci-bat-example-{exe}")).is_file());
        }
        assert!(bin.join("sci-bat-example-webserver.d/www-data/index.html").is_file());
    }

    #[test]
    fn non_linux_skips_packaging() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let ctx = context(dir.path(), Host::Windows, &runner);

        Package::new(sci_bat()).run(&ctx, &[]).unwrap();

        assert_eq!(runner.calls().len(), 1);
        assert!(runner.calls_to("dpkg-deb").is_empty());
        assert!(!dir.path().join("package").exists());
    }

    #[test]
    fn failed_build_leaves_no_staging() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("VERSION"), "1.0.0").unwrap();
        let runner = RecordingRunner::new().fail(SELF_EXE, 2);
        let ctx = context(dir.path(), Host::Linux, &runner);

        let err = Package::new(sci_bat()).run(&ctx, &[]).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!dir.path().join("package").exists());
    }

    #[test]
    fn package_dir_exists_before_version_is_read() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let ctx = context(dir.path(), Host::Linux, &runner);

        let err = Package::new(sci_bat()).run(&ctx, &[]).unwrap_err();

        assert!(matches!(err, AutogenError::Io(_)));
        assert!(dir.path().join("package").is_dir());
        assert_eq!(std::fs::read_dir(dir.path().join("package")).unwrap().count(), 0);
        assert!(runner.calls_to("dpkg-deb").is_empty());
    }

    #[test]
    fn dpkg_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("VERSION"), "1.0.0").unwrap();
        seed_sources(root, &sci_bat());
        let runner = RecordingRunner::new().fail("dpkg-deb", 1);
        let ctx = context(root, Host::Linux, &runner);

        let err = Package::new(sci_bat()).run(&ctx, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(root.join("package/sci-bat_1.0.0_amd64/DEBIAN/control").is_file());
    }
}
