//! Debian package staging.
//!
//! A [`PackageSpec`] describes a staging tree as data: control metadata,
//! maintainer scripts, single files and whole directory trees, each mapped
//! from a path under the project root to a path under the staging root.
//! [`assemble`] rebuilds that tree from scratch; [`deb_build`] is the
//! `dpkg-deb` call that turns it into a `.deb`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::control::{ControlDescriptor, PackageMetadata};
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::runner::Invocation;

/// Permission bits for `postinst`, `prerm` and friends.
pub const MAINTAINER_SCRIPT_MODE: u32 = 0o775;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Source, relative to the project root.
    pub from: String,
    /// Destination, relative to the staging root.
    pub to: String,
}

impl Placement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub name: String,
    /// Action name that builds this package.
    pub action: String,
    pub control: PackageMetadata,
    /// Copied into `DEBIAN/` under their own file name.
    #[serde(default)]
    pub maintainer_scripts: Vec<String>,
    #[serde(default)]
    pub files: Vec<Placement>,
    #[serde(default)]
    pub trees: Vec<Placement>,
}

impl PackageSpec {
    pub fn staging_dir(&self, package_dir: &Path, version: &str) -> PathBuf {
        paths::staging_dir(package_dir, &self.name, version, &self.control.architecture)
    }

    pub fn descriptor(&self, version: &str) -> ControlDescriptor {
        ControlDescriptor::new(&self.name, version, &self.control)
    }
}

/// Build the staging tree for `spec` at `version` under `package_dir`.
///
/// Any existing staging directory for the same name/version/arch is removed
/// first. Returns the staging directory.
pub fn assemble(
    root: &Path,
    package_dir: &Path,
    spec: &PackageSpec,
    version: &str,
) -> Result<PathBuf> {
    io::ensure_dir(package_dir)?;

    let staging = spec.staging_dir(package_dir, version);
    if staging.exists() {
        tracing::info!(dir = %staging.display(), "removing previous staging directory");
    }
    io::fresh_dir(&staging)?;

    let control = spec.descriptor(version).render();
    io::atomic_write(&paths::control_path(&staging), control.as_bytes())?;

    let debian = staging.join(paths::DEBIAN_DIR);
    for script in &spec.maintainer_scripts {
        let src = root.join(script);
        let file_name = Path::new(script)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| script.into());
        let dst = debian.join(file_name);
        io::copy_file(&src, &dst)?;
        io::set_mode(&dst, MAINTAINER_SCRIPT_MODE)?;
    }

    for file in &spec.files {
        io::copy_file(&root.join(&file.from), &staging.join(&file.to))?;
    }

    for tree in &spec.trees {
        let dst = staging.join(&tree.to);
        if let Some(parent) = dst.parent() {
            io::ensure_dir(parent)?;
        }
        io::copy_tree(&root.join(&tree.from), &dst)?;
    }

    tracing::debug!(
        package = %spec.name,
        version,
        files = spec.files.len(),
        trees = spec.trees.len(),
        "staging directory assembled"
    );
    Ok(staging)
}

/// The `dpkg-deb` call that packs a staging directory.
pub fn deb_build(root: &Path, staging: &Path) -> Invocation {
    Invocation::new("dpkg-deb")
        .args(["--build", "--root-owner-group"])
        .arg(staging.display().to_string())
        .current_dir(root)
}

// ---------------------------------------------------------------------------
// Built-in packages
// ---------------------------------------------------------------------------

const MAINTAINER: &str = "Ludwig Fuechsl";

fn release_bin(name: &str) -> String {
    format!("{}/{name}", paths::RELEASE_BIN_DIR)
}

/// The gateway service package.
pub fn sci_bat() -> PackageSpec {
    PackageSpec {
        name: "sci-bat".into(),
        action: "dpack".into(),
        control: PackageMetadata {
            architecture: "amd64".into(),
            essential: false,
            priority: "optional".into(),
            depends: vec!["openssl".into()],
            maintainer: MAINTAINER.into(),
            description: "Modbus n MQTT gateway for SBC inverter".into(),
            installed_size: 9933,
        },
        maintainer_scripts: vec![
            "etc/dep/postinst".into(),
            "etc/dep/prerm".into(),
            "etc/dep/postrm".into(),
        ],
        files: vec![
            Placement::new(release_bin("sci-bat-service"), "usr/bin/sci-bat"),
            Placement::new(
                "etc/sci-bat-app-dir/conf/webserver-conf-linux.xml",
                "etc/sci-bat/webserver-conf.xml",
            ),
            Placement::new(
                "etc/dep/sci-bat.service",
                "etc/systemd/system/sci-bat.service",
            ),
        ],
        trees: vec![
            Placement::new(
                "etc/sci-bat-app-dir/app/webserver/www-data",
                "usr/bin/sci-bat.d/webserver/www-data",
            ),
            Placement::new(
                "etc/sci-bat-app-dir/app/webserver/templates",
                "usr/bin/sci-bat.d/webserver/templates",
            ),
        ],
    }
}

/// The example web server / MQTT / Modbus bundle.
pub fn sci_bat_example() -> PackageSpec {
    PackageSpec {
        name: "sci-bat-example".into(),
        action: "dpack-example".into(),
        control: PackageMetadata {
            architecture: "amd64".into(),
            essential: false,
            priority: "optional".into(),
            depends: vec!["openssl".into()],
            maintainer: MAINTAINER.into(),
            description: "Test package for reti with a webserver as service".into(),
            installed_size: 10240,
        },
        maintainer_scripts: vec![
            "etc/example-dep/postinst".into(),
            "etc/example-dep/prerm".into(),
            "etc/example-dep/postrm".into(),
        ],
        files: vec![
            Placement::new(
                release_bin("SimpleWebServer"),
                "usr/bin/sci-bat-example-webserver",
            ),
            Placement::new(release_bin("SimpleMQTT"), "usr/bin/sci-bat-example-mqtt"),
            Placement::new(release_bin("SimpleModbus"), "usr/bin/sci-bat-example-modbus"),
            Placement::new(
                "etc/example-webserver-data/config-linux.xml",
                "etc/sci-bat-example-webserver/config.xml",
            ),
            Placement::new(
                "etc/example-mqtt-data/settings.xml",
                "etc/sci-bat-example-mqtt/settings.xml",
            ),
            Placement::new(
                "etc/example-dep/sci-bat-example-webserver.service",
                "etc/systemd/system/sci-bat-example-webserver.service",
            ),
        ],
        trees: vec![
            Placement::new(
                "etc/example-webserver-data/www-data",
                "usr/bin/sci-bat-example-webserver.d/www-data",
            ),
            Placement::new(
                "etc/example-webserver-data/templates",
                "usr/bin/sci-bat-example-webserver.d/templates",
            ),
        ],
    }
}

/// Write every source file `spec` needs under `root`. Test fixture helper.
#[cfg(test)]
pub(crate) fn seed_sources(root: &Path, spec: &PackageSpec) {
    for script in &spec.maintainer_scripts {
        let p = root.join(script);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(&p, "#!/bin/sh\nexit 0\n").unwrap();
    }
    for file in &spec.files {
        let p = root.join(&file.from);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(&p, format!("contents of {}", file.from)).unwrap();
    }
    for tree in &spec.trees {
        let p = root.join(&tree.from);
        std::fs::create_dir_all(p.join("css")).unwrap();
        std::fs::write(p.join("index.html"), "<html></html>").unwrap();
        std::fs::write(p.join("css/site.css"), "body {}").unwrap();
    }
}
