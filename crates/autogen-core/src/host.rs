//! Host operating system detection and the per-OS choices that hang off it.

use std::path::Path;

use crate::runner::Invocation;

/// Wrapper script used to re-enter the dispatcher on Windows hosts.
pub const WINDOWS_WRAPPER: &str = "autogen.cmd";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Linux,
    Windows,
    MacOs,
    Other,
}

impl Host {
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Host::Linux,
            "windows" => Host::Windows,
            "macos" => Host::MacOs,
            _ => Host::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Host::Linux => "Linux",
            Host::Windows => "Windows",
            Host::MacOs => "macOS",
            Host::Other => "other",
        }
    }

    /// premake backend identifier for project generation.
    pub fn generator(&self) -> &'static str {
        match self {
            Host::Windows => "vs2022",
            Host::MacOs => "xcode4",
            Host::Linux | Host::Other => "gmake2",
        }
    }

    /// Interpreter for `.py` action scripts.
    pub fn python(&self) -> &'static str {
        match self {
            Host::Windows => "py",
            _ => "python3",
        }
    }

    /// Executable name of the openssl binary inside a bin directory.
    pub fn openssl_exe(&self) -> &'static str {
        match self {
            Host::Windows => "openssl.exe",
            _ => "openssl",
        }
    }

    /// Whether the native build step (`make`) runs on this host.
    pub fn has_native_build(&self) -> bool {
        matches!(self, Host::Linux)
    }

    /// Whether Debian packages can be produced on this host.
    pub fn can_package_deb(&self) -> bool {
        matches!(self, Host::Linux)
    }

    /// How to re-enter the dispatcher from inside an action.
    ///
    /// Windows prefers the `autogen.cmd` wrapper when it is on PATH; every
    /// other host runs the current executable directly.
    pub fn dispatcher(&self, self_exe: &Path) -> Invocation {
        if *self == Host::Windows && which::which(WINDOWS_WRAPPER).is_ok() {
            return Invocation::new(WINDOWS_WRAPPER);
        }
        Invocation::new(self_exe.display().to_string())
    }
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_strings_map_to_hosts() {
        assert_eq!(Host::from_os("linux"), Host::Linux);
        assert_eq!(Host::from_os("windows"), Host::Windows);
        assert_eq!(Host::from_os("macos"), Host::MacOs);
        assert_eq!(Host::from_os("freebsd"), Host::Other);
    }

    #[test]
    fn generator_backend_per_host() {
        assert_eq!(Host::Linux.generator(), "gmake2");
        assert_eq!(Host::Windows.generator(), "vs2022");
        assert_eq!(Host::MacOs.generator(), "xcode4");
    }

    #[test]
    fn linux_reinvokes_current_exe() {
        let inv = Host::Linux.dispatcher(Path::new("/usr/local/bin/autogen"));
        assert_eq!(inv.program, "/usr/local/bin/autogen");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn only_linux_packages_debs() {
        assert!(Host::Linux.can_package_deb());
        assert!(!Host::Windows.can_package_deb());
        assert!(!Host::MacOs.can_package_deb());
    }
}
