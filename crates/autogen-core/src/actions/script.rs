use std::path::{Path, PathBuf};

use super::{Action, Context};
use crate::error::{AutogenError, Result};
use crate::host::Host;
use crate::runner::{run_step, Invocation};

/// An action backed by a script file in the actions directory, found by
/// naming convention (`<actions_dir>/<name>` or `<actions_dir>/<name>.<ext>`).
pub struct ScriptAction {
    name: String,
    path: PathBuf,
}

impl ScriptAction {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The invocation for this script on `host`, arguments forwarded as given.
    pub fn invocation(&self, host: Host, args: &[String]) -> Invocation {
        let script = self.path.display().to_string();
        let ext = self.path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let base = match ext {
            "py" => Invocation::new(host.python()).arg(script),
            "sh" => Invocation::new("sh").arg(script),
            "cmd" | "bat" => Invocation::new("cmd").args(["/C", script.as_str()]),
            _ => Invocation::new(script),
        };
        base.args(args.iter().cloned())
    }
}

impl Action for ScriptAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("script {}", self.path.display())
    }

    fn run(&self, ctx: &Context<'_>, args: &[String]) -> Result<()> {
        let inv = self.invocation(ctx.host, args).current_dir(&ctx.root);
        run_step(ctx.runner, &inv)
    }
}

/// Look for the script backing `name` in `dir`.
///
/// Returns `Ok(None)` when nothing matches and an error when several files
/// share the stem (`build.py` and `build.sh`).
pub fn find_script(dir: &Path, name: &str) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let mut found: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && script_name(&path).as_deref() == Some(name) {
            found.push(path);
        }
    }
    found.sort();
    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        _ => Err(AutogenError::AmbiguousScript {
            name: name.to_string(),
            candidates: found
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// All scripts in `dir`, as `(action name, path)`, sorted by name.
pub fn discover_scripts(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = script_name(&path) {
            scripts.push((name, path));
        }
    }
    scripts.sort();
    Ok(scripts)
}

/// Action name a script file answers to: its file stem. Hidden files and
/// stems that are not valid action names are skipped.
fn script_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.starts_with('.') || crate::paths::validate_action_name(stem).is_err() {
        return None;
    }
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{args, context};
    use crate::runner::RecordingRunner;
    use tempfile::TempDir;

    #[test]
    fn interpreter_follows_extension() {
        let a = args(&["--flag", "x y"]);
        let py = ScriptAction::new("lint", "/p/scripts/actions/lint.py");
        let inv = py.invocation(Host::Linux, &a);
        assert_eq!(inv.program, "python3");
        assert_eq!(inv.args, ["/p/scripts/actions/lint.py", "--flag", "x y"]);
        assert_eq!(py.invocation(Host::Windows, &a).program, "py");

        let sh = ScriptAction::new("lint", "/p/lint.sh");
        assert_eq!(sh.invocation(Host::Linux, &[]).program, "sh");

        let bare = ScriptAction::new("lint", "/p/lint");
        let inv = bare.invocation(Host::Linux, &a);
        assert_eq!(inv.program, "/p/lint");
        assert_eq!(inv.args, ["--flag", "x y"]);
    }

    #[test]
    fn find_script_by_stem() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("deploy.sh"), "").unwrap();
        std::fs::write(dir.path().join("deploy-all.sh"), "").unwrap();

        let found = find_script(dir.path(), "deploy").unwrap();
        assert_eq!(found, Some(dir.path().join("deploy.sh")));
        assert_eq!(find_script(dir.path(), "Deploy").unwrap(), None);
        assert_eq!(find_script(dir.path(), "missing").unwrap(), None);
    }

    #[test]
    fn find_script_rejects_ambiguity() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("deploy.sh"), "").unwrap();
        std::fs::write(dir.path().join("deploy.py"), "").unwrap();
        assert!(matches!(
            find_script(dir.path(), "deploy").unwrap_err(),
            AutogenError::AmbiguousScript { .. }
        ));
    }

    #[test]
    fn discover_skips_hidden_and_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.sh"), "").unwrap();
        std::fs::write(dir.path().join("a.py"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let names: Vec<String> = discover_scripts(dir.path())
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert!(discover_scripts(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn run_forwards_args_unchanged() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let ctx = context(dir.path(), Host::Linux, &runner);
        let action = ScriptAction::new("deploy", dir.path().join("deploy.sh"));

        action.run(&ctx, &args(&["-x", "--", "a b"])).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[1..], ["-x", "--", "a b"]);
    }
}
