//! Resolve an action name and run it.
//!
//! Resolution order: the [`Registry`], then a script in the actions
//! directory. Nothing is cached between calls and a name that resolves to
//! neither runs nothing.

use crate::actions::{script, Action, Context, ScriptAction};
use crate::error::{AutogenError, Result};
use crate::paths;
use crate::registry::Registry;

pub fn dispatch(ctx: &Context<'_>, registry: &Registry, name: &str, args: &[String]) -> Result<()> {
    if paths::validate_action_name(name).is_err() {
        return Err(unknown(ctx, registry, name));
    }

    if let Some(action) = registry.get(name) {
        tracing::info!(action = name, ?args, "dispatching built-in action");
        return action.run(ctx, args);
    }

    let actions_dir = ctx.config.actions_dir(&ctx.root);
    match script::find_script(&actions_dir, name)? {
        Some(path) => {
            tracing::info!(action = name, script = %path.display(), ?args, "dispatching script");
            ScriptAction::new(name, path).run(ctx, args)
        }
        None => Err(unknown(ctx, registry, name)),
    }
}

fn unknown(ctx: &Context<'_>, registry: &Registry, name: &str) -> AutogenError {
    let available = registry
        .list(&ctx.config.actions_dir(&ctx.root))
        .map(|rows| rows.into_iter().map(|r| r.name).collect::<Vec<_>>())
        .unwrap_or_else(|_| registry.names().iter().map(|n| n.to_string()).collect());
    AutogenError::UnknownAction {
        name: name.to_string(),
        available: available.join(", "),
    }
}
