//! Unwrapping of decorator/proxy commands.
//!
//! Decorators expose the wrapped instance through
//! [`DbCommand::inner_command`]; the walk recurses to the innermost (terminal)
//! driver command. The walk runs on every call because each call may be
//! unwrapping a different instance chain of the same type shape.

use crate::command::DbCommand;

/// Run `f` against the terminal command behind zero or more decorators.
pub fn with_terminal<R>(command: &mut dyn DbCommand, f: impl FnOnce(&mut dyn DbCommand) -> R) -> R {
    walk(command, f, 0)
}

fn walk<R>(
    command: &mut dyn DbCommand,
    f: impl FnOnce(&mut dyn DbCommand) -> R,
    depth: usize,
) -> R {
    match command.inner_command() {
        Some(inner) => walk(inner, f, depth + 1),
        None => {
            if depth > 0 {
                tracing::trace!(depth, "unwrapped decorated command");
            }
            f(command)
        }
    }
}
