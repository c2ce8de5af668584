//! Help text rendering
//!
//! Everything here renders to `String`; printing is the caller's concern,
//! which keeps the output testable and lets hosts route it elsewhere.

use crate::command::Command;
use crate::registry::Registry;

/// Render the overview listing: a header plus one short line per top-level
/// command.
pub fn overview(registry: &Registry) -> String {
    let mut out = String::from("COMMANDS\n");
    for cmd in registry.toplevel() {
        out.push_str(&short_line(registry, cmd, "", true));
        out.push('\n');
    }
    out
}

/// Render a command's one-line summary.
///
/// `name* (alias, ...) - description`, where the `*` marks commands with
/// subcommands (suppressed when `star` is false, e.g. in a full tree that
/// already shows them).
pub fn short_line(registry: &Registry, cmd: &Command, prefix: &str, star: bool) -> String {
    let mut line = String::new();
    if !prefix.is_empty() {
        line.push_str(prefix);
        line.push(' ');
    }
    line.push_str(cmd.name());
    if star && registry.has_subcommands(cmd) {
        line.push('*');
    }
    if !cmd.aliases().is_empty() {
        line.push_str(&format!(" ({})", cmd.aliases().join(", ")));
    }
    if let Some(description) = cmd.description() {
        line.push_str(&format!(" - {}", description));
    }
    line
}

/// Render a command's full help text.
///
/// Shows the full path, aliases, parent, the long description (falling back
/// to the short one), and the subcommand listing. With `all` set, the
/// listing expands to the whole nested tree with path prefixes.
pub fn command(registry: &Registry, cmd: &Command, all: bool) -> String {
    let mut out = String::new();
    out.push_str(&cmd.full_path());
    out.push('\n');

    if !cmd.aliases().is_empty() {
        out.push_str(&format!("Aliases: {}\n", cmd.aliases().join(", ")));
    }
    if let Some(parent) = cmd.parent() {
        out.push_str(&format!("Subcommand of {}\n", parent));
    }

    match (cmd.long_description(), cmd.description()) {
        (Some(long), _) => out.push_str(long),
        (None, Some(short)) => out.push_str(short),
        (None, None) => out.push_str("No description found"),
    }
    out.push('\n');

    if registry.has_subcommands(cmd) {
        out.push_str("\nSubcommands:\n");
        if all {
            for (prefix, sub) in registry.walk(cmd) {
                out.push_str(&short_line(registry, &sub, &prefix, false));
                out.push('\n');
            }
        } else {
            for sub in registry.subcommands(cmd) {
                out.push_str(&short_line(registry, sub, "", true));
                out.push('\n');
            }
        }
    }
    out
}
