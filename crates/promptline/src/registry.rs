//! Command registration and resolution
//!
//! The registry owns every registered command. Commands live in a flat list
//! (registration order, for listings) with a lowercase full-path index over
//! every name and alias, plus a children index for the subcommand hierarchy.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::command::{validate_name, Command};
use crate::error::{DispatchError, RegistryError};

/// The command registry.
///
/// # Example
///
/// ```
/// use promptline::{Command, Invocation, Registry};
///
/// fn noop(_inv: &Invocation<'_>) -> anyhow::Result<()> {
///     Ok(())
/// }
///
/// let mut registry = Registry::new();
/// registry.register(Command::new("example", noop).alias("ex")).unwrap();
/// registry.register_under("example", Command::new("print", noop)).unwrap();
///
/// assert!(registry.get("ex").is_some());
/// assert!(registry.get("example print").is_some());
/// ```
#[derive(Default)]
pub struct Registry {
    /// All commands, in registration order
    commands: Vec<Arc<Command>>,

    /// Lowercase full path (including alias paths) to command
    index: IndexMap<String, Arc<Command>>,

    /// Parent full path to subcommands, in registration order
    children: HashMap<String, Vec<Arc<Command>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Registration
    // ═══════════════════════════════════════════════════════════════════

    /// Register a top-level command.
    ///
    /// Validates every name, checks for conflicts among top-level commands,
    /// and runs the command's load hook. Any failure leaves the registry
    /// unchanged.
    pub fn register(&mut self, cmd: Command) -> Result<Arc<Command>, RegistryError> {
        self.insert(cmd, None)
    }

    /// Register a subcommand under an existing command.
    ///
    /// `parent` may be any name or alias path; the subcommand is indexed
    /// under the parent's canonical full path.
    pub fn register_under(
        &mut self,
        parent: &str,
        cmd: Command,
    ) -> Result<Arc<Command>, RegistryError> {
        let parent = self
            .get(parent)
            .ok_or_else(|| RegistryError::UnknownParent {
                path: parent.to_string(),
            })?
            .full_path();
        self.insert(cmd, Some(parent))
    }

    fn insert(
        &mut self,
        mut cmd: Command,
        parent: Option<String>,
    ) -> Result<Arc<Command>, RegistryError> {
        for name in cmd.names() {
            if let Err(reason) = validate_name(name) {
                return Err(RegistryError::InvalidName {
                    name: name.to_string(),
                    reason,
                });
            }
        }

        // Names are canonicalized to lowercase; lookups lowercase the input
        cmd.name = cmd.name.to_ascii_lowercase();
        for alias in &mut cmd.aliases {
            *alias = alias.to_ascii_lowercase();
        }
        cmd.parent = parent;

        let scope = || match cmd.parent() {
            Some(parent) => format!("`{}`", parent),
            None => "the top level".to_string(),
        };
        let mut seen = Vec::new();
        for name in cmd.names() {
            if seen.contains(&name) {
                return Err(RegistryError::NameConflict {
                    name: name.to_string(),
                    scope: scope(),
                });
            }
            seen.push(name);
        }
        let prefix = match cmd.parent() {
            Some(parent) => format!("{} ", parent),
            None => String::new(),
        };
        for name in cmd.names() {
            if self.index.contains_key(&format!("{}{}", prefix, name)) {
                return Err(RegistryError::NameConflict {
                    name: name.to_string(),
                    scope: scope(),
                });
            }
        }

        if let Some(hook) = &cmd.load_hook {
            hook().map_err(|source| RegistryError::LoadHookFailed {
                name: cmd.name.clone(),
                source,
            })?;
        }

        // No failure past this point
        let cmd = Arc::new(cmd);
        for name in cmd.names() {
            self.index
                .insert(format!("{}{}", prefix, name), cmd.clone());
        }
        if let Some(parent) = cmd.parent() {
            self.children
                .entry(parent.to_string())
                .or_default()
                .push(cmd.clone());
        }
        self.commands.push(cmd.clone());

        log::info!("registered {}", cmd);
        Ok(cmd)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a command by name, alias, or full path. Case-insensitive.
    pub fn get(&self, path: &str) -> Option<&Arc<Command>> {
        self.index.get(&normalize(path))
    }

    /// Look up a direct subcommand of a command.
    pub fn subcommand(&self, cmd: &Command, name: &str) -> Option<&Arc<Command>> {
        self.get(&format!("{} {}", cmd.full_path(), name))
    }

    /// Resolve an input line's tokens to a command and its leftover tokens.
    ///
    /// The first token names a top-level command; resolution then descends
    /// while the next token names a subcommand. A trailing `*` on a token
    /// dispatches to that command and suppresses further descent (so a
    /// subcommand name can be passed as an ordinary argument). Whatever is
    /// left over goes to the command's flag mapper.
    pub fn resolve<'t>(
        &self,
        tokens: &'t [String],
    ) -> Result<(Arc<Command>, &'t [String]), DispatchError> {
        let first = tokens.first().ok_or_else(|| DispatchError::UnknownCommand {
            name: String::new(),
        })?;
        let (name, no_sub) = strip_star(first);
        let mut cmd = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand {
                name: first.clone(),
            })?
            .clone();

        let mut rest = 1;
        let mut descend = !no_sub;
        while descend {
            let Some(token) = tokens.get(rest) else { break };
            let (name, stop) = strip_star(token);
            match self.subcommand(&cmd, name) {
                Some(sub) => {
                    cmd = sub.clone();
                    rest += 1;
                    descend = !stop;
                }
                None => break,
            }
        }
        Ok((cmd, &tokens[rest..]))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration
    // ═══════════════════════════════════════════════════════════════════

    /// All commands, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.iter()
    }

    /// Top-level commands, in registration order.
    pub fn toplevel(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.iter().filter(|c| c.parent().is_none())
    }

    /// Direct subcommands of a command, in registration order.
    pub fn subcommands(&self, cmd: &Command) -> &[Arc<Command>] {
        self.children
            .get(&cmd.full_path())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a command has any subcommands.
    pub fn has_subcommands(&self, cmd: &Command) -> bool {
        !self.subcommands(cmd).is_empty()
    }

    /// All transitive subcommands, depth-first, with their path prefix
    /// relative to `cmd` (empty for direct children).
    pub fn walk(&self, cmd: &Command) -> Vec<(String, Arc<Command>)> {
        let mut out = Vec::new();
        for sub in self.subcommands(cmd) {
            out.push((String::new(), sub.clone()));
            for (prefix, deep) in self.walk(sub) {
                let prefix = if prefix.is_empty() {
                    sub.name().to_string()
                } else {
                    format!("{} {}", sub.name(), prefix)
                };
                out.push((prefix, deep));
            }
        }
        out
    }

    /// Number of registered commands (subcommands included).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Lowercase a path and collapse its whitespace to single spaces.
fn normalize(path: &str) -> String {
    path.split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip a single trailing `*`, reporting whether one was present.
fn strip_star(token: &str) -> (&str, bool) {
    match token.strip_suffix('*') {
        Some(stripped) => (stripped, true),
        None => (token, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize("Example  Print"), "example print");
        assert_eq!(normalize("  quit "), "quit");
    }

    #[test]
    fn test_strip_star() {
        assert_eq!(strip_star("example*"), ("example", true));
        assert_eq!(strip_star("example"), ("example", false));
    }
}
