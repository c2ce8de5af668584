//! Command metadata and handlers

use std::fmt;
use std::sync::Arc;

use crate::args::{Args, ParamSpec};
use crate::context::ShellContext;
use crate::mapper::{FlagMapper, Passthrough};
use crate::registry::Registry;

/// Type alias for command handler pointers.
pub type Handler = Arc<dyn Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync>;

/// Type alias for registration-time load hooks.
pub type LoadHook = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Everything a handler gets to see for one command invocation.
pub struct Invocation<'a> {
    /// Shared shell state (quit/reload flags)
    pub ctx: &'a ShellContext,

    /// The registry the command was resolved from (read-only)
    pub registry: &'a Registry,

    /// The resolved command
    pub command: &'a Command,

    /// The mapped arguments
    pub args: &'a Args,
}

/// A registered (or registerable) command.
///
/// Built with builder-style methods and handed to
/// [`Registry::register`](crate::Registry::register); the registry validates
/// names and fills in the parent path.
///
/// # Example
///
/// ```
/// use promptline::{Command, Invocation, ParamKind, ParamSpec, StringMapper};
///
/// fn greet(inv: &Invocation<'_>) -> anyhow::Result<()> {
///     println!("hello {}", inv.args.flag("name").unwrap());
///     Ok(())
/// }
///
/// let cmd = Command::new("greet", greet)
///     .alias("hi")
///     .describe("Say hello.")
///     .with_mapper(StringMapper)
///     .param(ParamSpec::required("name", ParamKind::Str));
/// assert_eq!(cmd.name(), "greet");
/// ```
#[derive(Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) parent: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) long_description: Option<String>,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) mapper: Arc<dyn FlagMapper>,
    pub(crate) load_hook: Option<LoadHook>,
    pub(crate) handler: Handler,
}

impl Command {
    /// Create a command with the default [`Passthrough`] mapper.
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            parent: None,
            description: None,
            long_description: None,
            params: Vec::new(),
            mapper: Arc::new(Passthrough),
            load_hook: None,
            handler: Arc::new(handler),
        }
    }

    /// Add an alternate name for the command.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the one-line description shown in command listings.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the detailed description shown by `help <command>`.
    pub fn long_describe(mut self, description: impl Into<String>) -> Self {
        self.long_description = Some(description.into());
        self
    }

    /// Declare a keyword parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Replace the flag mapper.
    pub fn with_mapper(mut self, mapper: impl FlagMapper + 'static) -> Self {
        self.mapper = Arc::new(mapper);
        self
    }

    /// Set a hook to run at registration time.
    ///
    /// A hook error aborts the registration.
    pub fn on_load(mut self, hook: impl Fn() -> anyhow::Result<()> + Send + Sync + 'static) -> Self {
        self.load_hook = Some(Arc::new(hook));
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    /// Primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate names, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Full path of the parent command, if this is a subcommand.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// One-line description, if set.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Detailed description, if set.
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    /// Declared keyword parameters.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The command's flag mapper.
    pub fn mapper(&self) -> &dyn FlagMapper {
        self.mapper.as_ref()
    }

    /// The command's handler.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Full path from the top level, space-separated.
    pub fn full_path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{} {}", parent, self.name),
            None => self.name.clone(),
        }
    }

    /// Primary name plus aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Command[{}{}]",
            self.full_path(),
            if self.aliases.is_empty() { "" } else { "*" }
        )
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Validate a command or alias name.
///
/// Names must be non-empty, ASCII, a single word, and free of `*` (which is
/// reserved for suppressing subcommand descent at the prompt).
pub(crate) fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if !name.is_ascii() {
        return Err("name is not ascii");
    }
    if name.split_whitespace().count() != 1 || name.len() != name.trim().len() {
        return Err("name must be a single word");
    }
    if name.contains('*') {
        return Err("name contains `*`");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_inv: &Invocation<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    #[test]
    fn test_validate_name_accepts_plain_words() {
        assert!(validate_name("help").is_ok());
        assert!(validate_name("other_arg").is_ok());
        assert!(validate_name("v2").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_bad_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("two words").is_err());
        assert!(validate_name(" padded").is_err());
        assert!(validate_name("star*").is_err());
        assert!(validate_name("héllo").is_err());
    }

    #[test]
    fn test_display_marks_aliased_commands() {
        let plain = Command::new("clear", noop);
        assert_eq!(plain.to_string(), "Command[clear]");

        let aliased = Command::new("quit", noop).alias("exit");
        assert_eq!(aliased.to_string(), "Command[quit*]");
    }

    #[test]
    fn test_full_path_includes_parent() {
        let mut cmd = Command::new("print", noop);
        assert_eq!(cmd.full_path(), "print");

        cmd.parent = Some("example".to_string());
        assert_eq!(cmd.full_path(), "example print");
    }
}
