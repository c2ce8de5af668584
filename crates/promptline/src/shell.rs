//! The read-eval loop and built-in commands

use crate::command::{Command, Invocation};
use crate::context::ShellContext;
use crate::error::{DispatchError, RegistryError, Result, ShellError};
use crate::help;
use crate::registry::Registry;

/// Why the run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Quit was requested or input ran out.
    Quit,

    /// A reload was requested; the host should re-execute itself.
    Reload,
}

/// Source of input lines for the run loop.
///
/// Implemented by the host over its line editor; `Ok(None)` means end of
/// input. Interactive sources should treat an interrupted line (Ctrl-C) as
/// an empty line rather than end of input.
pub trait LineSource {
    /// Read the next line, displaying `prompt`.
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// An interactive command shell: a [`Registry`] plus shared control state.
pub struct Shell {
    registry: Registry,
    ctx: ShellContext,
}

impl Shell {
    /// Create a shell with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            ctx: ShellContext::new(),
        }
    }

    /// Create a shell with the built-in commands registered.
    pub fn with_builtins() -> Result<Self> {
        let mut shell = Self::new();
        install_builtins(&mut shell.registry)?;
        Ok(shell)
    }

    /// The command registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The command registry, for registration.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The shared control state.
    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    /// Evaluate one input line.
    ///
    /// Blank input is a no-op. Otherwise the line is whitespace-split,
    /// resolved through the registry, mapped, and dispatched.
    pub fn eval_line(&self, line: &str) -> Result<()> {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Ok(());
        }
        self.eval_tokens(&tokens)
    }

    /// Evaluate pre-split input tokens.
    pub fn eval_tokens(&self, tokens: &[String]) -> Result<()> {
        let (cmd, rest) = self.registry.resolve(tokens)?;
        let args = cmd.mapper().map(cmd.params(), rest)?;

        log::debug!("dispatching {} with {} token(s)", cmd, rest.len());
        let invocation = Invocation {
            ctx: &self.ctx,
            registry: &self.registry,
            command: cmd.as_ref(),
            args: &args,
        };
        (cmd.handler)(&invocation).map_err(|source| ShellError::Command {
            name: cmd.full_path(),
            source,
        })
    }

    /// Run the prompt loop over `source` until quit is requested or input
    /// runs out.
    ///
    /// Command errors are printed and the loop continues; only input errors
    /// abort it.
    pub fn run(&self, source: &mut dyn LineSource) -> std::io::Result<ShellOutcome> {
        self.ctx.reset();
        loop {
            let Some(line) = source.read_line("> ")? else { break };
            if line.trim().is_empty() {
                continue;
            }

            if let Err(err) = self.eval_line(&line) {
                println!("Error: {}", err);
            }

            if self.ctx.quit_requested() {
                break;
            }
        }

        Ok(if self.ctx.reload_requested() {
            ShellOutcome::Reload
        } else {
            ShellOutcome::Quit
        })
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Commands
// ═══════════════════════════════════════════════════════════════════════

/// Register the built-in command set into a registry.
///
/// Installs `help`, `quit` (aliases `exit`, `close`), `clear` (alias
/// `cls`), and `reload` (alias `rel`).
pub fn install_builtins(registry: &mut Registry) -> std::result::Result<(), RegistryError> {
    registry.register(
        Command::new("help", builtin_help)
            .describe("Shows the help menu.")
            .long_describe(
                "Displays a description of the command.\n\
                 Run \"help <command name>\" to view a further description of a command.",
            ),
    )?;

    registry.register(
        Command::new("quit", builtin_quit)
            .alias("exit")
            .alias("close")
            .describe("Quit the command prompt.")
            .long_describe("Quits the command prompt and saves everything as necessary."),
    )?;

    registry.register(
        Command::new("clear", builtin_clear)
            .alias("cls")
            .describe("Clears the terminal.")
            .long_describe("Clears the terminal of all text."),
    )?;

    registry.register(
        Command::new("reload", builtin_reload)
            .alias("rel")
            .describe("Reload the program.")
            .long_describe(
                "Reloads the program with the same arguments supplied.\n\
                 This is mainly for development purposes.",
            ),
    )?;

    Ok(())
}

/// `help` with no arguments lists every top-level command; with arguments
/// it walks the command/subcommand chain and shows the full help text.
fn builtin_help(inv: &Invocation<'_>) -> anyhow::Result<()> {
    let registry = inv.registry;
    let names = &inv.args.positional;

    let Some(first) = names.first() else {
        print!("{}", help::overview(registry));
        return Ok(());
    };

    let mut cmd = registry
        .get(first)
        .ok_or_else(|| DispatchError::UnknownCommand {
            name: first.clone(),
        })?
        .clone();
    for name in &names[1..] {
        match registry.subcommand(&cmd, name) {
            Some(sub) => cmd = sub.clone(),
            None => {
                // Show the closest command we did find before failing
                print!("{}", help::command(registry, &cmd, false));
                return Err(DispatchError::UnknownSubcommand {
                    parent: cmd.full_path(),
                    name: name.clone(),
                }
                .into());
            }
        }
    }

    print!("{}", help::command(registry, &cmd, false));
    Ok(())
}

fn builtin_quit(inv: &Invocation<'_>) -> anyhow::Result<()> {
    inv.ctx.request_quit();
    println!("Stopping...");
    Ok(())
}

fn builtin_clear(_inv: &Invocation<'_>) -> anyhow::Result<()> {
    // Full terminal reset
    print!("\x1bc");
    Ok(())
}

fn builtin_reload(inv: &Invocation<'_>) -> anyhow::Result<()> {
    inv.ctx.request_reload();
    inv.ctx.request_quit();
    println!("Reloading...");
    Ok(())
}
