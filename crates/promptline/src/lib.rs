//! # Promptline
//!
//! An embeddable interactive command shell.
//!
//! Promptline lets an application register named commands (with aliases,
//! descriptions, and typed flag parameters) and then run a read-eval loop
//! over any line source. Each input line is resolved through the command
//! hierarchy, the remaining tokens are mapped onto the command's declared
//! parameters by a pluggable [`FlagMapper`], and the command's handler is
//! invoked.
//!
//! ## Architecture
//!
//! - **Registry**: command registration, aliases, subcommand hierarchy
//! - **Mapper**: raw tokens to named, typed arguments
//! - **Shell**: the prompt loop, dispatch, and built-in commands
//! - **Help**: rendered help text for the registered command set
//!
//! ## Example
//!
//! ```
//! use promptline::{Command, Invocation, Shell};
//!
//! fn greet(inv: &Invocation<'_>) -> anyhow::Result<()> {
//!     println!("hello {}", inv.args.positional.join(" "));
//!     Ok(())
//! }
//!
//! let mut shell = Shell::with_builtins().unwrap();
//! shell
//!     .registry_mut()
//!     .register(Command::new("greet", greet).describe("Say hello."))
//!     .unwrap();
//! shell.eval_line("greet world").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod command;
pub mod context;
pub mod error;
pub mod help;
pub mod mapper;
pub mod registry;
pub mod shell;

// Re-export main types
pub use args::{is_truthy, ArgValue, Args, ParamKind, ParamSpec};
pub use command::{Command, Handler, Invocation, LoadHook};
pub use context::ShellContext;
pub use error::{DispatchError, MapError, RegistryError, Result, ShellError};
pub use mapper::{BoolMapper, FlagMapper, Passthrough, StringMapper, TypedMapper};
pub use registry::Registry;
pub use shell::{install_builtins, LineSource, Shell, ShellOutcome};

/// Promptline version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
