//! Error types for Promptline operations

use thiserror::Error;

/// Errors raised while registering commands.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A command or alias name failed validation.
    #[error("invalid command name `{name}`: {reason}")]
    InvalidName {
        /// The offending name
        name: String,
        /// Why the name was rejected
        reason: &'static str,
    },

    /// A name or alias is already bound in the same scope.
    #[error("command naming conflict: `{name}` is already bound under {scope}")]
    NameConflict {
        /// The conflicting name
        name: String,
        /// The scope holding the existing binding (`the top level` or a parent path)
        scope: String,
    },

    /// The named parent command does not exist.
    #[error("unknown parent command `{path}`")]
    UnknownParent {
        /// The parent path that failed to resolve
        path: String,
    },

    /// The command's load hook returned an error.
    #[error("load hook of `{name}` failed")]
    LoadHookFailed {
        /// The command being registered
        name: String,
        /// The hook's error
        #[source]
        source: anyhow::Error,
    },
}

/// Errors raised while resolving an input line to a command.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The first token named no registered command.
    #[error("unknown command `{name}`; run \"help\" to see the list of commands")]
    UnknownCommand {
        /// The token that failed to resolve
        name: String,
    },

    /// An explicitly requested subcommand does not exist.
    #[error("`{parent}` has no subcommand `{name}`")]
    UnknownSubcommand {
        /// Full path of the parent command
        parent: String,
        /// The subcommand name that failed to resolve
        name: String,
    },
}

/// Errors raised while mapping raw tokens onto command parameters.
#[derive(Error, Debug)]
pub enum MapError {
    /// A token named a flag the command does not declare.
    #[error("unknown flag `{flag}`")]
    UnknownFlag {
        /// The flag name as typed
        flag: String,
    },

    /// The same flag was assigned twice.
    #[error("duplicate flag `{flag}`")]
    DuplicateFlag {
        /// The flag assigned more than once
        flag: String,
    },

    /// A required flag (one without a default) was never assigned.
    #[error("missing required flag `{flag}`")]
    MissingFlag {
        /// The missing flag
        flag: String,
    },

    /// A flag value could not be parsed as the declared kind.
    #[error("invalid value `{got}` for flag `{flag}`: expected {expected}")]
    InvalidValue {
        /// The flag being assigned
        flag: String,
        /// What the declared kind expects
        expected: &'static str,
        /// The raw value as typed
        got: String,
    },

    /// A parameter's declared kind is outside what the mapper can produce.
    #[error("flag `{flag}` is declared as {kind}, which {mapper} cannot map")]
    KindMismatch {
        /// The declared parameter
        flag: String,
        /// The declared kind's name
        kind: &'static str,
        /// The mapper that rejected it
        mapper: &'static str,
    },

    /// A keyword-only mapper received a token without a `name=value` form.
    #[error("unexpected positional argument `{token}`")]
    UnexpectedPositional {
        /// The offending token
        token: String,
    },
}

/// Top-level error type for shell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Registration failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Command resolution failure
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Flag mapping failure
    #[error(transparent)]
    Map(#[from] MapError),

    /// A command handler returned an error.
    #[error("command `{name}` failed: {source}")]
    Command {
        /// Full path of the failing command
        name: String,
        /// The handler's error
        #[source]
        source: anyhow::Error,
    },
}

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
