//! Interactive promptline shell with the demo command set.

mod demo;
mod logging;

use anyhow::Result;
use clap::Parser;
use promptline::{LineSource, Shell, ShellOutcome};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Parser, Debug)]
#[command(name = "promptline", version, about = "An interactive command prompt")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,
}

/// `LineSource` over a rustyline editor with history.
struct ReadlineSource {
    editor: DefaultEditor,
}

impl ReadlineSource {
    fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // Ctrl-C clears the line, Ctrl-D ends the session
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(std::io::Error::other(err)),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.no_color);

    let mut shell = Shell::with_builtins()?;
    demo::install(shell.registry_mut())?;

    let mut source = ReadlineSource::new()?;
    match shell.run(&mut source)? {
        ShellOutcome::Reload => reexec(),
        ShellOutcome::Quit => Ok(()),
    }
}

/// Re-execute the current binary with the same arguments.
#[cfg(unix)]
fn reexec() -> Result<()> {
    use std::os::unix::process::CommandExt;

    let exe = std::env::current_exe()?;
    let err = std::process::Command::new(exe)
        .args(std::env::args_os().skip(1))
        .exec();
    // exec only returns on failure
    Err(err.into())
}

#[cfg(not(unix))]
fn reexec() -> Result<()> {
    Ok(())
}
