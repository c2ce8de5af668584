//! Shell dispatch and run loop tests

use std::collections::VecDeque;
use std::sync::Mutex;

use promptline::*;

/// Scripted line source: pops pre-baked lines, then reports end of input.
struct Script(VecDeque<String>);

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self(lines.iter().map(|s| s.to_string()).collect())
    }
}

impl LineSource for Script {
    fn read_line(&mut self, _prompt: &str) -> std::io::Result<Option<String>> {
        Ok(self.0.pop_front())
    }
}

fn noop(_inv: &Invocation<'_>) -> anyhow::Result<()> {
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Built-ins
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_with_builtins_registers_expected_names() {
    let shell = Shell::with_builtins().unwrap();
    let registry = shell.registry();

    for name in ["help", "quit", "exit", "close", "clear", "cls", "reload", "rel"] {
        assert!(registry.get(name).is_some(), "missing builtin `{}`", name);
    }
}

#[test]
fn test_quit_builtin_requests_quit() {
    let shell = Shell::with_builtins().unwrap();
    shell.eval_line("quit").unwrap();
    assert!(shell.context().quit_requested());
    assert!(!shell.context().reload_requested());
}

#[test]
fn test_quit_aliases_work() {
    let shell = Shell::with_builtins().unwrap();
    shell.eval_line("EXIT").unwrap();
    assert!(shell.context().quit_requested());
}

#[test]
fn test_reload_builtin_requests_reload_and_quit() {
    let shell = Shell::with_builtins().unwrap();
    shell.eval_line("rel").unwrap();
    assert!(shell.context().quit_requested());
    assert!(shell.context().reload_requested());
}

#[test]
fn test_help_builtin_accepts_known_commands() {
    let shell = Shell::with_builtins().unwrap();

    shell.eval_line("help").unwrap();
    shell.eval_line("help quit").unwrap();

    let err = shell.eval_line("help bogus").unwrap_err();
    assert!(matches!(err, ShellError::Command { name, .. } if name == "help"));
}

#[test]
fn test_help_builtin_walks_subcommands() {
    let mut shell = Shell::with_builtins().unwrap();
    shell
        .registry_mut()
        .register(Command::new("example", noop))
        .unwrap();
    shell
        .registry_mut()
        .register_under("example", Command::new("print", noop))
        .unwrap();

    shell.eval_line("help example print").unwrap();
    assert!(shell.eval_line("help example ghost").is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Dispatch
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_line_blank_is_noop() {
    let shell = Shell::new();
    shell.eval_line("").unwrap();
    shell.eval_line("   \t ").unwrap();
}

#[test]
fn test_eval_line_unknown_command() {
    let shell = Shell::new();

    let err = shell.eval_line("bogus").unwrap_err();
    assert!(matches!(
        err,
        ShellError::Dispatch(DispatchError::UnknownCommand { .. })
    ));
    // The message points the user at help
    assert!(err.to_string().contains("help"));
}

#[test]
fn test_dispatch_passes_positional_arguments() {
    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn capture(inv: &Invocation<'_>) -> anyhow::Result<()> {
        CAPTURED
            .lock()
            .unwrap()
            .extend(inv.args.positional.iter().cloned());
        Ok(())
    }

    let mut shell = Shell::new();
    shell
        .registry_mut()
        .register(Command::new("echo", capture))
        .unwrap();

    shell.eval_line("echo one two three").unwrap();
    assert_eq!(*CAPTURED.lock().unwrap(), ["one", "two", "three"]);
}

#[test]
fn test_dispatch_maps_flags_for_subcommands() {
    static CAPTURED: Mutex<Option<Args>> = Mutex::new(None);

    fn capture(inv: &Invocation<'_>) -> anyhow::Result<()> {
        *CAPTURED.lock().unwrap() = Some(inv.args.clone());
        Ok(())
    }

    let mut shell = Shell::new();
    shell
        .registry_mut()
        .register(Command::new("example", noop))
        .unwrap();
    shell
        .registry_mut()
        .register_under(
            "example",
            Command::new("types", capture)
                .with_mapper(TypedMapper)
                .param(ParamSpec::required("a", ParamKind::Int))
                .param(ParamSpec::optional("b", ParamKind::Int, ArgValue::Int(5)))
                .param(ParamSpec::required("c", ParamKind::Bool)),
        )
        .unwrap();

    shell.eval_line("example types a=3 c=yes").unwrap();

    let captured = CAPTURED.lock().unwrap();
    let args = captured.as_ref().unwrap();
    assert_eq!(args.flag("a"), Some(&ArgValue::Int(3)));
    assert_eq!(args.flag("b"), Some(&ArgValue::Int(5)));
    assert_eq!(args.flag("c"), Some(&ArgValue::Bool(true)));
}

#[test]
fn test_mapper_errors_surface_as_map_errors() {
    let mut shell = Shell::new();
    shell
        .registry_mut()
        .register(
            Command::new("set", noop)
                .with_mapper(TypedMapper)
                .param(ParamSpec::required("n", ParamKind::Int)),
        )
        .unwrap();

    let err = shell.eval_line("set n=abc").unwrap_err();
    assert!(matches!(
        err,
        ShellError::Map(MapError::InvalidValue { .. })
    ));
}

#[test]
fn test_star_passes_subcommand_name_as_argument() {
    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn capture(inv: &Invocation<'_>) -> anyhow::Result<()> {
        CAPTURED
            .lock()
            .unwrap()
            .extend(inv.args.positional.iter().cloned());
        Ok(())
    }

    let mut shell = Shell::new();
    shell
        .registry_mut()
        .register(Command::new("example", capture))
        .unwrap();
    shell
        .registry_mut()
        .register_under("example", Command::new("print", noop))
        .unwrap();

    shell.eval_line("example* print").unwrap();
    assert_eq!(*CAPTURED.lock().unwrap(), ["print"]);
}

#[test]
fn test_failing_handler_is_wrapped_with_command_name() {
    fn fail(_inv: &Invocation<'_>) -> anyhow::Result<()> {
        anyhow::bail!("boom")
    }

    let mut shell = Shell::new();
    shell
        .registry_mut()
        .register(Command::new("explode", fail))
        .unwrap();

    let err = shell.eval_line("explode").unwrap_err();
    assert!(matches!(err, ShellError::Command { ref name, .. } if name == "explode"));
    assert!(err.to_string().contains("explode"));
}

// ═══════════════════════════════════════════════════════════════════════
// Run Loop
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_run_stops_on_quit() {
    let shell = Shell::with_builtins().unwrap();
    let mut source = Script::new(&["quit", "help"]);

    let outcome = shell.run(&mut source).unwrap();
    assert_eq!(outcome, ShellOutcome::Quit);
    // The loop stopped before consuming the remaining line
    assert_eq!(source.0.len(), 1);
}

#[test]
fn test_run_reports_reload() {
    let shell = Shell::with_builtins().unwrap();
    let mut source = Script::new(&["reload"]);

    assert_eq!(shell.run(&mut source).unwrap(), ShellOutcome::Reload);
}

#[test]
fn test_run_ends_on_exhausted_input() {
    let shell = Shell::with_builtins().unwrap();
    let mut source = Script::new(&[]);

    assert_eq!(shell.run(&mut source).unwrap(), ShellOutcome::Quit);
}

#[test]
fn test_run_skips_blank_lines_and_survives_errors() {
    static CALLS: Mutex<usize> = Mutex::new(0);

    fn count(_inv: &Invocation<'_>) -> anyhow::Result<()> {
        *CALLS.lock().unwrap() += 1;
        Ok(())
    }

    let mut shell = Shell::with_builtins().unwrap();
    shell
        .registry_mut()
        .register(Command::new("tick", count))
        .unwrap();

    let mut source = Script::new(&["", "tick", "bogus", "   ", "tick", "quit"]);
    let outcome = shell.run(&mut source).unwrap();

    assert_eq!(outcome, ShellOutcome::Quit);
    assert_eq!(*CALLS.lock().unwrap(), 2);
}

#[test]
fn test_run_resets_stale_flags() {
    let shell = Shell::with_builtins().unwrap();

    let mut source = Script::new(&["quit"]);
    assert_eq!(shell.run(&mut source).unwrap(), ShellOutcome::Quit);

    // A second run starts clean and loops again
    let mut source = Script::new(&["quit"]);
    assert_eq!(shell.run(&mut source).unwrap(), ShellOutcome::Quit);
}
