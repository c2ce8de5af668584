//! Demo command set for trying out the shell.
//!
//! `example` prints its positional arguments; its subcommands each exercise
//! one of the flag mappers.

use promptline::{
    ArgValue, BoolMapper, Command, Invocation, ParamKind, ParamSpec, Registry, RegistryError,
    StringMapper, TypedMapper,
};

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        Command::new("example", example_command)
            .alias("ex")
            .describe("An example command.")
            .long_describe("An example command. Prints out all arguments supplied to it.")
            .on_load(|| {
                log::debug!("example command set loaded");
                Ok(())
            }),
    )?;

    registry.register_under(
        "example",
        Command::new("value", flag_dump)
            .describe("Prints boolean flags.")
            .long_describe("Prints the boolean flags mapped from the supplied arguments.")
            .with_mapper(BoolMapper)
            .param(ParamSpec::optional("a", ParamKind::Bool, ArgValue::Bool(true)))
            .param(ParamSpec::required("b", ParamKind::Bool))
            .param(ParamSpec::required("other_arg", ParamKind::Bool)),
    )?;

    registry.register_under(
        "example",
        Command::new("print", flag_dump)
            .describe("Prints out the supplied arguments.")
            .long_describe("Prints out the values of all of the supplied flags and values.")
            .with_mapper(StringMapper)
            .param(ParamSpec::optional(
                "a",
                ParamKind::Str,
                ArgValue::Str("hello".to_string()),
            ))
            .param(ParamSpec::required("b", ParamKind::Str))
            .param(ParamSpec::required("c", ParamKind::Str))
            .param(ParamSpec::optional(
                "d",
                ParamKind::Str,
                ArgValue::Str("something else".to_string()),
            )),
    )?;

    registry.register_under(
        "example",
        Command::new("types", flag_dump)
            .describe("Prints typed flag values.")
            .with_mapper(TypedMapper)
            .param(ParamSpec::required("a", ParamKind::Int))
            .param(ParamSpec::optional("b", ParamKind::Int, ArgValue::Int(5)))
            .param(ParamSpec::required("c", ParamKind::Bool)),
    )?;

    Ok(())
}

fn example_command(inv: &Invocation<'_>) -> anyhow::Result<()> {
    let args = &inv.args.positional;
    println!("# Args: {}", args.len());
    for (i, arg) in args.iter().enumerate() {
        println!("Arg {} - {}", i, arg);
    }
    Ok(())
}

/// Shared handler for the mapper demos: print every mapped flag.
fn flag_dump(inv: &Invocation<'_>) -> anyhow::Result<()> {
    for (name, value) in &inv.args.flags {
        println!("{} = {}", name, value);
    }
    Ok(())
}
