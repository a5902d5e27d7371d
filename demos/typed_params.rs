//! Typed parameter walkthrough.
//!
//! Registers commands with unions, optionals, choices, and lists, then
//! runs a sequence of command lines showing how tokens coerce — including
//! lines that fail on purpose.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cmdshell-demos --example typed_params
//! ```

use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec, Value};
use cmdshell_runtime::Shell;
use serde_json::json;

fn install(shell: &mut Shell) {
    shell
        .register(
            CommandSpec::new("flexible")
                .with_help("int | float | string, resolved in declared order")
                .with_param(ParamSpec::required(
                    "value",
                    TypeSpec::union([TypeSpec::Int, TypeSpec::Float, TypeSpec::Str]),
                )),
            |context, args| {
                let value = args.get("value");
                let kind = match value {
                    Value::Number(n) if n.is_i64() => "int",
                    Value::Number(_) => "float",
                    _ => "string",
                };
                context.print(&format!("{value} bound as {kind}"));
                Ok(Value::Null)
            },
        )
        .expect("demo registration");

    shell
        .register(
            CommandSpec::new("maybe")
                .with_help("Optional parameter with empty markers")
                .with_param(ParamSpec::with_default(
                    "name",
                    TypeSpec::optional(TypeSpec::Str),
                    json!(null),
                )),
            |context, args| {
                match args.get("name").as_str() {
                    Some(name) => context.print(&format!("Hello, {name}!")),
                    None => context.print("No name provided"),
                }
                Ok(Value::Null)
            },
        )
        .expect("demo registration");

    shell
        .register(
            CommandSpec::new("volume")
                .with_help("Choice parameter mapped to numeric values")
                .with_param(ParamSpec::with_default(
                    "level",
                    TypeSpec::choice([
                        ("quiet", json!(0)),
                        ("normal", json!(5)),
                        ("loud", json!(11)),
                    ]),
                    json!(5),
                )),
            |_, args| Ok(args.get("level").clone()),
        )
        .expect("demo registration");

    shell
        .register(
            CommandSpec::new("average")
                .with_help("List parameter split on commas")
                .with_param(ParamSpec::required("values", TypeSpec::list(TypeSpec::Float))),
            |_, args| {
                let values: Vec<f64> = args
                    .get("values")
                    .as_array()
                    .map(|items| items.iter().filter_map(Value::as_f64).collect())
                    .unwrap_or_default();
                if values.is_empty() {
                    return Ok(Value::Null);
                }
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                Ok(json!(mean))
            },
        )
        .expect("demo registration");
}

fn main() {
    let mut shell = Shell::new();
    install(&mut shell);

    let lines = [
        "flexible 123",
        "flexible 123.45",
        "flexible hello",
        "maybe",
        "maybe Alice",
        "maybe --name none",
        "volume loud",
        "volume",
        "average 1,2,3,4",
        // These fail on purpose; the shell reports and carries on.
        "volume deafening",
        "average 1,two,3",
        "flexible",
    ];

    for line in lines {
        println!("$ {line}");
        let _ = shell.execute(line);
        println!();
    }
}
