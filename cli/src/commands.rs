//! The demonstration command set hosted by the `cmdshell` binary.
//!
//! These commands exercise the full surface of the framework: typed
//! positional and flag parameters, defaults, unions, choices, optionals,
//! lists, direct prints, and every auto-formatter shape.

use chrono::Local;
use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec, Value};
use cmdshell_runtime::{FormatMode, RegistryError, Shell};
use serde_json::json;

/// Registers the demo command set and seeds the host settings store.
pub fn install(shell: &mut Shell) -> Result<(), RegistryError> {
    let settings = shell.context_mut().settings_mut();
    settings.insert("theme".to_string(), json!("dark"));
    settings.insert("auto_save".to_string(), json!("true"));
    settings.insert("max_history".to_string(), json!("100"));

    shell.register(
        CommandSpec::new("hello")
            .with_help("Say hello to someone")
            .with_param(ParamSpec::with_default("name", TypeSpec::Str, json!("World")))
            .with_param(ParamSpec::with_default("count", TypeSpec::Int, json!(1)))
            .with_param(ParamSpec::with_default("uppercase", TypeSpec::Bool, json!(false))),
        |context, args| {
            let mut greeting = format!("Hello, {}!", args.get("name").as_str().unwrap_or(""));
            if args.get("uppercase").as_bool().unwrap_or(false) {
                greeting = greeting.to_uppercase();
            }
            for _ in 0..args.get("count").as_i64().unwrap_or(1) {
                context.print(&greeting);
            }
            Ok(Value::Null)
        },
    )?;

    shell.register(
        CommandSpec::new("add")
            .with_help("Add two numbers")
            .with_param(ParamSpec::required("a", TypeSpec::Int).with_help("First number"))
            .with_param(ParamSpec::required("b", TypeSpec::Int).with_help("Second number"))
            .with_param(
                ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false))
                    .with_help("Show detailed output"),
            ),
        |context, args| {
            let a = args.get("a").as_i64().unwrap_or(0);
            let b = args.get("b").as_i64().unwrap_or(0);
            if args.get("verbose").as_bool().unwrap_or(false) {
                context.print(&format!("Adding {a} and {b}..."));
                context.print(&format!("Result: {}", a + b));
                Ok(Value::Null)
            } else {
                Ok(json!(a + b))
            }
        },
    )?;

    shell.register(
        CommandSpec::new("greet")
            .with_help("Greet a value of flexible type")
            .with_param(ParamSpec::with_default(
                "value",
                TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
                json!("default"),
            )),
        |_, args| Ok(args.get("value").clone()),
    )?;

    shell.register(
        CommandSpec::new("log")
            .with_help("Log a message with a level")
            .with_param(ParamSpec::required("message", TypeSpec::Str))
            .with_param(ParamSpec::with_default(
                "level",
                TypeSpec::choice([
                    ("debug", json!("debug")),
                    ("info", json!("info")),
                    ("warning", json!("warning")),
                    ("error", json!("error")),
                ]),
                json!("info"),
            ))
            .with_param(ParamSpec::with_default("timestamp", TypeSpec::Bool, json!(true))),
        |context, args| {
            let level = args.get("level").as_str().unwrap_or("info").to_uppercase();
            let mut prefix = format!("[{level}]");
            if args.get("timestamp").as_bool().unwrap_or(true) {
                let now = Local::now().format("%Y-%m-%d %H:%M:%S");
                prefix = format!("[{now}] {prefix}");
            }
            context.print(&format!(
                "{prefix} {}",
                args.get("message").as_str().unwrap_or(""),
            ));
            Ok(Value::Null)
        },
    )?;

    shell.register(
        CommandSpec::new("config")
            .with_help("Manage configuration settings")
            .with_param(ParamSpec::with_default(
                "key",
                TypeSpec::optional(TypeSpec::Str),
                json!(null),
            ))
            .with_param(ParamSpec::with_default(
                "value",
                TypeSpec::optional(TypeSpec::Str),
                json!(null),
            ))
            .with_param(ParamSpec::with_default("list_all", TypeSpec::Bool, json!(false))),
        |context, args| {
            let key = args.get("key").as_str().map(str::to_string);
            let value = args.get("value").as_str().map(str::to_string);

            if args.get("list_all").as_bool().unwrap_or(false) {
                context.print("Configuration settings:");
                let lines: Vec<String> = context
                    .settings()
                    .iter()
                    .map(|(k, v)| format!("  {k} = {}", setting_text(v)))
                    .collect();
                for line in lines {
                    context.print(&line);
                }
            } else if let (Some(key), Some(value)) = (&key, &value) {
                context
                    .settings_mut()
                    .insert(key.clone(), Value::String(value.clone()));
                context.print(&format!("Set {key} = {value}"));
            } else if let Some(key) = &key {
                let line = match context.settings().get(key) {
                    Some(value) => format!("{key} = {}", setting_text(value)),
                    None => format!("Configuration key '{key}' not found"),
                };
                context.print(&line);
            } else {
                context.print("Usage: config [--key KEY] [--value VALUE] [--list-all]");
            }
            Ok(Value::Null)
        },
    )?;

    shell.register(
        CommandSpec::new("sum")
            .with_help("Sum a comma-separated list of integers")
            .with_param(ParamSpec::required("values", TypeSpec::list(TypeSpec::Int))),
        |_, args| {
            let total: i64 = args
                .get("values")
                .as_array()
                .map(|items| items.iter().filter_map(Value::as_i64).sum())
                .unwrap_or(0);
            Ok(json!(total))
        },
    )?;

    shell.register(
        CommandSpec::new("report").with_help("Sample score report (renders as a table)"),
        |_, _| {
            Ok(json!([
                {"id": 1, "name": "Alice", "age": 25, "city": "Beijing", "score": 95.5},
                {"id": 2, "name": "Bob", "age": 30, "city": "Shanghai", "score": 87.2},
                {"id": 3, "name": "Charlie", "age": 28, "city": "Guangzhou", "score": 92.8},
                {"id": 4, "name": "Diana", "age": 26, "city": "Shenzhen", "score": 89.1},
                {"id": 5, "name": "Eve", "age": 32, "city": "Hangzhou", "score": 94.3},
            ]))
        },
    )?;

    shell.register(
        CommandSpec::new("sysinfo").with_help("Host details (renders as a tree)"),
        |context, _| {
            Ok(json!({
                "host": {
                    "os": std::env::consts::OS,
                    "arch": std::env::consts::ARCH,
                    "family": std::env::consts::FAMILY,
                },
                "process": {
                    "id": std::process::id(),
                },
                "output": {
                    "format": context.mode().name(),
                },
            }))
        },
    )?;

    shell.register(
        CommandSpec::new("format")
            .with_help("Show or set the output format")
            .with_param(ParamSpec::with_default(
                "mode",
                TypeSpec::optional(TypeSpec::choice([
                    ("auto", json!("auto")),
                    ("json", json!("json")),
                    ("table", json!("table")),
                    ("tree", json!("tree")),
                    ("plain", json!("plain")),
                    ("pretty", json!("pretty")),
                ])),
                json!(null),
            )),
        |context, args| {
            match args.get("mode").as_str() {
                Some(name) => {
                    let mode: FormatMode = name.parse()?;
                    context.set_mode(mode);
                    context.print(&format!("Format set to {mode}"));
                }
                None => {
                    let mode = context.mode();
                    context.print(&format!("Current format: {mode}"));
                }
            }
            Ok(Value::Null)
        },
    )?;

    Ok(())
}

fn setting_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
