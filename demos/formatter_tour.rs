//! Auto-formatter tour.
//!
//! Registers commands returning every value shape the formatter knows
//! about, then renders each one under each output mode.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cmdshell-demos --example formatter_tour
//! ```

use cmdshell_core::{CommandSpec, Value};
use cmdshell_runtime::{FormatMode, Shell};
use serde_json::json;

fn install(shell: &mut Shell) {
    let shapes: Vec<(&str, &str, Value)> = vec![
        (
            "simple_string",
            "A plain string",
            json!("Hello from the formatter!"),
        ),
        ("simple_number", "A number", json!(42)),
        (
            "short_list",
            "A short scalar sequence (inline)",
            json!(["apple", "banana", "cherry", "date"]),
        ),
        (
            "long_list",
            "A long scalar sequence (one per line)",
            json!((1..=20).collect::<Vec<i64>>()),
        ),
        (
            "flat_dict",
            "A flat mapping (key = value lines)",
            json!({"name": "cmdshell", "version": "0.1.0", "active": true}),
        ),
        (
            "table_data",
            "Same-keyed rows (aligned table)",
            json!([
                {"id": 1, "name": "Alice", "age": 25, "city": "Beijing", "score": 95.5},
                {"id": 2, "name": "Bob", "age": 30, "city": "Shanghai", "score": 87.2},
                {"id": 3, "name": "Charlie", "age": 28, "city": "Guangzhou", "score": 92.8},
            ]),
        ),
        (
            "nested_structure",
            "A nested mapping (indented tree)",
            json!({
                "company": {
                    "name": "Tech Corp",
                    "founded": 2010,
                    "departments": {
                        "engineering": {
                            "head": "John Doe",
                            "projects": ["atlas", "beacon"],
                        },
                    },
                },
            }),
        ),
        ("none_result", "An absent value (renders nothing)", Value::Null),
    ];

    for (name, help, value) in shapes {
        shell
            .register(CommandSpec::new(name).with_help(help), move |_, _| {
                Ok(value.clone())
            })
            .expect("demo registration");
    }
}

fn main() {
    let mut shell = Shell::new();
    install(&mut shell);

    let commands: Vec<String> = shell
        .commands()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();

    for mode in [
        FormatMode::Auto,
        FormatMode::Json,
        FormatMode::Table,
        FormatMode::Tree,
        FormatMode::Plain,
        FormatMode::Pretty,
    ] {
        println!("=== mode: {mode} ===");
        shell.context_mut().set_mode(mode);
        for name in &commands {
            println!("--- {name}");
            let _ = shell.execute(name);
        }
        println!();
    }
}
