//! End-to-end dispatch tests over a small registered command set.

use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec};
use cmdshell_runtime::{FormatMode, MemorySink, Shell, ShellContext, ShellError};
use serde_json::{Value, json};

/// Builds a shell with a captured sink and a representative command set.
fn demo_shell() -> (Shell, MemorySink) {
    let sink = MemorySink::new();
    let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));

    shell
        .register(
            CommandSpec::new("add")
                .with_help("Add two numbers")
                .with_param(ParamSpec::required("a", TypeSpec::Int))
                .with_param(ParamSpec::required("b", TypeSpec::Int))
                .with_param(ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false))),
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
        )
        .unwrap();

    shell
        .register(
            CommandSpec::new("greet")
                .with_help("Greet a value of flexible type")
                .with_param(ParamSpec::with_default(
                    "value",
                    TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
                    json!("default"),
                )),
            |_, args| Ok(args.get("value").clone()),
        )
        .unwrap();

    shell
        .register(
            CommandSpec::new("hello")
                .with_help("Say hello to someone")
                .with_param(ParamSpec::with_default("name", TypeSpec::Str, json!("World")))
                .with_param(ParamSpec::with_default("count", TypeSpec::Int, json!(1)))
                .with_param(ParamSpec::with_default(
                    "uppercase",
                    TypeSpec::Bool,
                    json!(false),
                )),
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
        )
        .unwrap();

    shell
        .register(
            CommandSpec::new("sum")
                .with_help("Sum a list of integers")
                .with_param(ParamSpec::required("values", TypeSpec::list(TypeSpec::Int))),
            |_, args| {
                let total: i64 = args
                    .get("values")
                    .as_array()
                    .map(|items| items.iter().filter_map(Value::as_i64).sum())
                    .unwrap_or(0);
                Ok(json!(total))
            },
        )
        .unwrap();

    shell
        .register(
            CommandSpec::new("people").with_help("Rows for table rendering"),
            |_, _| {
                Ok(json!([
                    {"id": 1, "name": "Alice", "age": 25, "city": "Beijing", "score": 95.5},
                    {"id": 2, "name": "Bob", "age": 30, "city": "Shanghai", "score": 87.2},
                    {"id": 3, "name": "Charlie", "age": 28, "city": "Guangzhou", "score": 92.8},
                    {"id": 4, "name": "Diana", "age": 26, "city": "Shenzhen", "score": 89.1},
                    {"id": 5, "name": "Eve", "age": 32, "city": "Hangzhou", "score": 94.3},
                ]))
            },
        )
        .unwrap();

    (shell, sink)
}

#[test]
fn add_renders_the_sum() {
    let (mut shell, sink) = demo_shell();
    let value = shell.execute("add 2 3").unwrap();
    assert_eq!(value, json!(5));
    assert_eq!(sink.contents(), "5\n");
}

#[test]
fn add_verbose_prints_progress_lines() {
    let (mut shell, sink) = demo_shell();
    let value = shell.execute("add 2 3 --verbose true").unwrap();
    assert_eq!(value, Value::Null);
    assert_eq!(sink.contents(), "Adding 2 and 3...\nResult: 5\n");
}

#[test]
fn add_verbose_presence_flag() {
    let (mut shell, sink) = demo_shell();
    shell.execute("add 2 3 --verbose").unwrap();
    assert_eq!(sink.contents(), "Adding 2 and 3...\nResult: 5\n");
}

#[test]
fn greet_union_binds_int_then_string() {
    let (mut shell, _sink) = demo_shell();
    assert_eq!(shell.execute("greet 123").unwrap(), json!(123));
    assert_eq!(shell.execute("greet hello").unwrap(), json!("hello"));
    assert_eq!(shell.execute("greet").unwrap(), json!("default"));
}

#[test]
fn hello_with_flags_and_repetition() {
    let (mut shell, sink) = demo_shell();
    shell.execute("hello --name Alice --count 2").unwrap();
    assert_eq!(sink.contents(), "Hello, Alice!\nHello, Alice!\n");

    sink.clear();
    shell.execute("hello Bob --uppercase").unwrap();
    assert_eq!(sink.contents(), "HELLO, BOB!\n");
}

#[test]
fn sum_coerces_comma_separated_list() {
    let (mut shell, sink) = demo_shell();
    assert_eq!(shell.execute("sum 1,2,3,4").unwrap(), json!(10));
    assert_eq!(sink.contents(), "10\n");
}

#[test]
fn table_rows_render_with_header_and_alignment() {
    let (mut shell, sink) = demo_shell();
    shell.execute("people").unwrap();

    let rendered = sink.contents();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 6, "one header plus five rows:\n{rendered}");
    assert_eq!(
        lines[0].split_whitespace().collect::<Vec<_>>(),
        vec!["id", "name", "age", "city", "score"],
    );
    // Columns are aligned: "name" values all start at the same offset.
    let offset = lines[0].find("name").unwrap();
    assert_eq!(lines[1][offset..].split_whitespace().next(), Some("Alice"));
    assert_eq!(lines[5][offset..].split_whitespace().next(), Some("Eve"));
}

#[test]
fn unknown_command_does_not_disturb_the_registry() {
    let (mut shell, sink) = demo_shell();
    let before = shell.commands().len();

    let err = shell.execute("frobnicate now").unwrap_err();
    assert!(matches!(err, ShellError::UnknownCommand(name) if name == "frobnicate"));
    assert!(sink.contents().contains("unknown command 'frobnicate'"));
    assert_eq!(shell.commands().len(), before);

    sink.clear();
    assert_eq!(shell.execute("add 1 1").unwrap(), json!(2));
    assert_eq!(sink.contents(), "2\n");
}

#[test]
fn coercion_diagnostic_names_the_parameter() {
    let (mut shell, sink) = demo_shell();
    let err = shell.execute("add 2 x").unwrap_err();
    assert!(matches!(err, ShellError::Coercion { ref parameter, .. } if parameter == "b"));
    assert!(sink.contents().contains("parameter 'b'"));
}

#[test]
fn union_failure_diagnostic_lists_attempts() {
    let sink = MemorySink::new();
    let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
    shell
        .register(
            CommandSpec::new("pick").with_param(ParamSpec::required(
                "value",
                TypeSpec::union([TypeSpec::Int, TypeSpec::Bool]),
            )),
            |_, args| Ok(args.get("value").clone()),
        )
        .unwrap();

    shell.execute("pick maybe").unwrap_err();
    assert!(sink.contents().contains("tried int, bool"));
}

#[test]
fn format_mode_switch_changes_rendering() {
    let (mut shell, sink) = demo_shell();
    shell.context_mut().set_mode(FormatMode::Json);
    shell.execute("people").unwrap();
    let rendered = sink.contents();
    assert!(rendered.trim_start().starts_with('['), "json mode: {rendered}");
    assert!(rendered.contains("\"name\": \"Alice\""));

    sink.clear();
    shell.context_mut().set_mode(FormatMode::Auto);
    shell.execute("people").unwrap();
    assert!(sink.contents().starts_with("id "));
}

#[test]
fn kebab_case_flag_reaches_snake_case_parameter() {
    let sink = MemorySink::new();
    let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
    shell
        .register(
            CommandSpec::new("config").with_param(ParamSpec::with_default(
                "list_all",
                TypeSpec::Bool,
                json!(false),
            )),
            |_, args| Ok(args.get("list_all").clone()),
        )
        .unwrap();

    assert_eq!(shell.execute("config --list-all").unwrap(), json!(true));
}

#[test]
fn optional_parameter_accepts_empty_markers() {
    let sink = MemorySink::new();
    let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
    shell
        .register(
            CommandSpec::new("find")
                .with_param(ParamSpec::required("dir", TypeSpec::Str))
                .with_param(ParamSpec::with_default(
                    "pattern",
                    TypeSpec::optional(TypeSpec::Str),
                    json!(null),
                )),
            |_, args| Ok(args.get("pattern").clone()),
        )
        .unwrap();

    assert_eq!(shell.execute("find src").unwrap(), Value::Null);
    assert_eq!(shell.execute("find src --pattern none").unwrap(), Value::Null);
    assert_eq!(
        shell.execute("find src --pattern '*.rs'").unwrap(),
        json!("*.rs"),
    );
}

#[test]
fn quoted_arguments_keep_spaces() {
    let sink = MemorySink::new();
    let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
    shell
        .register(
            CommandSpec::new("echo").with_param(ParamSpec::required("text", TypeSpec::Str)),
            |_, args| Ok(args.get("text").clone()),
        )
        .unwrap();

    assert_eq!(
        shell.execute("echo 'System started'").unwrap(),
        json!("System started"),
    );
}
