use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("cmdshell_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn cmdshell(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cmdshell"))
        .args(args)
        .output()
        .expect("failed to run cmdshell")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn exec_renders_a_scalar_result() {
    let output = cmdshell(&["exec", "add 2 3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5\n");
}

#[test]
fn exec_verbose_prints_progress_lines() {
    let output = cmdshell(&["exec", "add 2 3 --verbose true"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Adding 2 and 3...\nResult: 5\n");
}

#[test]
fn exec_runs_lines_in_order() {
    let output = cmdshell(&["exec", "greet 123", "greet hello", "sum 1,2,3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "123\nhello\n6\n");
}

#[test]
fn exec_failure_reports_and_continues() {
    let output = cmdshell(&["exec", "frobnicate", "add 1 1"]);
    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("unknown command 'frobnicate'"));
    assert!(out.contains("2\n"));
}

#[test]
fn format_flag_switches_initial_mode() {
    let output = cmdshell(&["--format", "json", "exec", "report"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.trim_start().starts_with('['));
    assert!(out.contains("\"name\": \"Alice\""));
}

#[test]
fn report_renders_as_a_table_by_default() {
    let output = cmdshell(&["exec", "report"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 6);
    assert!(out.starts_with("id "));
}

#[test]
fn format_command_switches_mode_mid_run() {
    let output = cmdshell(&["exec", "format json", "sysinfo"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Format set to json"));
    assert!(out.contains("\"os\""));
}

#[test]
fn script_skips_comments_and_blank_lines() {
    let dir = TempDir::new("script");
    let path = dir.join("demo.csh");
    fs::write(
        &path,
        "# demo script\n\nhello --name Alice\nconfig --key theme\n",
    )
    .expect("failed to write script");

    let output = cmdshell(&["script", path.to_str().expect("utf-8 path")]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello, Alice!\ntheme = dark\n");
}

#[test]
fn script_with_failing_line_exits_nonzero() {
    let dir = TempDir::new("script_fail");
    let path = dir.join("bad.csh");
    fs::write(&path, "add 2 x\n").expect("failed to write script");

    let output = cmdshell(&["script", path.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("parameter 'b'"));
}

#[test]
fn commands_listing_includes_every_command() {
    let output = cmdshell(&["commands"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for name in ["hello", "add", "greet", "log", "config", "sum", "report", "sysinfo", "format"] {
        assert!(out.contains(name), "missing {name}:\n{out}");
    }
}

#[test]
fn commands_listing_exports_json() {
    let output = cmdshell(&["commands", "--format", "json"]);
    assert!(output.status.success());
    let specs: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("listing is valid JSON");
    let names: Vec<&str> = specs
        .as_array()
        .expect("array of specs")
        .iter()
        .filter_map(|spec| spec.get("name").and_then(serde_json::Value::as_str))
        .collect();
    assert!(names.contains(&"add"));
    assert!(names.contains(&"greet"));
}
