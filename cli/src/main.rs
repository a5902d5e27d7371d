//! `cmdshell` — host binary for the dispatch framework.
//!
//! Registers the demonstration command set and executes command lines
//! non-interactively: one or more lines from the arguments, a script
//! file, or a plain stdin loop. Per-invocation failures are reported
//! through the shell's own output and never abort the remaining lines.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cmdshell_runtime::{FormatMode, Shell};

mod commands;

/// Listing export format for `cmdshell commands`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ListFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmdshell")]
#[command(about = "Typed command shell with auto-formatted output")]
struct Cli {
    /// Initial render mode for command output.
    #[arg(long, default_value_t = FormatMode::Auto)]
    format: FormatMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute one or more command lines in order.
    Exec(ExecArgs),
    /// Run newline-separated command lines from a file.
    Script(ScriptArgs),
    /// Read command lines from stdin until EOF.
    Stdin,
    /// List registered commands.
    Commands(CommandsArgs),
}

#[derive(Debug, Args)]
struct ExecArgs {
    /// Command lines, each dispatched separately (quote each line).
    #[arg(required = true)]
    lines: Vec<String>,
}

#[derive(Debug, Args)]
struct ScriptArgs {
    /// Script file; blank lines and `#` comments are skipped.
    path: PathBuf,
}

#[derive(Debug, Args)]
struct CommandsArgs {
    /// Output format for the listing (default: table).
    #[arg(long, default_value = "table")]
    format: ListFormat,
}

fn main() {
    let cli = Cli::parse();

    let mut shell = Shell::new();
    shell.context_mut().set_mode(cli.format);
    if let Err(err) = commands::install(&mut shell) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Exec(args) => run_exec(&mut shell, args),
        Command::Script(args) => run_script(&mut shell, args),
        Command::Stdin => run_stdin(&mut shell),
        Command::Commands(args) => run_commands(&shell, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_exec(shell: &mut Shell, args: ExecArgs) -> Result<(), String> {
    let mut failed = 0usize;
    for line in &args.lines {
        if shell.execute(line).is_err() {
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(format!("{failed} of {} line(s) failed", args.lines.len()));
    }
    Ok(())
}

fn run_script(shell: &mut Shell, args: ScriptArgs) -> Result<(), String> {
    let source = fs::read_to_string(&args.path)
        .map_err(|err| format!("failed to read '{}': {err}", args.path.display()))?;

    let mut failed = 0usize;
    let mut total = 0usize;
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        total += 1;
        if shell.execute(line).is_err() {
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(format!("{failed} of {total} line(s) failed"));
    }
    Ok(())
}

fn run_stdin(shell: &mut Shell) -> Result<(), String> {
    for line in io::stdin().lock().lines() {
        let line = line.map_err(|err| format!("failed to read stdin: {err}"))?;
        // Failures are already reported on the shell's output; the loop
        // keeps accepting lines.
        let _ = shell.execute(&line);
    }
    Ok(())
}

fn run_commands(shell: &Shell, args: CommandsArgs) -> Result<(), String> {
    match args.format {
        ListFormat::Table => {
            let listing = shell.commands();
            let max_name = listing
                .iter()
                .map(|(name, _)| name.len())
                .max()
                .unwrap_or(4);
            for (name, help) in listing {
                println!("  {:<width$}  {}", name, help.unwrap_or(""), width = max_name);
            }
        }
        ListFormat::Json => {
            let raw = serde_json::to_string_pretty(&shell.specs())
                .map_err(|err| format!("JSON serialization failed: {err}"))?;
            println!("{raw}");
        }
        ListFormat::Yaml => {
            let raw = serde_yaml::to_string(&shell.specs())
                .map_err(|err| format!("YAML serialization failed: {err}"))?;
            println!("{raw}");
        }
    }
    Ok(())
}
