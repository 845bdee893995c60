//! `testshell` application entry point.
//!
//! This binary runs the test-building REPL over standard input, or over a
//! script file given with `--script`. It uses `eyre` for opaque error handling
//! at the application boundary, converting domain-specific errors into
//! human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/testshell/config.toml` or path from `TESTSHELL_CONFIG_PATH`)
//! 3. Environment variables (`TESTSHELL_*`)
//! 4. Command-line arguments
//!
//! Log output goes to standard error and is filtered by `TESTSHELL_LOG`
//! (default `testshell=warn`).

use std::io::{self, BufRead, IsTerminal, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::Parser;
use eyre::{Report, Result as EyreResult, WrapErr};
use testshell::config::{Cli, ShellConfig, load_config};
use testshell::shell::{CommandSet, Dispatch, ShellContext};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Uses `eyre::Result` as the return type to provide human-readable error reports
/// with backtraces when available.
fn main() -> EyreResult<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;
    debug!(?config, "configuration loaded");

    let commands = CommandSet::with_builtins();
    let mut ctx = ShellContext::from_config(&config);

    match cli.script {
        Some(ref path) => run_script(&commands, &mut ctx, path),
        None => run_interactive(&commands, &mut ctx, &config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TESTSHELL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("testshell=warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Run every line of a script, stopping at the first failing command.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn run_script(commands: &CommandSet, ctx: &mut ShellContext, path: &Utf8Path) -> EyreResult<()> {
    let script = read_script(path)?;
    info!(path = %path, "running script");

    for (index, line) in script.lines().enumerate() {
        let outcome = commands
            .dispatch(ctx, line)
            .wrap_err_with(|| format!("{path}:{}: {}", index.saturating_add(1), line.trim()))?;
        match outcome {
            Dispatch::Exit => break,
            Dispatch::Output(text) if text.is_empty() => {}
            Dispatch::Output(text) => println!("{text}"),
        }
    }
    Ok(())
}

/// Read lines from standard input until end of input or `exit`.
///
/// Command errors are reported and the loop carries on.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
#[expect(clippy::print_stderr, reason = "command errors are reported to the user")]
fn run_interactive(
    commands: &CommandSet,
    ctx: &mut ShellContext,
    config: &ShellConfig,
) -> EyreResult<()> {
    let stdin = io::stdin();
    let show_prompt = stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    loop {
        if show_prompt {
            print!("{}", config.prompt);
            io::stdout().flush().wrap_err("failed to flush prompt")?;
        }

        let Some(read) = lines.next() else {
            break;
        };
        let line = read.wrap_err("failed to read standard input")?;

        match commands.dispatch(ctx, &line) {
            Ok(Dispatch::Exit) => break,
            Ok(Dispatch::Output(text)) if text.is_empty() => {}
            Ok(Dispatch::Output(text)) => println!("{text}"),
            Err(error) => eprintln!("error: {error}"),
        }
    }
    Ok(())
}

fn read_script(path: &Utf8Path) -> EyreResult<String> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("failed to open directory {parent}"))?;
    dir.read_to_string(file_name)
        .wrap_err_with(|| format!("failed to read script {path}"))
}
