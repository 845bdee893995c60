//! Given/When steps for shell scenarios.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use camino::Utf8Path;
use rstest_bdd_macros::{given, when};
use testshell::error::FilesystemError;
use testshell::host::{ExportSink, LiteralEvaluator};
use testshell::shell::{CommandSet, Dispatch, ShellContext};

use super::state::{LineOutcome, ShellState};

pub type StepResult<T> = Result<T, String>;

/// Keeps exported files in memory, keyed by relative path.
#[derive(Clone, Default)]
struct RecordingSink {
    files: Arc<Mutex<BTreeMap<String, String>>>,
}

impl ExportSink for RecordingSink {
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FilesystemError> {
        let mut files = self.files.lock().map_err(|_| FilesystemError::IoError {
            path: PathBuf::from(path.as_std_path()),
            message: String::from("recording sink lock poisoned"),
        })?;
        files.insert(String::from(path.as_str()), String::from(content));
        Ok(())
    }
}

#[given("the user enters \"{line}\"")]
fn the_user_enters(shell_state: &ShellState, line: String) {
    let mut lines = shell_state.lines.get().unwrap_or_default();
    lines.push(line);
    shell_state.lines.set(lines);
}

#[when("the commands are run")]
fn the_commands_are_run(shell_state: &ShellState) -> StepResult<()> {
    let sink = RecordingSink::default();
    let commands = CommandSet::with_builtins();
    let mut ctx = ShellContext::new(Box::new(LiteralEvaluator), Box::new(sink.clone()));

    let mut outcomes = Vec::new();
    for line in shell_state.lines.get().unwrap_or_default() {
        match commands.dispatch(&mut ctx, &line) {
            Ok(Dispatch::Output(text)) => outcomes.push(LineOutcome::Output(text)),
            Ok(Dispatch::Exit) => break,
            Err(error) => outcomes.push(LineOutcome::Failure(error.to_string())),
        }
    }
    shell_state.outcomes.set(outcomes);

    let files = sink
        .files
        .lock()
        .map_err(|_| String::from("recording sink lock poisoned"))?
        .clone();
    shell_state.files.set(files);
    Ok(())
}
