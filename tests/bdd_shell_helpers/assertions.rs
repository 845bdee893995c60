//! Then-step assertions for shell scenarios.

use rstest_bdd_macros::then;

use super::state::{LineOutcome, ShellState};
use super::steps::StepResult;

fn recorded_outcomes(state: &ShellState) -> StepResult<Vec<LineOutcome>> {
    state
        .outcomes
        .get()
        .ok_or_else(|| String::from("commands should have been run"))
}

/// Looks up the outcome of the 1-based input line `position`.
fn outcome_at(state: &ShellState, position: usize) -> StepResult<LineOutcome> {
    let outcomes = recorded_outcomes(state)?;
    position
        .checked_sub(1)
        .and_then(|index| outcomes.get(index).cloned())
        .ok_or_else(|| format!("no outcome recorded for line {position}"))
}

fn last_output(state: &ShellState) -> StepResult<String> {
    match recorded_outcomes(state)?.last() {
        Some(LineOutcome::Output(text)) => Ok(text.clone()),
        Some(LineOutcome::Failure(message)) => {
            Err(format!("expected output, last command failed: {message}"))
        }
        None => Err(String::from("no commands were run")),
    }
}

#[then("every command succeeds")]
fn every_command_succeeds(shell_state: &ShellState) -> StepResult<()> {
    let failures: Vec<String> = recorded_outcomes(shell_state)?
        .into_iter()
        .filter_map(|outcome| match outcome {
            LineOutcome::Failure(message) => Some(message),
            LineOutcome::Output(_) => None,
        })
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("commands failed: {failures:?}"))
    }
}

#[then("output {position} is \"{expected}\"")]
fn output_is(shell_state: &ShellState, position: usize, expected: String) -> StepResult<()> {
    match outcome_at(shell_state, position)? {
        LineOutcome::Output(text) if text == expected => Ok(()),
        LineOutcome::Output(text) => Err(format!(
            "expected line {position} to print '{expected}', got '{text}'"
        )),
        LineOutcome::Failure(message) => Err(format!(
            "expected line {position} to print '{expected}', it failed: {message}"
        )),
    }
}

#[then("output {position} fails with \"{fragment}\"")]
fn output_fails_with(
    shell_state: &ShellState,
    position: usize,
    fragment: String,
) -> StepResult<()> {
    match outcome_at(shell_state, position)? {
        LineOutcome::Failure(message) if message.contains(&fragment) => Ok(()),
        LineOutcome::Failure(message) => Err(format!(
            "expected line {position} to fail with '{fragment}', got '{message}'"
        )),
        LineOutcome::Output(text) => Err(format!(
            "expected line {position} to fail, it printed '{text}'"
        )),
    }
}

#[then("the last output is \"{expected}\"")]
fn the_last_output_is(shell_state: &ShellState, expected: String) -> StepResult<()> {
    let text = last_output(shell_state)?;
    if text == expected {
        Ok(())
    } else {
        Err(format!("expected '{expected}', got '{text}'"))
    }
}

#[then("the last output contains \"{fragment}\"")]
fn the_last_output_contains(shell_state: &ShellState, fragment: String) -> StepResult<()> {
    let text = last_output(shell_state)?;
    if text.contains(&fragment) {
        Ok(())
    } else {
        Err(format!("expected '{fragment}' in:\n{text}"))
    }
}

#[then("the file \"{path}\" contains \"{fragment}\"")]
fn the_file_contains(shell_state: &ShellState, path: String, fragment: String) -> StepResult<()> {
    let files = shell_state
        .files
        .get()
        .ok_or_else(|| String::from("commands should have been run"))?;
    let content = files
        .get(&path)
        .ok_or_else(|| format!("no file exported at {path}; have {:?}", files.keys()))?;
    if content.contains(&fragment) {
        Ok(())
    } else {
        Err(format!("expected '{fragment}' in {path}:\n{content}"))
    }
}
