//! Scenario state for shell behavioural tests.

use std::collections::BTreeMap;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// What one input line produced.
#[derive(Debug, Clone)]
pub(crate) enum LineOutcome {
    Output(String),
    Failure(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct ShellState {
    pub(crate) lines: Slot<Vec<String>>,
    pub(crate) outcomes: Slot<Vec<LineOutcome>>,
    pub(crate) files: Slot<BTreeMap<String, String>>,
}

#[fixture]
pub(crate) fn shell_state() -> ShellState {
    let state = ShellState::default();
    state.lines.set(Vec::new());
    state
}
