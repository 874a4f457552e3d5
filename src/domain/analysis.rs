//! Tri-state analysis lifecycle shared by both demo flows.
//!
//! A view owns one [`AnalysisMachine`]. Transitions only move forward
//! (`Idle -> Running -> Completed`); the only way back to `Idle` is to
//! replace the input once a result is showing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("input is incomplete")]
    NotReady,

    #[error("an analysis is already running for this view")]
    AlreadyRunning,
}

/// Input side of a demo flow: tells whether submission is allowed and
/// hands out the snapshot the analysis runs on.
pub trait InputCollector {
    type Snapshot: Send + 'static;

    /// Short flow name used in logs.
    const FLOW: &'static str;

    fn is_ready(&self) -> bool;

    /// `Some` exactly when [`InputCollector::is_ready`] holds.
    fn snapshot(&self) -> Option<Self::Snapshot>;
}

/// Current phase of a view's analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum AnalysisState<R> {
    Idle,
    Running,
    Completed(R),
}

impl<R> AnalysisState<R> {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            Self::Completed(result) => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisMachine<R> {
    state: AnalysisState<R>,
    run: u64,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl<R> Default for AnalysisMachine<R> {
    fn default() -> Self {
        Self {
            state: AnalysisState::Idle,
            run: 0,
            started_at: None,
            completed_at: None,
        }
    }
}

impl<R> AnalysisMachine<R> {
    pub fn state(&self) -> &AnalysisState<R> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Number of the latest run; 0 before the first one.
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Enter `Running`. `ready` is the input collector's predicate.
    pub fn begin(&mut self, ready: bool) -> Result<u64, AnalysisError> {
        if self.is_running() {
            return Err(AnalysisError::AlreadyRunning);
        }
        if !ready {
            return Err(AnalysisError::NotReady);
        }

        self.run += 1;
        self.state = AnalysisState::Running;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
        Ok(self.run)
    }

    /// Store the result of `run`. Returns false (and changes nothing) unless
    /// that exact run is the one in flight.
    pub fn complete(&mut self, run: u64, result: R) -> bool {
        if !self.is_running() || run != self.run {
            return false;
        }

        self.state = AnalysisState::Completed(result);
        self.completed_at = Some(Utc::now());
        true
    }

    /// Called whenever the input is replaced. A finished result is dropped;
    /// an in-flight run is left alone.
    pub fn input_replaced(&mut self) {
        if matches!(self.state, AnalysisState::Completed(_)) {
            self.state = AnalysisState::Idle;
            self.completed_at = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_requires_ready_input() {
        let mut machine = AnalysisMachine::<u32>::default();
        assert_eq!(machine.begin(false), Err(AnalysisError::NotReady));
        assert_eq!(machine.state(), &AnalysisState::Idle);
    }

    #[test]
    fn second_begin_while_running_is_rejected() {
        let mut machine = AnalysisMachine::<u32>::default();
        assert_eq!(machine.begin(true), Ok(1));
        assert_eq!(machine.begin(true), Err(AnalysisError::AlreadyRunning));
        assert_eq!(machine.run(), 1);
    }

    #[test]
    fn complete_only_from_matching_running_run() {
        let mut machine = AnalysisMachine::<u32>::default();
        assert!(!machine.complete(1, 7));
        assert_eq!(machine.state(), &AnalysisState::Idle);

        let run = machine.begin(true).unwrap();
        assert!(!machine.complete(run + 1, 7));
        assert!(machine.complete(run, 7));
        assert_eq!(machine.state(), &AnalysisState::Completed(7));
        assert!(machine.completed_at().is_some());

        // exactly once
        assert!(!machine.complete(run, 8));
        assert_eq!(machine.state().result(), Some(&7));
    }

    #[test]
    fn new_run_replaces_previous_result() {
        let mut machine = AnalysisMachine::<u32>::default();
        let first = machine.begin(true).unwrap();
        machine.complete(first, 1);

        let second = machine.begin(true).unwrap();
        assert!(machine.is_running());
        machine.complete(second, 2);
        assert_eq!(machine.state().result(), Some(&2));
    }

    #[test]
    fn replacing_input_resets_only_a_finished_result() {
        let mut machine = AnalysisMachine::<u32>::default();
        let run = machine.begin(true).unwrap();

        machine.input_replaced();
        assert!(machine.is_running());

        machine.complete(run, 3);
        machine.input_replaced();
        assert_eq!(machine.state(), &AnalysisState::Idle);
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let running = serde_json::to_value(AnalysisState::<u32>::Running).unwrap();
        assert_eq!(running, serde_json::json!({ "status": "running" }));

        let done = serde_json::to_value(AnalysisState::Completed(5u32)).unwrap();
        assert_eq!(done, serde_json::json!({ "status": "completed", "result": 5 }));
    }
}
