//! Step outcomes and the run report.
//!
//! A provisioning run is a forward-only sequence of steps. Each step either
//! completes cleanly, completes with tolerated warnings (stale code, a
//! mismatched public address), or fails fatally by returning an error. The
//! driver stops at the first fatal failure; everything applied before it
//! stays applied, and re-running the pipeline is the recovery mechanism.

use chrono::{DateTime, Utc};

/// How a step finished, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step completed with nothing to report.
    Success,
    /// The step completed, but one or more non-critical operations failed.
    Tolerated(Vec<String>),
}

impl StepOutcome {
    /// Build a tolerated outcome from a single warning.
    #[must_use]
    pub fn tolerated(warning: impl Into<String>) -> Self {
        Self::Tolerated(vec![warning.into()])
    }

    /// Warnings attached to this outcome, empty for [`StepOutcome::Success`].
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Success => &[],
            Self::Tolerated(warnings) => warnings,
        }
    }
}

/// Result of one executed step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Step name as registered with the pipeline.
    pub step: &'static str,
    /// How the step finished.
    pub outcome: StepOutcome,
}

/// The step that aborted the run, with its rendered error.
#[derive(Debug, Clone)]
pub struct Abort {
    pub step: &'static str,
    pub error: String,
}

/// Aggregated result of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished or aborted.
    pub finished_at: DateTime<Utc>,
    /// Reports for every step that executed, in order.
    pub steps: Vec<StepReport>,
    /// Set when a step failed fatally; later steps never ran.
    pub aborted: Option<Abort>,
}

impl RunReport {
    /// Whether the run reached the end of the pipeline.
    ///
    /// Tolerated warnings do not fail a run.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.aborted.is_none()
    }

    /// All tolerated warnings across the run, paired with their step name.
    #[must_use]
    pub fn warnings(&self) -> Vec<(&'static str, &str)> {
        self.steps
            .iter()
            .flat_map(|report| {
                report
                    .outcome
                    .warnings()
                    .iter()
                    .map(|warning| (report.step, warning.as_str()))
            })
            .collect()
    }
}
