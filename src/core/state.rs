//! Execution state models

use crate::core::DeploymentTarget;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// Pipeline is currently running
    Running,
    /// Every step succeeded
    Completed,
    /// A step failed and the pipeline halted
    Failed,
}

/// Outcome of one executed step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub name: String,
    pub succeeded: bool,

    /// Failure description, if the step failed
    pub diagnostic: Option<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Record of a single pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique execution ID
    pub execution_id: Uuid,

    pub pipeline_name: String,

    pub target: DeploymentTarget,

    /// When the run started
    pub timestamp: DateTime<Utc>,

    /// When the run halted or completed
    pub completed_at: Option<DateTime<Utc>>,

    pub status: ExecutionStatus,

    /// Outcomes in execution order; steps after a failure are absent
    pub step_outcomes: Vec<StepOutcome>,

    /// True iff every step succeeded
    pub overall_succeeded: bool,
}

impl RunReport {
    /// Create an idle report
    pub fn new(pipeline_name: impl Into<String>, target: DeploymentTarget) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            pipeline_name: pipeline_name.into(),
            target,
            timestamp: Utc::now(),
            completed_at: None,
            status: ExecutionStatus::Pending,
            step_outcomes: Vec::new(),
            overall_succeeded: false,
        }
    }

    /// Mark the run as started
    pub fn start(&mut self) {
        self.status = ExecutionStatus::Running;
        self.timestamp = Utc::now();
    }

    /// Append a step outcome
    pub fn record(&mut self, outcome: StepOutcome) {
        self.step_outcomes.push(outcome);
    }

    /// Finalize after the last step ran or the first failure
    pub fn finish(&mut self) {
        self.overall_succeeded = self.step_outcomes.iter().all(|o| o.succeeded);
        self.status = if self.overall_succeeded {
            ExecutionStatus::Completed
        } else {
            ExecutionStatus::Failed
        };
        self.completed_at = Some(Utc::now());
    }

    /// The step that halted the run
    pub fn failed_step(&self) -> Option<&StepOutcome> {
        self.step_outcomes.iter().find(|o| !o.succeeded)
    }
}
