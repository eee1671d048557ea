//! Main execution engine - runs a pipeline's steps in order

use crate::core::{DeploymentTarget, ExecutionStatus, Pipeline, RunReport, StepOutcome};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        target: DeploymentTarget,
        started_at: DateTime<Utc>,
    },
    StepStarted {
        step_name: String,
        index: usize,
        total: usize,
    },
    StepCompleted {
        step_name: String,
    },
    StepFailed {
        step_name: String,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
        failed_step: Option<String>,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;

/// Sequential pipeline executor
///
/// Steps run strictly in order. The first failing step halts the run; later
/// steps never execute and nothing already done is rolled back.
#[derive(Clone, Default)]
pub struct ExecutionEngine {
    event_handlers: Vec<EventHandler>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Execute the pipeline and return the finalized report
    pub async fn execute(&self, pipeline: &Pipeline) -> RunReport {
        let mut report = RunReport::new(&pipeline.name, pipeline.target);
        report.start();

        info!(
            "Starting pipeline execution: {} ({}, target {})",
            pipeline.name, report.execution_id, pipeline.target
        );
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id: report.execution_id,
            pipeline_name: pipeline.name.clone(),
            target: pipeline.target,
            started_at: report.timestamp,
        });

        let total = pipeline.steps().len();
        for (index, step) in pipeline.steps().iter().enumerate() {
            self.emit_event(ExecutionEvent::StepStarted {
                step_name: step.name().to_string(),
                index,
                total,
            });

            let started_at = Utc::now();
            let result = step.run().await;
            let finished_at = Utc::now();

            match result {
                Ok(()) => {
                    info!("Step {} succeeded", step.name());
                    report.record(StepOutcome {
                        name: step.name().to_string(),
                        succeeded: true,
                        diagnostic: None,
                        started_at,
                        finished_at,
                    });
                    self.emit_event(ExecutionEvent::StepCompleted {
                        step_name: step.name().to_string(),
                    });
                }
                Err(e) => {
                    let diagnostic = e.to_string();
                    error!("Step {} failed: {}", step.name(), diagnostic);
                    report.record(StepOutcome {
                        name: step.name().to_string(),
                        succeeded: false,
                        diagnostic: Some(diagnostic.clone()),
                        started_at,
                        finished_at,
                    });
                    self.emit_event(ExecutionEvent::StepFailed {
                        step_name: step.name().to_string(),
                        error: diagnostic,
                    });
                    break;
                }
            }
        }

        report.finish();

        info!(
            "Pipeline execution finished: {} - {:?}",
            pipeline.name, report.status
        );
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id: report.execution_id,
            status: report.status,
            failed_step: report.failed_step().map(|o| o.name.clone()),
        });

        report
    }
}
