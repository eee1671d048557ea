//! Pipeline domain model

use crate::core::{DeploymentTarget, Step};
use anyhow::Result;
use std::collections::HashSet;

/// A named, ordered list of steps bound to one deployment target
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Target selected for this run
    pub target: DeploymentTarget,

    /// Steps in execution order
    steps: Vec<Step>,
}

impl Pipeline {
    /// Create a pipeline, rejecting duplicate step names
    pub fn new(name: impl Into<String>, target: DeploymentTarget, steps: Vec<Step>) -> Result<Self> {
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.name()) {
                anyhow::bail!("Duplicate step name: {}", step.name());
            }
        }

        Ok(Self {
            name: name.into(),
            target,
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step names in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }
}
