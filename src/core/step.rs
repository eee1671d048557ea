//! Step domain model

use crate::delivery::DeliveryError;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The work performed by a step
///
/// An `Err` is a failed outcome; the error text becomes the step's diagnostic
/// in the run report.
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn run(&self) -> Result<(), DeliveryError>;
}

/// A single named unit of pipeline work
///
/// Steps are immutable once constructed.
#[derive(Clone)]
pub struct Step {
    name: String,
    action: Arc<dyn StepAction>,
}

impl Step {
    pub fn new(name: impl Into<String>, action: impl StepAction + 'static) -> Self {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    /// Create a step from a closure returning a boolean outcome
    pub fn from_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let name = name.into();
        Self {
            action: Arc::new(FnAction {
                name: name.clone(),
                f,
            }),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(&self) -> Result<(), DeliveryError> {
        self.action.run().await
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish_non_exhaustive()
    }
}

struct FnAction<F> {
    name: String,
    f: F,
}

#[async_trait]
impl<F, Fut> StepAction for FnAction<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    async fn run(&self) -> Result<(), DeliveryError> {
        if (self.f)().await {
            Ok(())
        } else {
            Err(DeliveryError::StepFailed(self.name.clone()))
        }
    }
}
