//! Pipeline execution engine

pub mod engine;
pub mod plan;
pub mod steps;

pub use engine::{EventHandler, ExecutionEngine, ExecutionEvent};
pub use plan::{pipeline_name, plan_pipeline, Toolchain};
