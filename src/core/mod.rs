//! Core domain models
//!
//! This module defines the pipeline, its steps, the deployment target
//! selection and the state recorded for each run.

pub mod config;
pub mod pipeline;
pub mod state;
pub mod step;
pub mod target;

pub use pipeline::*;
pub use state::*;
pub use step::*;
pub use target::*;
