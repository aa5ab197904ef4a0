//! Application layer: configuration, step context, steps, pipeline.

pub mod config;
pub mod context;
pub mod pipeline;
pub mod step;
