//! CLI command handlers.

mod grab;

#[cfg(test)]
pub(crate) use grab::pipeline_options;
pub use grab::run_grab;
