//! CLI library components for the course-completion ETL.

pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod types;
