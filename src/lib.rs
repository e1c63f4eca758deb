//! Aggregates the most recent release notes of many repositories into a
//! single searchable HTML page and publishes it to object storage.
pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod orchestrator;
pub mod publish;
pub mod render;

pub use error::{HubError, PublishError, Result};
