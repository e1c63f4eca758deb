//! Subcommand execution.
//!
//! - **publish**: fetch every changelog, render the page, write it locally
//!   and upload it
//! - **show**: fetch and parse every changelog and print the entries as JSON
//!
//! Both commands receive the [`HubConfig`](crate::config::HubConfig)
//! resolved from CLI arguments and the configuration file at startup.

/// Wiring shared by the subcommands.
pub mod common;

/// The `publish` subcommand.
pub mod publish;

/// The `show` subcommand.
pub mod show;
