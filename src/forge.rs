//! Retrieval of raw changelog text from hosted repositories.
//!
//! Fetching never fails from the caller's point of view: absence and
//! transport problems are reported through [`types::FetchOutcome`].

/// Configuration and authentication for the raw content host.
pub mod config;

/// reqwest implementation reading from a raw content host.
pub mod raw;

/// Common trait for changelog source abstraction.
pub mod traits;

/// Repository identifiers and fetch outcomes.
pub mod types;
