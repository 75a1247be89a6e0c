//! Force/optional update gate for application launches.
//!
//! Compares the installed application version against update metadata fetched
//! from remote sources and decides whether the app may proceed, should show an
//! optional-update prompt, or must block until the user updates.
//!
//! The decision itself is a pure function over typed inputs; fetching,
//! de-duplication of concurrent checks, verdict caching, and fail-open
//! handling of unreachable sources live in [`gate::coordinator`].

pub mod config;
pub mod gate;

pub use gate::coordinator::{GatePolicy, UpdateCoordinator};
pub use gate::decision::{GateVerdict, decide};
pub use gate::semver::SemanticVersion;
pub use gate::types::UpdateMetadata;
