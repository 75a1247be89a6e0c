//! Update gate core
//!
//! This module provides the version comparator, the update decision policy,
//! and the coordinator that funnels every check trigger through a single
//! de-duplicated fetch.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   Source    │────▶│ Coordinator  │────▶│  Decision   │
//! │  (fetch)    │     │(single-flight│     │  (policy)   │
//! └─────────────┘     │  + TTL cache)│     └─────────────┘
//!        │            └──────────────┘            │
//!        ▼                                        ▼
//! ┌─────────────┐                          ┌─────────────┐
//! │   Sources   │                          │   Semver    │
//! │(store,config│                          │(version cmp)│
//! └─────────────┘                          └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`clock`]: Clock abstraction so cache-expiry logic is testable
//! - [`coordinator`]: Single-flight check coordination with verdict caching
//! - [`decision`]: The pure proceed/optional/forced decision policy
//! - [`error`]: Error types for metadata sources
//! - [`semver`]: Lenient semantic version parsing and comparison
//! - [`source`]: Source trait for fetching update metadata
//! - [`sources`]: Concrete source implementations (store catalog, remote config)
//! - [`types`]: The `UpdateMetadata` value type and source merging

pub mod clock;
pub mod coordinator;
pub mod decision;
pub mod error;
pub mod semver;
pub mod source;
pub mod sources;
pub mod types;
