//! v1 API Data Transfer Objects.
//!
//! Wire types for the v1 REST API. Report payloads reuse the domain models in
//! `src/models/`, which already carry the report's JSON shape.

pub mod reports;

pub use reports::*;
