//! Shared types for the SwiftX order relay.
//!
//! This crate holds the value objects that flow between the relay crates:
//! order and transfer payloads, quotes, chain descriptors, universal
//! addresses, HTTP API shapes and the configuration schema primitives used
//! to validate implementation-specific TOML sections.

pub mod api;
pub mod chains;
pub mod order;
pub mod quote;
pub mod serde_helpers;
pub mod universal;
pub mod validation;

pub use api::*;
pub use chains::*;
pub use order::*;
pub use quote::*;
pub use universal::*;
pub use validation::*;
