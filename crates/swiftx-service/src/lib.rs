//! HTTP service for the SwiftX order relay.
//!
//! - `server`: axum router and listener
//! - `apis`: request handlers and the error-to-response mapping
//! - `factories`: the production backends registered with the engine builder

pub mod apis;
pub mod factories;
pub mod server;
