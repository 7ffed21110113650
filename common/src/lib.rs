//! Shared building blocks for the Confluenze launcher.
//!
//! ## Architecture
//!
//! - **common** (this crate): types every other crate leans on
//! - **launcher-core**: discovery, bootstrap and process supervision
//! - **confluenze**: the binary wiring logging, paths and signals together

pub mod error;

pub use error::error_location::ErrorLocation;
