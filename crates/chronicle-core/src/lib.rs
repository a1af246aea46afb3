//! Core types and trait definitions for the Chronicle fact tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod fact;
pub mod revision;
pub mod source;
pub mod store;
pub mod view;

pub use error::{Error, Result};
