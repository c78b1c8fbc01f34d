//! Core types and utilities for the XRPool yield dashboard
//!
//! This crate provides shared pieces used across all components:
//! - Feed identifiers and readings
//! - Dashboard configuration
//! - Error taxonomy
//! - The pure derivation layer (yield and USD figures)
//! - Display formatting helpers

pub mod config;
pub mod derive;
pub mod errors;
pub mod format;
pub mod types;

pub use config::*;
pub use derive::*;
pub use errors::*;
pub use format::*;
pub use types::*;
