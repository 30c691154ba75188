//! Common utilities and types used throughout the Y86 pipeline simulator.
//!
//! This module provides the pipeline status codes, error types, and the small
//! bit-field helpers shared by the memory, fetch, and loader components.

/// Bit-field and byte assembly helpers.
pub mod data;

/// Status codes and error types.
pub mod error;

pub use data::AccessType;
pub use error::{IllegalInstruction, LoadError, MemError, SimError, Status};
