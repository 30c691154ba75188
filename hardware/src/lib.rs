//! Y86 Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-level simulator of the Y86 instruction set
//! on a classic five-stage pipeline. It reproduces the pipeline's timing as
//! well as its architectural results: operand forwarding, load-use stalls,
//! branch misprediction recovery, and return-address stalls.
//!
//! # Architecture
//!
//! * **Core**: Fetch, Decode, Execute, Memory, and Writeback stages joined by
//!   the F, D, E, M, and W latches, clocked by [`core::Cpu`].
//! * **Memory**: A flat, bounds-checked, little-endian byte array.
//! * **Harness**: A loader for assembler listings (`.yo`) and text dumps of
//!   registers, latches, and memory.
//!
//! # Modules
//!
//! * `common`: Shared types, status codes, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Program loading and diagnostic dumps.
//! * `stats`: Performance statistics collection.

/// Shared types, status codes, and error handling.
///
/// Provides the pipeline [`common::Status`] values and the typed errors
/// returned by memory, decoding, loading, and the driver.
pub mod common;

/// Configuration system for trace, memory size, cycle limit, and output.
///
/// Loads and parses TOML configuration files.
pub mod config;

/// CPU core implementation including pipeline stages and execution units.
///
/// Implements the 5-stage in-order pipeline, the hazard and forwarding
/// logic, the architectural state, and main memory.
pub mod core;

/// Instruction Set Architecture definitions and decoders.
///
/// Implements Y86 opcode decoding into the closed [`isa::Instruction`] type,
/// plus register and function-code constants.
pub mod isa;

/// Simulation harness: listing loader and diagnostic dumps.
pub mod sim;

/// Performance statistics collection and reporting.
///
/// Tracks cycles, retired instructions, stalls, bubbles, and branch
/// prediction accuracy.
pub mod stats;
