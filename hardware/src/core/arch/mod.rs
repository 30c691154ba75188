//! Y86 architectural state.
//!
//! This module contains the programmer-visible state mutated by the
//! pipeline: the general-purpose register file and the condition codes.

/// Condition-code register (ZF, SF, OF) and condition evaluation.
pub mod cc;

/// General-Purpose Register file implementation.
pub mod gpr;
