//! Y86 Instruction Set Architecture.
//!
//! Defines the register identifiers, the raw instruction and function code
//! constants, and the typed [`Instruction`] the pipeline operates on.

/// Register identifiers and their assembler names.
pub mod abi;

/// Function code constants for the ALU, move, and jump families.
pub mod funct;

/// Typed instruction representation and opcode decoding.
pub mod instruction;

/// Instruction code constants (high nibble of the opcode byte).
pub mod opcodes;

pub use instruction::{AluFn, Cond, Instruction};
