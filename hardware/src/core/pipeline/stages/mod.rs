//! Pipeline stage implementations.
//!
//! Contains the five stages of the instruction pipeline:
//! - Fetch: selects the PC, reads and splits one instruction, predicts the next PC
//! - Decode: selects source and destination registers and forwards operands
//! - Execute: runs the ALU, sets condition codes, resolves conditions
//! - Memory: performs the data access of loads, stores, and stack operations
//! - Writeback: commits registers and reports termination
//!
//! Each stage reads only its own latch and the buses filled earlier in the
//! same cycle, and writes only the latch in front of it. The driver calls
//! them from Writeback back to Fetch so every stage sees the latch values
//! from the end of the previous cycle.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::{wb_stage, WritebackOutcome};
