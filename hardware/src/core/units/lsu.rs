//! Load/Store Unit (LSU).
//!
//! This module decides which data-memory access, if any, an instruction in
//! the Memory stage performs, and carries it out against main memory. Loads
//! and stores are whole aligned words.

use crate::common::data::AccessType;
use crate::common::error::MemError;
use crate::core::memory::Memory;
use crate::isa::Instruction;

/// A data-memory access requested by the Memory stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemOp {
    /// Read the word at the address.
    Read(u32),
    /// Write `value` to the word at `addr`.
    Write {
        /// Target address.
        addr: u32,
        /// Word to store.
        value: u32,
    },
}

impl MemOp {
    /// Access kind, for tracing.
    pub fn access_type(self) -> AccessType {
        match self {
            MemOp::Read(_) => AccessType::Read,
            MemOp::Write { .. } => AccessType::Write,
        }
    }

    /// Target address.
    pub fn addr(self) -> u32 {
        match self {
            MemOp::Read(addr) | MemOp::Write { addr, .. } => addr,
        }
    }
}

/// Load/Store Unit for the Memory stage.
pub struct Lsu;

impl Lsu {
    /// Selects the access performed by an instruction.
    ///
    /// Stores, loads, pushes, and calls address memory with the ALU result;
    /// pops and returns use the saved stack pointer in `valA`. Stores write
    /// `valA`.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction in the Memory stage
    /// * `vale` - ALU result from Execute
    /// * `vala` - Pass-through operand from Execute
    ///
    /// # Returns
    ///
    /// The access to perform, or `None` for instructions that do not touch
    /// data memory.
    pub fn plan(inst: Instruction, vale: u32, vala: u32) -> Option<MemOp> {
        match inst {
            Instruction::Mrmov => Some(MemOp::Read(vale)),
            Instruction::Pop | Instruction::Ret => Some(MemOp::Read(vala)),
            Instruction::Rmmov | Instruction::Push | Instruction::Call => Some(MemOp::Write {
                addr: vale,
                value: vala,
            }),
            _ => None,
        }
    }

    /// Performs an access.
    ///
    /// # Returns
    ///
    /// The loaded word for reads, `None` for writes.
    pub fn perform(op: MemOp, mem: &mut Memory) -> Result<Option<u32>, MemError> {
        match op {
            MemOp::Read(addr) => mem.read_word(addr).map(Some),
            MemOp::Write { addr, value } => mem.write_word(addr, value).map(|_| None),
        }
    }
}
