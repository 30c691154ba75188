//! Y86 General-Purpose Register File.
//!
//! This module implements the eight 32-bit program registers. Register ids
//! above 7 (in particular `RNONE`) are not backed by storage: they read as
//! zero and writes to them are silently dropped.

use std::io::{self, Write};

use crate::isa::abi::{self, NUM_REGS};

/// General-Purpose Register file.
///
/// Mutated only by the Writeback stage and read only by Decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `id` - Register id (0-7); any other id reads as 0.
    pub fn read(&self, id: u8) -> u32 {
        self.regs.get(id as usize).copied().unwrap_or(0)
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `id` - Register id (0-7); writes to any other id are ignored.
    /// * `val` - The 32-bit value to write
    pub fn write(&mut self, id: u8, val: u32) {
        if let Some(reg) = self.regs.get_mut(id as usize) {
            *reg = val;
        }
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; NUM_REGS];
    }

    /// Returns a copy of all eight registers, indexed by id.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps the program registers, four per line, followed by a blank line.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        for (line, vals) in self.regs.chunks(4).enumerate() {
            let fields: Vec<String> = vals
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{}: {:08x}", abi::reg_name((line * 4 + i) as u8), v))
                .collect();
            writeln!(out, "{}", fields.join(" "))?;
        }
        writeln!(out)
    }
}
