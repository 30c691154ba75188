//! Diagnostic Dumps.
//!
//! Text dumps of the program registers, the pipeline latches, and memory,
//! written to any [`Write`] sink. `dump` instructions select them with the
//! low three bits of their operand; a faulting instruction reaching
//! Writeback prints all three.

use std::io::{self, Write};

use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::gpr::Gpr;
use crate::core::memory::Memory;
use crate::core::pipeline::latches::Latches;
use crate::isa::funct::{DUMP_LATCHES, DUMP_MEMORY, DUMP_REGISTERS};

/// Which dumps to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DumpFlags {
    /// Program registers.
    pub registers: bool,
    /// Condition codes and pipeline latches.
    pub latches: bool,
    /// Memory contents.
    pub memory: bool,
}

impl DumpFlags {
    /// Every dump.
    pub const ALL: DumpFlags = DumpFlags {
        registers: true,
        latches: true,
        memory: true,
    };

    /// Decodes the operand of a `dump` instruction.
    pub fn from_mask(mask: u32) -> Self {
        Self {
            registers: mask & DUMP_REGISTERS != 0,
            latches: mask & DUMP_LATCHES != 0,
            memory: mask & DUMP_MEMORY != 0,
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        !(self.registers || self.latches || self.memory)
    }
}

/// Writes the condition codes and every latch.
pub fn dump_latches(out: &mut dyn Write, cc: &ConditionCodes, l: &Latches) -> io::Result<()> {
    writeln!(
        out,
        "CC - ZF: {:01x} SF: {:01x} OF: {:01x}",
        cc.zf as u8, cc.sf as u8, cc.of as u8
    )?;
    writeln!(out, "F - predPC: {:08x}", l.f.pred_pc)?;

    let d = &l.d;
    writeln!(
        out,
        "D - stat: {:01x} icode: {:01x} ifun: {:01x} rA: {:01x} rB: {:01x} valC: {:08x}  valP: {:08x}",
        d.stat.code(),
        d.inst.icode(),
        d.inst.ifun(),
        d.ra,
        d.rb,
        d.valc,
        d.valp
    )?;

    let e = &l.e;
    writeln!(
        out,
        "E - stat: {:01x} icode: {:01x}  ifun: {:01x}  valC: {:08x} valA: {:08x} valB: {:08x}",
        e.stat.code(),
        e.inst.icode(),
        e.inst.ifun(),
        e.valc,
        e.vala,
        e.valb
    )?;
    writeln!(
        out,
        "    dstE: {:01x} dstM: {:01x} srcA: {:01x} srcB: {:01x}",
        e.dste, e.dstm, e.srca, e.srcb
    )?;

    let m = &l.m;
    writeln!(
        out,
        "M - stat: {:01x} icode: {:01x} Cnd: {:01x} valE: {:08x} valA: {:08x} dstE: {:01x} dstM: {:01x}",
        m.stat.code(),
        m.inst.icode(),
        m.cnd as u8,
        m.vale,
        m.vala,
        m.dste,
        m.dstm
    )?;

    let w = &l.w;
    writeln!(
        out,
        "W - stat: {:01x} icode: {:01x} valE: {:08x} valM: {:08x} dstE: {:01x} dstM: {:01x}",
        w.stat.code(),
        w.inst.icode(),
        w.vale,
        w.valm,
        w.dste,
        w.dstm
    )?;
    writeln!(out)
}

/// Writes the selected dumps in register, latch, memory order.
pub fn dump_state(
    out: &mut dyn Write,
    flags: DumpFlags,
    regs: &Gpr,
    cc: &ConditionCodes,
    latches: &Latches,
    mem: &Memory,
) -> io::Result<()> {
    if flags.registers {
        regs.dump(out)?;
    }
    if flags.latches {
        dump_latches(out, cc, latches)?;
    }
    if flags.memory {
        mem.dump(out)?;
    }
    Ok(())
}
