//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits the
//! register results of a normally completing instruction, publishes the
//! Writeback fields of the forward and status buses, and reports the status
//! that decides whether the simulation continues.

use log::trace;

use crate::common::error::Status;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::WritebackLatch;
use crate::core::pipeline::signals::{ForwardBus, StatusBus};
use crate::isa::Instruction;

/// Low bits of a `dump` operand that select diagnostics.
const DUMP_MASK: u32 = 0x7;

/// What the driver must do after Writeback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackOutcome {
    /// Status of the instruction in Writeback. Anything but `AOK` ends the
    /// simulation.
    pub stat: Status,
    /// Diagnostics requested by a `dump` instruction (bit 0 registers,
    /// bit 1 latches, bit 2 memory), zero otherwise.
    pub dump: u32,
}

impl WritebackOutcome {
    /// Whether the pipeline stops after this cycle.
    pub fn terminated(&self) -> bool {
        !self.stat.is_ok()
    }
}

/// Executes the writeback stage.
///
/// Registers are written only for `AOK` instructions: `dstE` first, then
/// `dstM`, so a `popl %esp` leaves the loaded value in `%esp`.
pub fn wb_stage(
    w: &WritebackLatch,
    regs: &mut Gpr,
    fwd: &mut ForwardBus,
    status: &mut StatusBus,
) -> WritebackOutcome {
    fwd.w_inst = w.inst;
    fwd.w_vale = w.vale;
    fwd.w_valm = w.valm;
    fwd.w_dste = w.dste;
    fwd.w_dstm = w.dstm;

    status.w_stat = w.stat;

    let dump = if w.inst == Instruction::Dump {
        w.vale & DUMP_MASK
    } else {
        0
    };

    if w.stat.is_ok() {
        regs.write(w.dste, w.vale);
        regs.write(w.dstm, w.valm);
    }

    trace!(
        "WB  stat={} {} valE={:#x}->r{:x} valM={:#x}->r{:x}",
        w.stat,
        w.inst,
        w.vale,
        w.dste,
        w.valm,
        w.dstm
    );

    WritebackOutcome { stat: w.stat, dump }
}
