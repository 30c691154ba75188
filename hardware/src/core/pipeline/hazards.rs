//! Hazard Detection and Forwarding.
//!
//! This module implements the control logic shared by the stages:
//! 1. **Forwarding:** resolving a Decode operand from the youngest in-flight
//!    producer instead of the stale register file.
//! 2. **Hazard detection:** load-use dependencies, mispredicted jumps, and
//!    returns waiting for their target address.
//! 3. **Latch control:** the stall/bubble decision for each latch, and the
//!    selection of the next fetch address.

use log::debug;

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::signals::{ForwardBus, HazardBus, LatchControl, StatusBus};
use crate::isa::abi::RNONE;
use crate::isa::Instruction;

/// Where a forwarded operand came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// `RNONE`: the operand is zero.
    None,
    /// ALU result computed by Execute this cycle.
    Execute,
    /// Value read by Memory this cycle.
    MemoryRead,
    /// ALU result held in the M latch.
    MemoryAlu,
    /// Memory result held in the W latch.
    WritebackRead,
    /// ALU result held in the W latch.
    WritebackAlu,
    /// The register file.
    RegFile,
}

impl ForwardSource {
    /// Short name for trace output.
    pub fn name(self) -> &'static str {
        match self {
            ForwardSource::None => "none",
            ForwardSource::Execute => "e_valE",
            ForwardSource::MemoryRead => "m_valM",
            ForwardSource::MemoryAlu => "M_valE",
            ForwardSource::WritebackRead => "W_valM",
            ForwardSource::WritebackAlu => "W_valE",
            ForwardSource::RegFile => "regfile",
        }
    }
}

/// Resolves the value of a Decode source register.
///
/// Candidates are checked from youngest to oldest producer: Execute's
/// `dstE`, Memory's `dstM`, Memory's `dstE`, Writeback's `dstM`, then
/// Writeback's `dstE`. The first match wins; otherwise the register file is
/// read.
///
/// # Arguments
///
/// * `src` - Source register id, `RNONE` for no operand
/// * `fwd` - This cycle's forward bus
/// * `regs` - Register file
///
/// # Returns
///
/// The operand value and the source it was taken from.
pub fn forward_operand(src: u8, fwd: &ForwardBus, regs: &Gpr) -> (u32, ForwardSource) {
    if src == RNONE {
        return (0, ForwardSource::None);
    }

    let candidates = [
        (fwd.e_dste, fwd.e_vale, ForwardSource::Execute),
        (fwd.m_dstm, fwd.m_valm, ForwardSource::MemoryRead),
        (fwd.m_dste, fwd.m_vale, ForwardSource::MemoryAlu),
        (fwd.w_dstm, fwd.w_valm, ForwardSource::WritebackRead),
        (fwd.w_dste, fwd.w_vale, ForwardSource::WritebackAlu),
    ];

    candidates
        .iter()
        .find(|(dst, _, _)| *dst == src)
        .map(|&(_, val, source)| (val, source))
        .unwrap_or((regs.read(src), ForwardSource::RegFile))
}

/// Checks for a load-use hazard.
///
/// The instruction in Execute loads a register from memory that Decode
/// needs this cycle. The value only exists after Memory, so it cannot be
/// forwarded in time.
pub fn load_use_hazard(hazard: &HazardBus) -> bool {
    hazard.e_inst.is_load()
        && hazard.e_dstm != RNONE
        && (hazard.e_dstm == hazard.d_srca || hazard.e_dstm == hazard.d_srcb)
}

/// Checks whether the jump in Execute was predicted taken but is not.
pub fn mispredicted_branch(hazard: &HazardBus) -> bool {
    matches!(hazard.e_inst, Instruction::Jump(_)) && !hazard.e_cnd
}

/// Checks whether a `ret` is in Decode, Execute, or Memory.
pub fn return_in_flight(hazard: &HazardBus) -> bool {
    [hazard.d_inst, hazard.e_inst, hazard.m_inst].contains(&Instruction::Ret)
}

/// Decision for the F latch (predicted PC).
pub fn fetch_control(hazard: &HazardBus) -> LatchControl {
    if return_in_flight(hazard) || load_use_hazard(hazard) {
        LatchControl::Stall
    } else {
        LatchControl::Normal
    }
}

/// Decision for the D latch.
///
/// A load-use stall takes precedence. A misprediction squashes the wrongly
/// fetched instruction, and a draining `ret` inserts one bubble per cycle.
pub fn decode_control(hazard: &HazardBus) -> LatchControl {
    if load_use_hazard(hazard) {
        debug!("hazard: load-use on r{:x}, stalling F and D", hazard.e_dstm);
        LatchControl::Stall
    } else if mispredicted_branch(hazard) {
        debug!("hazard: {} not taken, squashing D and E", hazard.e_inst);
        LatchControl::Bubble
    } else if return_in_flight(hazard) {
        debug!("hazard: ret in flight, bubbling D");
        LatchControl::Bubble
    } else {
        LatchControl::Normal
    }
}

/// Decision for the E latch.
pub fn execute_control(hazard: &HazardBus) -> LatchControl {
    if mispredicted_branch(hazard) || load_use_hazard(hazard) {
        LatchControl::Bubble
    } else {
        LatchControl::Normal
    }
}

/// Decision for the M latch: no new work enters Memory while a faulting or
/// halting instruction drains.
pub fn memory_control(status: &StatusBus) -> LatchControl {
    if status.downstream_fault() {
        LatchControl::Bubble
    } else {
        LatchControl::Normal
    }
}

/// Decision for the W latch: a terminal status freezes Writeback.
pub fn writeback_control(status: &StatusBus) -> LatchControl {
    if status.w_stat.is_ok() {
        LatchControl::Normal
    } else {
        LatchControl::Stall
    }
}

/// Selects the address Fetch reads from.
///
/// A not-taken jump in Memory restores its fall-through address, a `ret` in
/// Writeback supplies the popped return address, and otherwise the
/// prediction stands.
pub fn select_pc(pred_pc: u32, fwd: &ForwardBus) -> u32 {
    if matches!(fwd.m_inst, Instruction::Jump(_)) && !fwd.m_cnd {
        fwd.m_vala
    } else if fwd.w_inst == Instruction::Ret {
        fwd.w_valm
    } else {
        pred_pc
    }
}
