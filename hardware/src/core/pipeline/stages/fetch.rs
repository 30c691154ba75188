//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It performs:
//! 1. **PC Selection:** correcting a mispredicted jump, taking a return
//!    address out of Writeback, or following the prediction.
//! 2. **Instruction Fetch:** reading the opcode, register specifiers, and
//!    constant word, and classifying the instruction status.
//! 3. **Prediction:** jumps and calls are predicted taken; everything else
//!    falls through.

use log::{debug, trace};

use crate::common::data::{high_nibble, low_nibble, AccessType};
use crate::common::error::Status;
use crate::core::memory::Memory;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{DecodeLatch, FetchLatch};
use crate::core::pipeline::signals::{ForwardBus, HazardBus, LatchControl};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;

/// Executes the fetch stage.
///
/// # Arguments
///
/// * `f` - The F latch; its predicted PC is updated unless Fetch is stalled
/// * `d` - The D latch, written according to the hazard unit's decision
/// * `mem` - Main memory
/// * `fwd` - This cycle's forward bus
/// * `hazard` - This cycle's hazard bus
pub fn fetch_stage(
    f: &mut FetchLatch,
    d: &mut DecodeLatch,
    mem: &Memory,
    fwd: &ForwardBus,
    hazard: &HazardBus,
) {
    let pc = hazards::select_pc(f.pred_pc, fwd);
    let fetched = fetch_instruction(mem, pc);
    let pred_pc = predict_pc(&fetched);

    trace!(
        "IF  pc={:#05x} stat={} {} rA={:x} rB={:x} valC={:#x} pred={:#05x}",
        pc,
        fetched.stat,
        fetched.inst,
        fetched.ra,
        fetched.rb,
        fetched.valc,
        pred_pc
    );

    if fetched.stat == Status::Adr {
        debug!("IF  {:?} fault at {:#x}", AccessType::Fetch, pc);
    }

    if hazards::fetch_control(hazard) != LatchControl::Stall {
        f.pred_pc = pred_pc;
    }
    d.advance(hazards::decode_control(hazard), fetched);
}

/// Reads and splits the instruction at `pc`.
///
/// An opcode that does not decode yields `INS`; a byte that cannot be read
/// yields `ADR`. A faulting instruction is carried as a `nop` with the fault
/// in its status, and occupies one byte.
///
/// # Returns
///
/// The D latch contents for the fetched instruction, with `valP` set to the
/// fall-through address.
pub fn fetch_instruction(mem: &Memory, pc: u32) -> DecodeLatch {
    let mut out = DecodeLatch {
        valp: pc.wrapping_add(1),
        ..DecodeLatch::default()
    };

    let opcode = match mem.read_byte(pc) {
        Ok(byte) => byte,
        Err(_) => {
            out.stat = Status::Adr;
            return out;
        }
    };

    let inst = match Instruction::decode(opcode) {
        Ok(inst) => inst,
        Err(_) => {
            out.stat = Status::Ins;
            return out;
        }
    };

    out.inst = inst;
    out.valp = pc.wrapping_add(inst.length());
    if inst == Instruction::Halt {
        out.stat = Status::Hlt;
    }

    if inst.needs_regids() {
        match mem.read_byte(pc.wrapping_add(1)) {
            Ok(regs) => {
                out.ra = high_nibble(regs);
                out.rb = low_nibble(regs);
            }
            Err(_) => out.stat = Status::Adr,
        }
    }

    if inst.needs_valc() {
        match mem.read_unaligned_word(pc.wrapping_add(inst.valc_offset())) {
            Ok(valc) => out.valc = valc,
            Err(_) => out.stat = Status::Adr,
        }
    }

    out
}

/// Predicts the next PC: the target for jumps and calls, `valP` otherwise.
pub fn predict_pc(fetched: &DecodeLatch) -> u32 {
    match fetched.inst {
        Instruction::Jump(_) | Instruction::Call => fetched.valc,
        _ => fetched.valp,
    }
}
