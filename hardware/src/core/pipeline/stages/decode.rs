//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It selects the
//! source and destination registers of the instruction in D, resolves both
//! operand values through the forwarding network, and publishes its sources
//! on the hazard bus for load-use detection.

use log::trace;

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::{self, ForwardSource};
use crate::core::pipeline::latches::{DecodeLatch, ExecuteLatch};
use crate::core::pipeline::signals::{ForwardBus, HazardBus};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::abi::{REG_ESP, RNONE};
use crate::isa::Instruction;

/// Executes the decode stage.
///
/// Must run after Execute so the hazard bus already carries the Execute
/// fields needed to decide whether the E latch is bubbled.
pub fn decode_stage(
    d: &DecodeLatch,
    e: &mut ExecuteLatch,
    regs: &Gpr,
    fwd: &ForwardBus,
    hazard: &mut HazardBus,
) {
    let srca = src_a(d);
    let srcb = src_b(d);

    hazard.d_srca = srca;
    hazard.d_srcb = srcb;
    hazard.d_inst = d.inst;

    let (vala, a_from) = match d.inst {
        Instruction::Jump(_) | Instruction::Call => (d.valp, None),
        _ => {
            let (val, from) = hazards::forward_operand(srca, fwd, regs);
            (val, Some(from))
        }
    };
    let (valb, b_from) = hazards::forward_operand(srcb, fwd, regs);

    let next = ExecuteLatch {
        stat: d.stat,
        inst: d.inst,
        valc: d.valc,
        vala,
        valb,
        dste: dst_e(d),
        dstm: dst_m(d),
        srca,
        srcb,
    };

    trace!(
        "ID  stat={} {} srcA={:x} valA={:#x} ({}) srcB={:x} valB={:#x} ({})",
        next.stat,
        next.inst,
        srca,
        vala,
        a_from.map_or("valP", ForwardSource::name),
        srcb,
        valb,
        b_from.name()
    );

    e.advance(hazards::execute_control(hazard), next);
}

/// Source A: `rA` for moves, stores, ALU operations, and pushes; the stack
/// pointer for `popl` and `ret`.
pub fn src_a(d: &DecodeLatch) -> u8 {
    match d.inst {
        Instruction::Cmov(_) | Instruction::Rmmov | Instruction::Op(_) | Instruction::Push => d.ra,
        Instruction::Pop | Instruction::Ret => REG_ESP,
        _ => RNONE,
    }
}

/// Source B: `rB` for memory and ALU operations; the stack pointer for
/// stack operations.
pub fn src_b(d: &DecodeLatch) -> u8 {
    match d.inst {
        Instruction::Mrmov | Instruction::Rmmov | Instruction::Op(_) => d.rb,
        Instruction::Push | Instruction::Pop | Instruction::Call | Instruction::Ret => REG_ESP,
        _ => RNONE,
    }
}

/// Destination of the ALU result.
pub fn dst_e(d: &DecodeLatch) -> u8 {
    match d.inst {
        Instruction::Cmov(_) | Instruction::Irmov | Instruction::Op(_) => d.rb,
        Instruction::Push | Instruction::Pop | Instruction::Call | Instruction::Ret => REG_ESP,
        _ => RNONE,
    }
}

/// Destination of the memory result.
pub fn dst_m(d: &DecodeLatch) -> u8 {
    match d.inst {
        Instruction::Mrmov | Instruction::Pop => d.ra,
        _ => RNONE,
    }
}
