//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Computing `valE` for every instruction class (ALU results, addresses,
//!   stack pointer adjustments, pass-through constants).
//! - Updating the condition codes for `OPl`, unless a downstream instruction
//!   is faulting or halting.
//! - Resolving conditional moves and conditional jumps against the flags.

use log::trace;

use crate::core::arch::cc::ConditionCodes;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExecuteLatch, MemoryLatch};
use crate::core::pipeline::signals::{ForwardBus, HazardBus, StatusBus};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::Alu;
use crate::isa::abi::RNONE;
use crate::isa::Instruction;

/// Bytes a stack push or pop moves `%esp` by.
const STACK_WORD: u32 = 4;

/// Executes the execute stage.
///
/// Must run after Memory and Writeback so the status bus describes the two
/// instructions ahead of this one.
///
/// # Arguments
///
/// * `e` - The E latch
/// * `m` - The M latch, bubbled while a downstream instruction is faulting
/// * `cc` - Condition codes
/// * `status` - Statuses computed by Memory and Writeback this cycle
/// * `fwd` - Forward bus; receives `e_valE` and `e_dstE`
/// * `hazard` - Hazard bus; receives the Execute fields
pub fn execute_stage(
    e: &ExecuteLatch,
    m: &mut MemoryLatch,
    cc: &mut ConditionCodes,
    status: &StatusBus,
    fwd: &mut ForwardBus,
    hazard: &mut HazardBus,
) {
    let set_cc = matches!(e.inst, Instruction::Op(_)) && !status.downstream_fault();

    let vale = match e.inst {
        Instruction::Op(op) => {
            let out = Alu::execute(op, e.vala, e.valb);
            if set_cc {
                out.update_cc(cc);
            }
            out.value
        }
        Instruction::Irmov | Instruction::Dump => e.valc,
        Instruction::Cmov(_) => e.vala,
        Instruction::Rmmov | Instruction::Mrmov => e.valb.wrapping_add(e.valc),
        Instruction::Push | Instruction::Call => e.valb.wrapping_sub(STACK_WORD),
        Instruction::Pop | Instruction::Ret => e.valb.wrapping_add(STACK_WORD),
        Instruction::Halt | Instruction::Nop | Instruction::Jump(_) => 0,
    };

    let cnd = match e.inst {
        Instruction::Jump(cond) => cc.test(cond),
        _ => false,
    };

    let dste = match e.inst {
        Instruction::Cmov(cond) if !cc.test(cond) => RNONE,
        _ => e.dste,
    };

    fwd.e_vale = vale;
    fwd.e_dste = dste;

    hazard.e_inst = e.inst;
    hazard.e_dstm = e.dstm;
    hazard.e_cnd = cnd;

    trace!(
        "EX  stat={} {} valE={:#x} dstE={:x} cnd={} cc=[zf={} sf={} of={}]{}",
        e.stat,
        e.inst,
        vale,
        dste,
        cnd as u8,
        cc.zf as u8,
        cc.sf as u8,
        cc.of as u8,
        if set_cc { " set" } else { "" }
    );

    let next = MemoryLatch {
        stat: e.stat,
        inst: e.inst,
        cnd,
        vale,
        vala: e.vala,
        dste,
        dstm: e.dstm,
    };
    m.advance(hazards::memory_control(status), next);
}
