//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs the
//! data-memory access of the instruction in M, converts an access fault into
//! the `ADR` status, and publishes the Memory fields of the forward, hazard,
//! and status buses.

use log::{debug, trace};

use crate::common::error::Status;
use crate::core::memory::Memory;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{MemoryLatch, WritebackLatch};
use crate::core::pipeline::signals::{ForwardBus, HazardBus, StatusBus};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::lsu::Lsu;

/// Executes the memory stage.
///
/// An instruction that already carries a non-normal status performs no
/// access. A failing access marks a normal instruction `ADR` and leaves
/// memory untouched.
///
/// # Arguments
///
/// * `m` - The M latch
/// * `w` - The W latch, frozen once Writeback holds a terminal status
/// * `mem` - Main memory
/// * `fwd` - Forward bus; receives the Memory fields
/// * `hazard` - Hazard bus; receives `M_icode`
/// * `status` - Status bus; `w_stat` must already be set by Writeback
pub fn mem_stage(
    m: &MemoryLatch,
    w: &mut WritebackLatch,
    mem: &mut Memory,
    fwd: &mut ForwardBus,
    hazard: &mut HazardBus,
    status: &mut StatusBus,
) {
    let mut stat = m.stat;
    let mut valm = m.vala;

    if m.stat.is_ok() {
        if let Some(op) = Lsu::plan(m.inst, m.vale, m.vala) {
            match Lsu::perform(op, mem) {
                Ok(Some(loaded)) => valm = loaded,
                Ok(None) => {}
                Err(err) => {
                    debug!("MEM {:?} fault at {:#x}: {}", op.access_type(), op.addr(), err);
                    stat = Status::Adr;
                }
            }
        }
    }

    status.m_stat = stat;

    fwd.m_inst = m.inst;
    fwd.m_cnd = m.cnd;
    fwd.m_vale = m.vale;
    fwd.m_valm = valm;
    fwd.m_vala = m.vala;
    fwd.m_dste = m.dste;
    fwd.m_dstm = m.dstm;

    hazard.m_inst = m.inst;

    trace!(
        "MEM stat={} {} valE={:#x} valM={:#x} dstE={:x} dstM={:x}",
        stat,
        m.inst,
        m.vale,
        valm,
        m.dste,
        m.dstm
    );

    let next = WritebackLatch {
        stat,
        inst: m.inst,
        vale: m.vale,
        valm,
        dste: m.dste,
        dstm: m.dstm,
    };
    w.advance(hazards::writeback_control(status), next);
}
