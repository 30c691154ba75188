//! Per-cycle pipeline signals.
//!
//! This module defines the buses that carry values between stages within a
//! single cycle, and the stall/bubble decision applied to each latch at the
//! clock edge. The buses are rebuilt from scratch every cycle by the stages
//! as they run from Writeback back to Fetch.

use crate::common::error::Status;
use crate::isa::abi::RNONE;
use crate::isa::Instruction;

/// What happens to a latch at the end of a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatchControl {
    /// Take the newly computed values.
    #[default]
    Normal,
    /// Keep the current contents.
    Stall,
    /// Replace the contents with a bubble.
    Bubble,
}

/// Values and destinations produced downstream of Decode, used for operand
/// forwarding and Fetch address selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForwardBus {
    /// ALU result computed by Execute this cycle.
    pub e_vale: u32,
    /// Destination of `e_vale` (`RNONE` for a failed conditional move).
    pub e_dste: u8,

    /// Instruction in the M latch.
    pub m_inst: Instruction,
    /// Jump condition held in the M latch.
    pub m_cnd: bool,
    /// ALU result held in the M latch.
    pub m_vale: u32,
    /// Value read by Memory this cycle.
    pub m_valm: u32,
    /// Pass-through operand held in the M latch.
    pub m_vala: u32,
    /// ALU destination held in the M latch.
    pub m_dste: u8,
    /// Memory destination held in the M latch.
    pub m_dstm: u8,

    /// Instruction in the W latch.
    pub w_inst: Instruction,
    /// ALU result held in the W latch.
    pub w_vale: u32,
    /// Memory result held in the W latch.
    pub w_valm: u32,
    /// ALU destination held in the W latch.
    pub w_dste: u8,
    /// Memory destination held in the W latch.
    pub w_dstm: u8,
}

impl Default for ForwardBus {
    fn default() -> Self {
        Self {
            e_vale: 0,
            e_dste: RNONE,
            m_inst: Instruction::Nop,
            m_cnd: false,
            m_vale: 0,
            m_valm: 0,
            m_vala: 0,
            m_dste: RNONE,
            m_dstm: RNONE,
            w_inst: Instruction::Nop,
            w_vale: 0,
            w_valm: 0,
            w_dste: RNONE,
            w_dstm: RNONE,
        }
    }
}

/// Control signals used to decide stalls and bubbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardBus {
    /// Source A selected by Decode this cycle.
    pub d_srca: u8,
    /// Source B selected by Decode this cycle.
    pub d_srcb: u8,
    /// Instruction in the D latch.
    pub d_inst: Instruction,
    /// Instruction in the E latch.
    pub e_inst: Instruction,
    /// Memory destination held in the E latch.
    pub e_dstm: u8,
    /// Jump condition evaluated by Execute this cycle.
    pub e_cnd: bool,
    /// Instruction in the M latch.
    pub m_inst: Instruction,
}

impl Default for HazardBus {
    fn default() -> Self {
        Self {
            d_srca: RNONE,
            d_srcb: RNONE,
            d_inst: Instruction::Nop,
            e_inst: Instruction::Nop,
            e_dstm: RNONE,
            e_cnd: false,
            m_inst: Instruction::Nop,
        }
    }
}

/// Statuses of the instructions leaving Memory and sitting in Writeback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusBus {
    /// Status Memory computed this cycle.
    pub m_stat: Status,
    /// Status of the W latch.
    pub w_stat: Status,
}

impl StatusBus {
    /// Whether either downstream instruction is faulting or halting.
    pub fn downstream_fault(&self) -> bool {
        !self.m_stat.is_ok() || !self.w_stat.is_ok()
    }
}
