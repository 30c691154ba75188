//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch holds the values one stage hands to the next. A latch is
//! written once per cycle by the stage behind it and read once by the stage
//! it feeds. The `Default` value of every latch is the neutral bubble: normal
//! status, a `nop`, and no destination registers.

use crate::common::error::Status;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::abi::RNONE;
use crate::isa::Instruction;

/// F latch: the predicted address of the next instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchLatch {
    /// Predicted PC.
    pub pred_pc: u32,
}

/// D latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLatch {
    /// Instruction status.
    pub stat: Status,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Register specifier `rA`.
    pub ra: u8,
    /// Register specifier `rB`.
    pub rb: u8,
    /// Constant word.
    pub valc: u32,
    /// Fall-through address.
    pub valp: u32,
}

impl Default for DecodeLatch {
    fn default() -> Self {
        Self {
            stat: Status::Aok,
            inst: Instruction::Nop,
            ra: RNONE,
            rb: RNONE,
            valc: 0,
            valp: 0,
        }
    }
}

/// E latch (Decode to Execute).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecuteLatch {
    /// Instruction status.
    pub stat: Status,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Constant word.
    pub valc: u32,
    /// First operand (or `valP` for jumps and calls).
    pub vala: u32,
    /// Second operand.
    pub valb: u32,
    /// Destination of the ALU result.
    pub dste: u8,
    /// Destination of the memory result.
    pub dstm: u8,
    /// Source register of `valA`.
    pub srca: u8,
    /// Source register of `valB`.
    pub srcb: u8,
}

impl Default for ExecuteLatch {
    fn default() -> Self {
        Self {
            stat: Status::Aok,
            inst: Instruction::Nop,
            valc: 0,
            vala: 0,
            valb: 0,
            dste: RNONE,
            dstm: RNONE,
            srca: RNONE,
            srcb: RNONE,
        }
    }
}

/// M latch (Execute to Memory).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLatch {
    /// Instruction status.
    pub stat: Status,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Evaluated jump condition.
    pub cnd: bool,
    /// ALU result.
    pub vale: u32,
    /// Pass-through operand.
    pub vala: u32,
    /// Destination of the ALU result.
    pub dste: u8,
    /// Destination of the memory result.
    pub dstm: u8,
}

impl Default for MemoryLatch {
    fn default() -> Self {
        Self {
            stat: Status::Aok,
            inst: Instruction::Nop,
            cnd: false,
            vale: 0,
            vala: 0,
            dste: RNONE,
            dstm: RNONE,
        }
    }
}

/// W latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WritebackLatch {
    /// Instruction status.
    pub stat: Status,
    /// Decoded instruction.
    pub inst: Instruction,
    /// ALU result.
    pub vale: u32,
    /// Memory result.
    pub valm: u32,
    /// Destination of the ALU result.
    pub dste: u8,
    /// Destination of the memory result.
    pub dstm: u8,
}

impl Default for WritebackLatch {
    fn default() -> Self {
        Self {
            stat: Status::Aok,
            inst: Instruction::Nop,
            vale: 0,
            valm: 0,
            dste: RNONE,
            dstm: RNONE,
        }
    }
}

macro_rules! impl_staged_latch {
    ($($latch:ty),*) => {$(
        impl PipelineLatch for $latch {
            fn flush(&mut self) {
                *self = Self::default();
            }

            fn is_empty(&self) -> bool {
                self.stat.is_ok() && self.inst == Instruction::Nop
            }
        }
    )*};
}

impl_staged_latch!(DecodeLatch, ExecuteLatch, MemoryLatch, WritebackLatch);

/// All five pipeline latches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// F latch.
    pub f: FetchLatch,
    /// D latch.
    pub d: DecodeLatch,
    /// E latch.
    pub e: ExecuteLatch,
    /// M latch.
    pub m: MemoryLatch,
    /// W latch.
    pub w: WritebackLatch,
}

impl Latches {
    /// Returns every latch to its neutral state.
    pub fn clear(&mut self) {
        self.f = FetchLatch::default();
        self.d.flush();
        self.e.flush();
        self.m.flush();
        self.w.flush();
    }
}
