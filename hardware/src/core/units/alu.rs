//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU used by the Execute stage
//! for the `OPl` family. Alongside the result it produces the flag values
//! the condition-code register takes when the stage enables a CC update.

use crate::core::arch::cc::ConditionCodes;
use crate::isa::AluFn;

/// Result of an ALU operation together with the flags it generates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOutput {
    /// 32-bit result.
    pub value: u32,
    /// Result is zero.
    pub zf: bool,
    /// Result is negative.
    pub sf: bool,
    /// Signed overflow. `None` for the logical operations, which leave the
    /// previous overflow flag in place.
    pub of: Option<bool>,
}

impl AluOutput {
    /// Applies the generated flags to the condition-code register.
    pub fn update_cc(&self, cc: &mut ConditionCodes) {
        cc.zf = self.zf;
        cc.sf = self.sf;
        if let Some(of) = self.of {
            cc.of = of;
        }
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Operands follow the `OPl rA, rB` encoding: `a` comes from `rA`,
    /// `b` from `rB`, and subtraction computes `b - a`.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a` - Operand from `rA` (`valA`)
    /// * `b` - Operand from `rB` (`valB`)
    ///
    /// # Returns
    ///
    /// The result and the flags it generates.
    pub fn execute(op: AluFn, a: u32, b: u32) -> AluOutput {
        let (value, of) = match op {
            AluFn::Add => {
                let (_, of) = (b as i32).overflowing_add(a as i32);
                (b.wrapping_add(a), Some(of))
            }
            AluFn::Sub => {
                let (_, of) = (b as i32).overflowing_sub(a as i32);
                (b.wrapping_sub(a), Some(of))
            }
            AluFn::And => (b & a, None),
            AluFn::Xor => (b ^ a, None),
        };

        AluOutput {
            value,
            zf: value == 0,
            sf: (value as i32) < 0,
            of,
        }
    }
}
