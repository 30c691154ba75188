//! Condition-Code Register.
//!
//! Three single-bit flags set by the `OPl` family in the Execute stage and
//! tested by conditional moves and conditional jumps.

use crate::isa::Cond;

/// Zero, sign, and overflow flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionCodes {
    /// Result was zero.
    pub zf: bool,
    /// Result was negative.
    pub sf: bool,
    /// Signed overflow occurred.
    pub of: bool,
}

impl ConditionCodes {
    /// Clears all three flags.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluates a condition against the current flags.
    pub fn test(&self, cond: Cond) -> bool {
        let lt = self.sf ^ self.of;
        match cond {
            Cond::Always => true,
            Cond::Le => lt || self.zf,
            Cond::L => lt,
            Cond::E => self.zf,
            Cond::Ne => !self.zf,
            Cond::Ge => !lt,
            Cond::G => !lt && !self.zf,
        }
    }
}
