//! Y86 function codes (low nibble of the opcode byte).

/// `OPl` family.
pub const ADDL: u8 = 0x0;
pub const SUBL: u8 = 0x1;
pub const ANDL: u8 = 0x2;
pub const XORL: u8 = 0x3;

/// Condition selectors shared by `cmovXX` and `jXX`.
pub const C_ALWAYS: u8 = 0x0;
pub const C_LE: u8 = 0x1;
pub const C_L: u8 = 0x2;
pub const C_E: u8 = 0x3;
pub const C_NE: u8 = 0x4;
pub const C_GE: u8 = 0x5;
pub const C_G: u8 = 0x6;

/// Bits of a `dump` constant selecting which diagnostics to print.
pub const DUMP_REGISTERS: u32 = 0x1;
pub const DUMP_LATCHES: u32 = 0x2;
pub const DUMP_MEMORY: u32 = 0x4;
