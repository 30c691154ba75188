//! Y86 instruction codes (high nibble of the opcode byte).

pub const IHALT: u8 = 0x0;
pub const INOP: u8 = 0x1;
/// Shared by `rrmovl` and the conditional moves; the function code selects.
pub const ICMOVXX: u8 = 0x2;
pub const IIRMOVL: u8 = 0x3;
pub const IRMMOVL: u8 = 0x4;
pub const IMRMOVL: u8 = 0x5;
pub const IOPL: u8 = 0x6;
pub const IJXX: u8 = 0x7;
pub const ICALL: u8 = 0x8;
pub const IRET: u8 = 0x9;
pub const IPUSHL: u8 = 0xA;
pub const IPOPL: u8 = 0xB;
pub const IDUMP: u8 = 0xC;
