//! Y86 register identifiers.

/// Accumulator register (`%eax`).
pub const REG_EAX: u8 = 0x0;
/// Counter register (`%ecx`).
pub const REG_ECX: u8 = 0x1;
/// Data register (`%edx`).
pub const REG_EDX: u8 = 0x2;
/// Base register (`%ebx`).
pub const REG_EBX: u8 = 0x3;
/// Stack pointer (`%esp`).
pub const REG_ESP: u8 = 0x4;
/// Frame pointer (`%ebp`).
pub const REG_EBP: u8 = 0x5;
/// Source index (`%esi`).
pub const REG_ESI: u8 = 0x6;
/// Destination index (`%edi`).
pub const REG_EDI: u8 = 0x7;

/// Encoding for "no register".
pub const RNONE: u8 = 0xf;

/// Number of architectural registers.
pub const NUM_REGS: usize = 8;

/// Assembler names, indexed by register id.
pub const REG_NAMES: [&str; NUM_REGS] = [
    "%eax", "%ecx", "%edx", "%ebx", "%esp", "%ebp", "%esi", "%edi",
];

/// Returns the assembler name for a register id, or `"----"` for `RNONE`
/// and unused encodings.
pub fn reg_name(id: u8) -> &'static str {
    REG_NAMES.get(id as usize).copied().unwrap_or("----")
}
