//! Memory Access Types and Bit-Field Helpers.
//!
//! This module defines the classification of memory accesses used by the
//! fetch and memory stages, plus the nibble and little-endian word helpers
//! used to pull instruction fields and data words out of raw bytes.

/// Type of memory access operation.
///
/// Used to tag trace output and errors with the kind of access that
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access (`mrmovl`, `popl`, `ret`).
    Read,

    /// Data write access (`rmmovl`, `pushl`, `call`).
    Write,
}

/// Returns the high nibble (bits 4-7) of a byte.
#[inline]
pub fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

/// Returns the low nibble (bits 0-3) of a byte.
#[inline]
pub fn low_nibble(byte: u8) -> u8 {
    byte & 0xf
}

/// Assembles a 32-bit word from four bytes in little-endian order.
#[inline]
pub fn build_word(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}
