//! Main Memory Array.
//!
//! A flat, byte-addressed, little-endian store. Every accessor is bounds
//! checked and returns a [`MemError`] instead of touching memory when the
//! access is invalid, so a faulting instruction never leaves a partial write
//! behind.

use std::io::{self, Write};

use crate::common::data::build_word;
use crate::common::error::MemError;

/// Default memory size in bytes (1024 words).
pub const DEFAULT_MEMORY_SIZE: usize = 4096;

/// Words printed per line of a memory dump.
const WORDS_PER_LINE: usize = 8;

/// Byte-addressed main memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Size of the address space in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn range(&self, addr: u32, len: usize) -> Result<std::ops::Range<usize>, MemError> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(start..end),
            _ => Err(MemError::OutOfBounds(addr)),
        }
    }

    fn word_range(&self, addr: u32) -> Result<std::ops::Range<usize>, MemError> {
        if addr % 4 != 0 {
            return Err(MemError::Misaligned(addr));
        }
        self.range(addr, 4)
    }

    /// Reads one byte.
    pub fn read_byte(&self, addr: u32) -> Result<u8, MemError> {
        let r = self.range(addr, 1)?;
        Ok(self.data[r.start])
    }

    /// Writes one byte.
    pub fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), MemError> {
        let r = self.range(addr, 1)?;
        self.data[r.start] = val;
        Ok(())
    }

    /// Reads an aligned little-endian word.
    pub fn read_word(&self, addr: u32) -> Result<u32, MemError> {
        let r = self.word_range(addr)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[r]);
        Ok(build_word(bytes))
    }

    /// Writes an aligned little-endian word.
    pub fn write_word(&mut self, addr: u32, val: u32) -> Result<(), MemError> {
        let r = self.word_range(addr)?;
        self.data[r].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }

    /// Reads four bytes at any byte address as a little-endian word.
    ///
    /// Instruction constants are not word aligned, so Fetch assembles them
    /// byte by byte through this accessor.
    pub fn read_unaligned_word(&self, addr: u32) -> Result<u32, MemError> {
        let r = self.range(addr, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[r]);
        Ok(build_word(bytes))
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// The whole block is checked before anything is written.
    pub fn load_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), MemError> {
        let r = self.range(addr, bytes.len())?;
        self.data[r].copy_from_slice(bytes);
        Ok(())
    }

    /// Dumps memory eight words per line.
    ///
    /// When the following lines repeat the last printed one, a `*` is appended
    /// to it and the repeats are skipped up to the next differing line.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        let line_bytes = WORDS_PER_LINE * 4;
        let mut prev: Option<&[u8]> = None;
        let mut star = false;

        for (i, chunk) in self.data.chunks(line_bytes).enumerate() {
            match prev {
                Some(p) if p == chunk => {
                    if !star {
                        writeln!(out, "*")?;
                        star = true;
                    }
                }
                _ => {
                    if prev.is_some() {
                        writeln!(out)?;
                    }
                    dump_line(out, i * line_bytes, chunk)?;
                    star = false;
                }
            }
            prev = Some(chunk);
        }
        writeln!(out)
    }
}

fn dump_line(out: &mut dyn Write, addr: usize, chunk: &[u8]) -> io::Result<()> {
    write!(out, "{:03x}: ", addr)?;
    for word in chunk.chunks(4) {
        let mut bytes = [0u8; 4];
        bytes[..word.len()].copy_from_slice(word);
        write!(out, "{:08x} ", build_word(bytes))?;
    }
    Ok(())
}
