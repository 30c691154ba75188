//! Object Listing Loader.
//!
//! This module loads assembler listings (`.yo` files) into main memory. Each
//! record line has a fixed column layout:
//!
//! ```text
//!   0x014: 30f004000000 | irmovl $4, %eax
//! ^^     ^^            ^^
//! 0-1    7-8           21-22
//! ```
//!
//! Columns 2-6 hold the `0x` address, columns 9-20 up to six data bytes as
//! hex pairs, and everything after the `|` at column 22 is a comment.

use std::fs;
use std::path::Path;

use log::info;

use crate::common::error::LoadError;
use crate::core::memory::Memory;

const ADDR_START: usize = 4;
const ADDR_END: usize = 7;
const DATA_START: usize = 9;
const DATA_END: usize = 21;
const BAR_COLUMN: usize = 22;

/// A parsed listing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// Nothing to load: blank, comment-only, or address without data.
    Skip,
    /// Bytes to place at an address.
    Data {
        /// Load address of the first byte.
        addr: u32,
        /// Bytes in address order.
        bytes: Vec<u8>,
    },
}

/// Summary of a successful load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of data records loaded.
    pub records: usize,
    /// Number of bytes written.
    pub bytes: usize,
    /// One past the highest address written.
    pub end: u32,
}

/// Checks that a path names a `.yo` listing.
pub fn valid_file_name(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "yo")
}

/// Loads a `.yo` file into memory.
///
/// # Arguments
///
/// * `path` - Path of the listing; must end in `.yo`
/// * `mem` - Memory to load into
///
/// # Returns
///
/// A summary of what was loaded, or the first error. Records before the
/// failing line stay in memory.
pub fn load_file(path: impl AsRef<Path>, mem: &mut Memory) -> Result<LoadSummary, LoadError> {
    let path = path.as_ref();
    if !valid_file_name(path) {
        return Err(LoadError::FileName(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    let summary = load_str(&text, mem)?;
    info!(
        "loaded {} bytes in {} records from {}",
        summary.bytes,
        summary.records,
        path.display()
    );
    Ok(summary)
}

/// Loads listing text into memory.
///
/// Records must not start below the end of the previous record.
pub fn load_str(text: &str, mem: &mut Memory) -> Result<LoadSummary, LoadError> {
    let mut summary = LoadSummary::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let syntax = || LoadError::Syntax {
            line: line_no,
            text: line.to_string(),
        };

        let (addr, bytes) = match parse_line(line).ok_or_else(syntax)? {
            Record::Skip => continue,
            Record::Data { addr, bytes } => (addr, bytes),
        };

        if addr < summary.end {
            return Err(LoadError::Overlap {
                line: line_no,
                text: line.to_string(),
            });
        }

        mem.load_bytes(addr, &bytes)
            .map_err(|source| LoadError::Memory {
                line: line_no,
                source,
            })?;

        summary.records += 1;
        summary.bytes += bytes.len();
        summary.end = addr + bytes.len() as u32;
    }

    Ok(summary)
}

/// Parses one listing line.
///
/// # Returns
///
/// The record, or `None` if the line breaks the column layout.
pub fn parse_line(line: &str) -> Option<Record> {
    let b = line.as_bytes();
    if b.iter().all(u8::is_ascii_whitespace) {
        return Some(Record::Skip);
    }
    if b.len() <= BAR_COLUMN {
        return None;
    }
    if is_spaces(&b[..=DATA_END]) && b[BAR_COLUMN] == b'|' {
        return Some(Record::Skip);
    }

    let layout_ok = is_spaces(&b[..2])
        && &b[2..4] == b"0x"
        && b[ADDR_START..ADDR_END].iter().all(u8::is_ascii_hexdigit)
        && b[7] == b':'
        && b[8] == b' '
        && b[DATA_END] == b' '
        && b[BAR_COLUMN] == b'|';
    if !layout_ok {
        return None;
    }

    let addr_text = std::str::from_utf8(&b[ADDR_START..ADDR_END]).ok()?;
    let addr = u32::from_str_radix(addr_text, 16).ok()?;

    let field = &b[DATA_START..DATA_END];
    let data_len = field
        .iter()
        .position(|c| *c == b' ')
        .unwrap_or(field.len());
    let (data, rest) = field.split_at(data_len);

    if !is_spaces(rest) || data_len % 2 != 0 || !data.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    if data.is_empty() {
        return Some(Record::Skip);
    }

    let bytes = data
        .chunks(2)
        .map(|pair| {
            let s = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(s, 16).ok()
        })
        .collect::<Option<Vec<u8>>>()?;

    Some(Record::Data { addr, bytes })
}

fn is_spaces(b: &[u8]) -> bool {
    b.iter().all(|c| *c == b' ' || *c == b'\t')
}
