//! Status Codes and Error Definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Pipeline Status:** the value carried in every latch (`AOK`, `HLT`,
//!    `ADR`, `INS`). A non-normal status is data, not a Rust error, and is
//!    only ever propagated towards Writeback.
//! 2. **Component Errors:** memory access, instruction decode, object loading,
//!    and driver failures, integrated with `std::error::Error` via `thiserror`.

use std::fmt;
use std::io;

use thiserror::Error;

/// Status of an instruction as it flows through the pipeline.
///
/// Once an instruction leaves Fetch or Memory with a non-normal status, the
/// status is carried unchanged to Writeback, which terminates the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Normal operation.
    #[default]
    Aok,
    /// A `halt` instruction was encountered.
    Hlt,
    /// An out-of-bounds or misaligned memory access occurred.
    Adr,
    /// An invalid instruction code or function code was fetched.
    Ins,
}

impl Status {
    /// Returns the numeric status code used in latch dumps.
    pub fn code(self) -> u8 {
        match self {
            Status::Aok => 1,
            Status::Hlt => 2,
            Status::Adr => 3,
            Status::Ins => 4,
        }
    }

    /// Returns `true` for the normal (`AOK`) status.
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Aok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Aok => "AOK",
            Status::Hlt => "HLT",
            Status::Adr => "ADR",
            Status::Ins => "INS",
        };
        f.write_str(name)
    }
}

/// Error returned by the memory array for an invalid access.
///
/// The memory array never mutates state when it returns one of these.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MemError {
    /// The access touches a byte outside the address space.
    #[error("address {0:#x} is out of bounds")]
    OutOfBounds(u32),

    /// A word access was not 4-byte aligned.
    #[error("word address {0:#x} is not 4-byte aligned")]
    Misaligned(u32),
}

/// Error returned when an opcode byte does not name a valid instruction.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum IllegalInstruction {
    /// The instruction code (high nibble) is not defined.
    #[error("invalid instruction code {0:#x}")]
    Icode(u8),

    /// The function code (low nibble) is not defined for its family.
    #[error("invalid function code {ifun:#x} for instruction code {icode:#x}")]
    Function {
        /// Instruction code of the rejected opcode.
        icode: u8,
        /// Function code of the rejected opcode.
        ifun: u8,
    },
}

/// Error returned while loading a `.yo` object listing into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file does not carry the `.yo` extension.
    #[error("file opening failed: '{0}' is not a .yo file")]
    FileName(String),

    /// The input file could not be read.
    #[error("could not read object file: {0}")]
    Io(#[from] io::Error),

    /// A line does not follow the listing column layout.
    #[error("Error on line {line}\n{text}")]
    Syntax {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A record starts below the end of a previously loaded record.
    #[error("Error on line {line}\n{text}")]
    Overlap {
        /// One-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A record places bytes outside the address space.
    #[error("line {line}: {source}")]
    Memory {
        /// One-based line number.
        line: usize,
        /// Underlying memory error.
        source: MemError,
    },
}

/// Error returned by the simulation driver.
#[derive(Debug, Error)]
pub enum SimError {
    /// Writing diagnostic output failed.
    #[error("diagnostic output failed: {0}")]
    Io(#[from] io::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The pipeline did not terminate within the configured cycle budget.
    #[error("cycle limit of {0} reached without termination")]
    CycleLimit(u64),
}
