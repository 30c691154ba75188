//! Tests for main memory, the register file, and the diagnostic dumps.

use pretty_assertions::assert_eq;
use yess::common::error::{MemError, Status};
use yess::core::arch::cc::ConditionCodes;
use yess::core::arch::gpr::Gpr;
use yess::core::memory::{Memory, DEFAULT_MEMORY_SIZE};
use yess::core::pipeline::latches::Latches;
use yess::isa::abi::*;
use yess::isa::Instruction;
use yess::sim::dump::{dump_latches, dump_state, DumpFlags};

fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).expect("write to Vec");
    String::from_utf8(buf).expect("ascii dump")
}

/// Tests little-endian word layout.
#[test]
fn test_word_is_little_endian() {
    let mut mem = Memory::default();
    assert_eq!(mem.size(), DEFAULT_MEMORY_SIZE);

    mem.write_word(0x10, 0x1234_5678).expect("aligned");
    assert_eq!(mem.read_byte(0x10), Ok(0x78));
    assert_eq!(mem.read_byte(0x13), Ok(0x12));
    assert_eq!(mem.read_unaligned_word(0x11), Ok(0x0012_3456));
}

/// Tests bounds and alignment checks.
#[test]
fn test_memory_bounds() {
    let mut mem = Memory::new(32);
    assert_eq!(mem.read_byte(32), Err(MemError::OutOfBounds(32)));
    assert_eq!(mem.read_word(30), Err(MemError::Misaligned(30)));
    assert_eq!(mem.read_word(32), Err(MemError::OutOfBounds(32)));
    assert!(mem.read_unaligned_word(29).is_err());
    assert_eq!(mem.read_unaligned_word(28), Ok(0));
    assert!(mem.write_word(u32::MAX - 3, 1).is_err());
}

/// Tests that a block load is all-or-nothing.
#[test]
fn test_load_bytes_checks_whole_block() {
    let mut mem = Memory::new(8);
    assert!(mem.load_bytes(6, &[1, 2, 3]).is_err());
    assert_eq!(mem, Memory::new(8));

    mem.load_bytes(5, &[1, 2, 3]).expect("fits");
    assert_eq!(mem.read_byte(7), Ok(3));

    mem.clear();
    assert_eq!(mem, Memory::new(8));
}

/// Tests that `RNONE` reads zero and discards writes.
#[test]
fn test_gpr_rnone() {
    let mut regs = Gpr::new();
    regs.write(RNONE, 0xdead);
    regs.write(REG_EDI, 7);
    assert_eq!(regs.read(RNONE), 0);
    assert_eq!(regs.snapshot(), [0, 0, 0, 0, 0, 0, 0, 7]);
}

/// Tests the register dump layout.
#[test]
fn test_register_dump_format() {
    let mut regs = Gpr::new();
    regs.write(REG_EAX, 0x10);
    regs.write(REG_ESP, 0x7fc);

    let text = render(|out| regs.dump(out));
    assert_eq!(
        text,
        "%eax: 00000010 %ecx: 00000000 %edx: 00000000 %ebx: 00000000\n\
         %esp: 000007fc %ebp: 00000000 %esi: 00000000 %edi: 00000000\n\n"
    );
}

/// Tests the latch dump layout for a cleared pipeline.
#[test]
fn test_latch_dump_format() {
    let mut latches = Latches::default();
    latches.f.pred_pc = 0x14;
    latches.d.inst = Instruction::Irmov;
    latches.d.rb = REG_EAX;
    latches.d.valc = 0xa;
    latches.d.valp = 0x1a;
    latches.w.stat = Status::Hlt;
    latches.w.inst = Instruction::Halt;
    let cc = ConditionCodes {
        zf: true,
        sf: false,
        of: false,
    };

    let text = render(|out| dump_latches(out, &cc, &latches));
    let expected = "\
CC - ZF: 1 SF: 0 OF: 0
F - predPC: 00000014
D - stat: 1 icode: 3 ifun: 0 rA: f rB: 0 valC: 0000000a  valP: 0000001a
E - stat: 1 icode: 1  ifun: 0  valC: 00000000 valA: 00000000 valB: 00000000
    dstE: f dstM: f srcA: f srcB: f
M - stat: 1 icode: 1 Cnd: 0 valE: 00000000 valA: 00000000 dstE: f dstM: f
W - stat: 2 icode: 0 valE: 00000000 valM: 00000000 dstE: f dstM: f

";
    assert_eq!(text, expected);
}

/// Tests that repeated memory lines collapse behind a `*`.
#[test]
fn test_memory_dump_collapses_repeats() {
    let mut mem = Memory::new(128);
    mem.write_word(0, 0x30f0_0a00).expect("aligned");
    mem.write_word(0x60, 1).expect("aligned");

    let text = render(|out| mem.dump(out));
    let zeros = "00000000 ".repeat(8);
    let expected = format!(
        "000: 30f00a00 {}\n020: {}*\n\n060: 00000001 {}\n",
        "00000000 ".repeat(7),
        zeros,
        "00000000 ".repeat(7),
    );
    assert_eq!(text, expected);
}

/// Tests a memory without repeated lines.
#[test]
fn test_memory_dump_without_repeats() {
    let mut mem = Memory::new(64);
    mem.write_word(0x20, 0xff).expect("aligned");

    let text = render(|out| mem.dump(out));
    let zeros = "00000000 ".repeat(8);
    let expected = format!("000: {}\n020: 000000ff {}\n", zeros, "00000000 ".repeat(7));
    assert_eq!(text, expected);
}

/// Tests dump selection bits and output order.
#[test]
fn test_dump_state_selection() {
    assert_eq!(DumpFlags::from_mask(0), DumpFlags::default());
    assert!(DumpFlags::from_mask(8).is_empty());
    assert_eq!(DumpFlags::from_mask(7), DumpFlags::ALL);
    assert_eq!(
        DumpFlags::from_mask(5),
        DumpFlags {
            registers: true,
            latches: false,
            memory: true,
        }
    );

    let regs = Gpr::new();
    let mem = Memory::new(32);
    let latches = Latches::default();
    let cc = ConditionCodes::default();

    let text = render(|out| {
        dump_state(out, DumpFlags::from_mask(5), &regs, &cc, &latches, &mem)
    });
    assert!(text.starts_with("%eax: 00000000"));
    assert!(text.ends_with(&format!("000: {}\n", "00000000 ".repeat(8))));
    assert!(!text.contains("CC - ZF"));
}
