//! Shared helpers for the integration tests: a tiny Y86 assembler, a
//! capturing output sink, and a sequential reference machine.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use yess::common::error::Status;
use yess::config::Config;
use yess::core::arch::cc::ConditionCodes;
use yess::core::arch::gpr::Gpr;
use yess::core::memory::Memory;
use yess::core::units::alu::Alu;
use yess::core::Cpu;
use yess::isa::abi::RNONE;
use yess::isa::{AluFn, Cond, Instruction};

/// Output sink that can be read back after the CPU has written to it.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Minimal Y86 assembler producing a flat image that starts at address 0.
#[derive(Clone, Debug, Default)]
pub struct Program {
    bytes: Vec<u8>,
    labels: HashMap<String, u32>,
    fixups: Vec<(usize, String)>,
}

fn regs(ra: u8, rb: u8) -> u8 {
    (ra << 4) | (rb & 0xf)
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current address.
    pub fn here(&self) -> u32 {
        self.bytes.len() as u32
    }

    /// Pads with zero bytes up to `addr`.
    pub fn org(&mut self, addr: u32) -> &mut Self {
        assert!(addr >= self.here(), "org moves backwards");
        self.bytes.resize(addr as usize, 0);
        self
    }

    pub fn label(&mut self, name: &str) -> &mut Self {
        let here = self.here();
        self.labels.insert(name.to_string(), here);
        self
    }

    fn word(&mut self, v: u32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn target(&mut self, name: &str) -> &mut Self {
        self.fixups.push((self.bytes.len(), name.to_string()));
        self.word(0)
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// `.long v`
    pub fn long(&mut self, v: u32) -> &mut Self {
        self.word(v)
    }

    pub fn halt(&mut self) -> &mut Self {
        self.raw(&[0x00])
    }

    pub fn nop(&mut self) -> &mut Self {
        self.raw(&[0x10])
    }

    pub fn rrmovl(&mut self, ra: u8, rb: u8) -> &mut Self {
        self.cmov(Cond::Always, ra, rb)
    }

    pub fn cmov(&mut self, cond: Cond, ra: u8, rb: u8) -> &mut Self {
        self.raw(&[0x20 | cond.ifun(), regs(ra, rb)])
    }

    pub fn irmovl(&mut self, v: u32, rb: u8) -> &mut Self {
        self.raw(&[0x30, regs(RNONE, rb)]).word(v)
    }

    pub fn rmmovl(&mut self, ra: u8, d: u32, rb: u8) -> &mut Self {
        self.raw(&[0x40, regs(ra, rb)]).word(d)
    }

    pub fn mrmovl(&mut self, d: u32, rb: u8, ra: u8) -> &mut Self {
        self.raw(&[0x50, regs(ra, rb)]).word(d)
    }

    pub fn op(&mut self, f: AluFn, ra: u8, rb: u8) -> &mut Self {
        self.raw(&[0x60 | f.ifun(), regs(ra, rb)])
    }

    pub fn addl(&mut self, ra: u8, rb: u8) -> &mut Self {
        self.op(AluFn::Add, ra, rb)
    }

    pub fn subl(&mut self, ra: u8, rb: u8) -> &mut Self {
        self.op(AluFn::Sub, ra, rb)
    }

    pub fn jxx(&mut self, cond: Cond, label: &str) -> &mut Self {
        self.raw(&[0x70 | cond.ifun()]).target(label)
    }

    pub fn jmp(&mut self, label: &str) -> &mut Self {
        self.jxx(Cond::Always, label)
    }

    pub fn call(&mut self, label: &str) -> &mut Self {
        self.raw(&[0x80]).target(label)
    }

    pub fn ret(&mut self) -> &mut Self {
        self.raw(&[0x90])
    }

    pub fn pushl(&mut self, ra: u8) -> &mut Self {
        self.raw(&[0xa0, regs(ra, RNONE)])
    }

    pub fn popl(&mut self, ra: u8) -> &mut Self {
        self.raw(&[0xb0, regs(ra, RNONE)])
    }

    pub fn dump(&mut self, v: u32) -> &mut Self {
        self.raw(&[0xc0]).word(v)
    }

    /// Resolves label references and returns the image.
    pub fn assemble(&self) -> Vec<u8> {
        let mut out = self.bytes.clone();
        for (at, name) in &self.fixups {
            let addr = *self
                .labels
                .get(name)
                .unwrap_or_else(|| panic!("undefined label {name}"));
            out[*at..*at + 4].copy_from_slice(&addr.to_le_bytes());
        }
        out
    }

    /// Renders the image as a `.yo` listing, six bytes per record.
    pub fn to_listing(&self) -> String {
        let image = self.assemble();
        let mut text = String::new();
        for (i, chunk) in image.chunks(6).enumerate() {
            let hex: String = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            text.push_str(&format!("  0x{:03x}: {:<12} |\n", i * 6, hex));
        }
        text
    }
}

/// A CPU with its diagnostics captured.
pub struct Harness {
    pub cpu: Cpu,
    pub out: SharedBuf,
}

impl Harness {
    pub fn new(program: &Program) -> Self {
        Self::with_config(program, &Config::default())
    }

    pub fn with_config(program: &Program, config: &Config) -> Self {
        let out = SharedBuf::default();
        let mut cpu = Cpu::new(config).with_output(Box::new(out.clone()));
        cpu.mem
            .load_bytes(0, &program.assemble())
            .expect("program fits in memory");
        Self { cpu, out }
    }

    /// Runs to termination and returns the terminal status.
    pub fn run(&mut self) -> Status {
        self.cpu.run().expect("program terminates")
    }

    pub fn reg(&self, id: u8) -> u32 {
        self.cpu.regs.read(id)
    }

    pub fn word(&self, addr: u32) -> u32 {
        self.cpu.mem.read_word(addr).expect("aligned in-bounds word")
    }
}

/// Assembles, runs, and returns the finished harness.
pub fn run_program(program: &Program) -> (Harness, Status) {
    let mut h = Harness::new(program);
    let stat = h.run();
    (h, stat)
}

/// Non-pipelined reference machine for straight-line programs.
///
/// Executes one whole instruction at a time with the same instruction
/// semantics as the pipeline. Control transfers are not supported.
pub struct SeqMachine {
    pub regs: Gpr,
    pub mem: Memory,
    pub cc: ConditionCodes,
    pub pc: u32,
}

impl SeqMachine {
    pub fn new(program: &Program) -> Self {
        let mut mem = Memory::default();
        mem.load_bytes(0, &program.assemble()).expect("program fits");
        Self {
            regs: Gpr::new(),
            mem,
            cc: ConditionCodes::default(),
            pc: 0,
        }
    }

    /// Runs until `halt` or a fault and returns the final status.
    pub fn run(&mut self) -> Status {
        loop {
            let stat = self.step();
            if stat != Status::Aok {
                return stat;
            }
        }
    }

    fn step(&mut self) -> Status {
        let Ok(opcode) = self.mem.read_byte(self.pc) else {
            return Status::Adr;
        };
        let Ok(inst) = Instruction::decode(opcode) else {
            return Status::Ins;
        };
        let (ra, rb) = if inst.needs_regids() {
            let b = self.mem.read_byte(self.pc + 1).unwrap_or(0xff);
            (b >> 4, b & 0xf)
        } else {
            (RNONE, RNONE)
        };
        let valc = if inst.needs_valc() {
            self.mem
                .read_unaligned_word(self.pc + inst.valc_offset())
                .unwrap_or(0)
        } else {
            0
        };
        self.pc += inst.length();

        match inst {
            Instruction::Halt => return Status::Hlt,
            Instruction::Nop | Instruction::Dump => {}
            Instruction::Cmov(c) => {
                if self.cc.test(c) {
                    self.regs.write(rb, self.regs.read(ra));
                }
            }
            Instruction::Irmov => self.regs.write(rb, valc),
            Instruction::Rmmov => {
                let addr = self.regs.read(rb).wrapping_add(valc);
                if self.mem.write_word(addr, self.regs.read(ra)).is_err() {
                    return Status::Adr;
                }
            }
            Instruction::Mrmov => {
                let addr = self.regs.read(rb).wrapping_add(valc);
                match self.mem.read_word(addr) {
                    Ok(v) => self.regs.write(ra, v),
                    Err(_) => return Status::Adr,
                }
            }
            Instruction::Op(f) => {
                let out = Alu::execute(f, self.regs.read(ra), self.regs.read(rb));
                out.update_cc(&mut self.cc);
                self.regs.write(rb, out.value);
            }
            Instruction::Push => {
                let val = self.regs.read(ra);
                let sp = self.regs.read(4).wrapping_sub(4);
                if self.mem.write_word(sp, val).is_err() {
                    return Status::Adr;
                }
                self.regs.write(4, sp);
            }
            Instruction::Pop => {
                let sp = self.regs.read(4);
                match self.mem.read_word(sp) {
                    Ok(v) => {
                        self.regs.write(4, sp.wrapping_add(4));
                        self.regs.write(ra, v);
                    }
                    Err(_) => return Status::Adr,
                }
            }
            Instruction::Jump(_) | Instruction::Call | Instruction::Ret => {
                panic!("reference machine does not model control transfers")
            }
        }
        Status::Aok
    }
}
