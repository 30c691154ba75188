//! Typed Y86 Instructions.
//!
//! The opcode byte splits into an instruction code (high nibble) and a
//! function code (low nibble). Decoding turns that pair into a closed
//! [`Instruction`] variant so every stage matches exhaustively on it.
//!
//! `rrmovl` is not a separate variant: it is `Cmov(Cond::Always)`, the
//! unconditional member of the conditional-move family, exactly as the
//! encoding shares instruction code 2 between them.

use std::fmt;

use crate::common::data::{high_nibble, low_nibble};
use crate::common::error::IllegalInstruction;
use crate::isa::funct;
use crate::isa::opcodes;

/// Operation selected by the function code of an `OPl` instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluFn {
    /// `addl`: `rB <- rB + rA`.
    #[default]
    Add,
    /// `subl`: `rB <- rB - rA`.
    Sub,
    /// `andl`: `rB <- rB & rA`.
    And,
    /// `xorl`: `rB <- rB ^ rA`.
    Xor,
}

impl AluFn {
    /// Decodes an `OPl` function code.
    pub fn from_ifun(ifun: u8) -> Option<Self> {
        match ifun {
            funct::ADDL => Some(AluFn::Add),
            funct::SUBL => Some(AluFn::Sub),
            funct::ANDL => Some(AluFn::And),
            funct::XORL => Some(AluFn::Xor),
            _ => None,
        }
    }

    /// Returns the function code.
    pub fn ifun(self) -> u8 {
        match self {
            AluFn::Add => funct::ADDL,
            AluFn::Sub => funct::SUBL,
            AluFn::And => funct::ANDL,
            AluFn::Xor => funct::XORL,
        }
    }
}

/// Condition selected by the function code of a `cmovXX` or `jXX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cond {
    /// Unconditional (`rrmovl`, `jmp`).
    #[default]
    Always,
    /// Less than or equal: `(SF ^ OF) | ZF`.
    Le,
    /// Less than: `SF ^ OF`.
    L,
    /// Equal: `ZF`.
    E,
    /// Not equal: `!ZF`.
    Ne,
    /// Greater than or equal: `!(SF ^ OF)`.
    Ge,
    /// Greater than: `!(SF ^ OF) & !ZF`.
    G,
}

impl Cond {
    /// Decodes a condition function code.
    pub fn from_ifun(ifun: u8) -> Option<Self> {
        match ifun {
            funct::C_ALWAYS => Some(Cond::Always),
            funct::C_LE => Some(Cond::Le),
            funct::C_L => Some(Cond::L),
            funct::C_E => Some(Cond::E),
            funct::C_NE => Some(Cond::Ne),
            funct::C_GE => Some(Cond::Ge),
            funct::C_G => Some(Cond::G),
            _ => None,
        }
    }

    /// Returns the function code.
    pub fn ifun(self) -> u8 {
        match self {
            Cond::Always => funct::C_ALWAYS,
            Cond::Le => funct::C_LE,
            Cond::L => funct::C_L,
            Cond::E => funct::C_E,
            Cond::Ne => funct::C_NE,
            Cond::Ge => funct::C_GE,
            Cond::G => funct::C_G,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Cond::Always => "",
            Cond::Le => "le",
            Cond::L => "l",
            Cond::E => "e",
            Cond::Ne => "ne",
            Cond::Ge => "ge",
            Cond::G => "g",
        }
    }
}

/// A decoded Y86 instruction.
///
/// The default value is `Nop`, the neutral contents of a bubbled latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `halt`
    Halt,
    /// `nop`, also the contents of a bubble.
    #[default]
    Nop,
    /// `rrmovl` (`Cond::Always`) and `cmovXX`.
    Cmov(Cond),
    /// `irmovl V, rB`
    Irmov,
    /// `rmmovl rA, D(rB)`
    Rmmov,
    /// `mrmovl D(rB), rA`
    Mrmov,
    /// `addl` / `subl` / `andl` / `xorl`
    Op(AluFn),
    /// `jmp` (`Cond::Always`) and `jXX`.
    Jump(Cond),
    /// `call Dest`
    Call,
    /// `ret`
    Ret,
    /// `pushl rA`
    Push,
    /// `popl rA`
    Pop,
    /// `dump V`: print diagnostics selected by the low bits of `V`.
    Dump,
}

impl Instruction {
    /// Decodes an opcode byte.
    ///
    /// An undefined instruction code, or an undefined function code for the
    /// move, `OPl`, or jump families, is rejected. Function codes of the other
    /// instructions are ignored.
    pub fn decode(opcode: u8) -> Result<Self, IllegalInstruction> {
        let icode = high_nibble(opcode);
        let ifun = low_nibble(opcode);
        let bad_fn = IllegalInstruction::Function { icode, ifun };

        let inst = match icode {
            opcodes::IHALT => Instruction::Halt,
            opcodes::INOP => Instruction::Nop,
            opcodes::ICMOVXX => Instruction::Cmov(Cond::from_ifun(ifun).ok_or(bad_fn)?),
            opcodes::IIRMOVL => Instruction::Irmov,
            opcodes::IRMMOVL => Instruction::Rmmov,
            opcodes::IMRMOVL => Instruction::Mrmov,
            opcodes::IOPL => Instruction::Op(AluFn::from_ifun(ifun).ok_or(bad_fn)?),
            opcodes::IJXX => Instruction::Jump(Cond::from_ifun(ifun).ok_or(bad_fn)?),
            opcodes::ICALL => Instruction::Call,
            opcodes::IRET => Instruction::Ret,
            opcodes::IPUSHL => Instruction::Push,
            opcodes::IPOPL => Instruction::Pop,
            opcodes::IDUMP => Instruction::Dump,
            _ => return Err(IllegalInstruction::Icode(icode)),
        };
        Ok(inst)
    }

    /// Returns the instruction code (high nibble).
    pub fn icode(self) -> u8 {
        match self {
            Instruction::Halt => opcodes::IHALT,
            Instruction::Nop => opcodes::INOP,
            Instruction::Cmov(_) => opcodes::ICMOVXX,
            Instruction::Irmov => opcodes::IIRMOVL,
            Instruction::Rmmov => opcodes::IRMMOVL,
            Instruction::Mrmov => opcodes::IMRMOVL,
            Instruction::Op(_) => opcodes::IOPL,
            Instruction::Jump(_) => opcodes::IJXX,
            Instruction::Call => opcodes::ICALL,
            Instruction::Ret => opcodes::IRET,
            Instruction::Push => opcodes::IPUSHL,
            Instruction::Pop => opcodes::IPOPL,
            Instruction::Dump => opcodes::IDUMP,
        }
    }

    /// Returns the function code (low nibble), zero for instructions
    /// without a family.
    pub fn ifun(self) -> u8 {
        match self {
            Instruction::Cmov(c) | Instruction::Jump(c) => c.ifun(),
            Instruction::Op(f) => f.ifun(),
            _ => 0,
        }
    }

    /// Re-encodes the opcode byte.
    pub fn opcode(self) -> u8 {
        (self.icode() << 4) | self.ifun()
    }

    /// Encoded length in bytes.
    pub fn length(self) -> u32 {
        match self {
            Instruction::Halt | Instruction::Nop | Instruction::Ret => 1,
            Instruction::Op(_) | Instruction::Cmov(_) | Instruction::Push | Instruction::Pop => 2,
            Instruction::Jump(_) | Instruction::Call | Instruction::Dump => 5,
            Instruction::Irmov | Instruction::Rmmov | Instruction::Mrmov => 6,
        }
    }

    /// Whether a register specifier byte follows the opcode.
    pub fn needs_regids(self) -> bool {
        matches!(
            self,
            Instruction::Cmov(_)
                | Instruction::Irmov
                | Instruction::Rmmov
                | Instruction::Mrmov
                | Instruction::Op(_)
                | Instruction::Push
                | Instruction::Pop
        )
    }

    /// Whether a 4-byte constant word is part of the encoding.
    pub fn needs_valc(self) -> bool {
        matches!(
            self,
            Instruction::Irmov
                | Instruction::Rmmov
                | Instruction::Mrmov
                | Instruction::Jump(_)
                | Instruction::Call
                | Instruction::Dump
        )
    }

    /// Offset of the constant word from the instruction address.
    pub fn valc_offset(self) -> u32 {
        if self.needs_regids() {
            2
        } else {
            1
        }
    }

    /// Whether the instruction writes its `dstM` register from memory.
    ///
    /// These are the producers that cannot be forwarded out of Execute and
    /// therefore cause load-use stalls.
    pub fn is_load(self) -> bool {
        matches!(self, Instruction::Mrmov | Instruction::Pop)
    }

    /// Assembler mnemonic.
    pub fn mnemonic(self) -> String {
        match self {
            Instruction::Halt => "halt".into(),
            Instruction::Nop => "nop".into(),
            Instruction::Cmov(Cond::Always) => "rrmovl".into(),
            Instruction::Cmov(c) => format!("cmov{}", c.suffix()),
            Instruction::Irmov => "irmovl".into(),
            Instruction::Rmmov => "rmmovl".into(),
            Instruction::Mrmov => "mrmovl".into(),
            Instruction::Op(AluFn::Add) => "addl".into(),
            Instruction::Op(AluFn::Sub) => "subl".into(),
            Instruction::Op(AluFn::And) => "andl".into(),
            Instruction::Op(AluFn::Xor) => "xorl".into(),
            Instruction::Jump(Cond::Always) => "jmp".into(),
            Instruction::Jump(c) => format!("j{}", c.suffix()),
            Instruction::Call => "call".into(),
            Instruction::Ret => "ret".into(),
            Instruction::Push => "pushl".into(),
            Instruction::Pop => "popl".into(),
            Instruction::Dump => "dump".into(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic())
    }
}
