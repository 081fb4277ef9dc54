use tickboy_common::bits;

use crate::cpu::{Bus, Flag, Reg16, Reg8, Registers};

/// Source or destination of a `Load`/`Store` micro-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arg {
    R8(Reg8),
    R16(Reg16),
    /// 8-bit immediate operand.
    D8,
    /// 16-bit immediate operand.
    D16,
    /// `(a8)`: high page $FF00 + 8-bit operand.
    A8,
    /// `(a16)`: memory at the 16-bit operand.
    A16,
    /// `(C)`: high page $FF00 + C.
    HighC,
    /// `(BC)`, `(DE)`, `(HL)`: memory at a register pair.
    Mem(Reg16),
}

impl Arg {
    /// Operand bytes the argument pulls from the instruction stream.
    pub fn operand_length(self) -> usize {
        match self {
            Arg::D8 | Arg::A8 => 1,
            Arg::D16 | Arg::A16 => 2,
            _ => 0,
        }
    }

    /// Whether reading or writing the argument goes through the bus.
    pub fn is_memory(self) -> bool {
        matches!(self, Arg::A8 | Arg::A16 | Arg::HighC | Arg::Mem(_))
    }

    fn address(self, regs: &Registers, operand: &[u8; 2]) -> u16 {
        match self {
            Arg::A8 => 0xFF00 | operand[0] as u16,
            Arg::A16 => bits::word_from_bytes(*operand),
            Arg::HighC => 0xFF00 | regs.c as u16,
            Arg::Mem(pair) => regs.get16(pair),
            _ => unreachable!("{self:?} does not address memory"),
        }
    }

    pub fn read<B: Bus>(self, regs: &Registers, bus: &mut B, operand: &[u8; 2]) -> u16 {
        match self {
            Arg::R8(reg) => regs.get8(reg) as u16,
            Arg::R16(pair) => regs.get16(pair),
            Arg::D8 => operand[0] as u16,
            Arg::D16 => bits::word_from_bytes(*operand),
            Arg::A8 | Arg::A16 | Arg::HighC | Arg::Mem(_) => {
                bus.read8(self.address(regs, operand)) as u16
            }
        }
    }

    /// Store `value` (truncated to a byte for 8-bit destinations).
    pub fn write<B: Bus>(self, regs: &mut Registers, bus: &mut B, operand: &[u8; 2], value: u16) {
        match self {
            Arg::R8(reg) => regs.set8(reg, value as u8),
            Arg::R16(pair) => regs.set16(pair, value),
            Arg::A8 | Arg::A16 | Arg::HighC | Arg::Mem(_) => {
                let addr = self.address(regs, operand);
                bus.write8(addr, value as u8);
            }
            Arg::D8 | Arg::D16 => unreachable!("cannot store into immediate {self:?}"),
        }
    }
}

/// Branch conditions of JP/JR/CALL/RET.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Nz,
    Z,
    Nc,
    C,
}

impl Condition {
    /// Decode bits 3-4 of a conditional branch opcode.
    pub const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Condition::Nz,
            1 => Condition::Z,
            2 => Condition::Nc,
            _ => Condition::C,
        }
    }

    pub fn holds(self, regs: &Registers) -> bool {
        match self {
            Condition::Nz => !regs.flag(Flag::Z),
            Condition::Z => regs.flag(Flag::Z),
            Condition::Nc => !regs.flag(Flag::C),
            Condition::C => regs.flag(Flag::C),
        }
    }
}
