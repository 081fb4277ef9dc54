use tickboy_common::bits;

/// Registers for the Game Boy CPU (LR35902).
///
/// Pairs are stored as individual 8-bit halves; `af`/`bc`/`de`/`hl` glue
/// them together on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// 8-bit register selector used by the micro-op arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg8 {
    /// Decode the standard 3-bit register field (6 is `(HL)` and has no
    /// register counterpart).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Reg8::B),
            1 => Some(Reg8::C),
            2 => Some(Reg8::D),
            3 => Some(Reg8::E),
            4 => Some(Reg8::H),
            5 => Some(Reg8::L),
            7 => Some(Reg8::A),
            _ => None,
        }
    }
}

/// 16-bit register selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    Af,
    Bc,
    De,
    Hl,
    Sp,
    Pc,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        bits::to_word(self.a, self.f & 0xF0)
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.a = bits::msb(value);
        // Lower 4 bits of F are always zero.
        self.f = bits::lsb(value) & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        bits::to_word(self.b, self.c)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.b = bits::msb(value);
        self.c = bits::lsb(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        bits::to_word(self.d, self.e)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.d = bits::msb(value);
        self.e = bits::lsb(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        bits::to_word(self.h, self.l)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.h = bits::msb(value);
        self.l = bits::lsb(value);
    }

    #[inline]
    pub fn increment_pc(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::Af => self.af(),
            Reg16::Bc => self.bc(),
            Reg16::De => self.de(),
            Reg16::Hl => self.hl(),
            Reg16::Sp => self.sp,
            Reg16::Pc => self.pc,
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::Af => self.set_af(value),
            Reg16::Bc => self.set_bc(value),
            Reg16::De => self.set_de(value),
            Reg16::Hl => self.set_hl(value),
            Reg16::Sp => self.sp = value,
            Reg16::Pc => self.pc = value,
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        bits::get_bit(self.f, flag as u8)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.f = bits::set_bit_to(self.f, flag as u8, value);
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}
