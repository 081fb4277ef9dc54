use crate::cpu::{Reg16, Reg8};
use crate::cpu_micro::{Arg, Condition, Op};

use super::{Opcode, OpcodeBuilder, HALT, STOP};

const R8_NAMES: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const CONDITION_NAMES: [&str; 4] = ["NZ", "Z", "NC", "C"];

/// Register field of an opcode as a micro-op argument; index 6 is `(HL)`.
fn r8_arg(index: u8) -> Arg {
    match Reg8::from_index(index) {
        Some(reg) => Arg::R8(reg),
        None => Arg::Mem(Reg16::Hl),
    }
}

/// Pair field of the `LD rr,d16` / `INC rr` / `DEC rr` group.
fn rr_sp(index: u8) -> (Reg16, &'static str) {
    match index & 0x03 {
        0 => (Reg16::Bc, "BC"),
        1 => (Reg16::De, "DE"),
        2 => (Reg16::Hl, "HL"),
        _ => (Reg16::Sp, "SP"),
    }
}

/// Pair field of the `PUSH rr` / `POP rr` group.
fn rr_af(index: u8) -> (Reg16, &'static str) {
    match index & 0x03 {
        0 => (Reg16::Bc, "BC"),
        1 => (Reg16::De, "DE"),
        2 => (Reg16::Hl, "HL"),
        _ => (Reg16::Af, "AF"),
    }
}

/// Decoding table for the base and CB-prefixed opcode pages.
///
/// Holes (unregistered opcodes) decode to `None`; the CPU treats that as a
/// fatal decode error.
#[derive(Clone, Debug)]
pub struct OpcodeTable {
    base: Vec<Option<Opcode>>,
    extended: Vec<Option<Opcode>>,
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OpcodeTable {
    pub fn new() -> Self {
        let mut table = Self {
            base: vec![None; 0x100],
            extended: vec![None; 0x100],
        };
        table.add_control();
        table.add_loads();
        table.add_word_ops();
        table.add_jumps();
        table.add_calls();
        table.add_bit_ops();
        table
    }

    #[inline]
    pub fn lookup(&self, opcode: u8) -> Option<&Opcode> {
        self.base[opcode as usize].as_ref()
    }

    #[inline]
    pub fn lookup_extended(&self, opcode: u8) -> Option<&Opcode> {
        self.extended[opcode as usize].as_ref()
    }

    fn add(&mut self, builder: OpcodeBuilder) {
        let opcode = builder.build();
        let slot = &mut self.base[opcode.value() as usize];
        debug_assert!(slot.is_none(), "opcode {opcode} registered twice");
        *slot = Some(opcode);
    }

    fn add_extended(&mut self, builder: OpcodeBuilder) {
        let opcode = builder.build();
        let slot = &mut self.extended[opcode.value() as usize];
        debug_assert!(slot.is_none(), "opcode CB {opcode} registered twice");
        *slot = Some(opcode);
    }

    fn add_control(&mut self) {
        self.add(OpcodeBuilder::new(0x00, "NOP"));
        // STOP and HALT carry no ops; the state machine handles them.
        self.add(OpcodeBuilder::new(STOP, "STOP"));
        self.add(OpcodeBuilder::new(HALT, "HALT"));
        self.add(OpcodeBuilder::new(0xF3, "DI").switch_interrupts(false, true));
        self.add(OpcodeBuilder::new(0xFB, "EI").switch_interrupts(true, true));
    }

    fn add_loads(&mut self) {
        // LD r,r' / LD r,(HL) / LD (HL),r
        for opcode in 0x40..=0x7Fu8 {
            if opcode == HALT {
                continue;
            }
            let dst = (opcode >> 3) & 0x07;
            let src = opcode & 0x07;
            self.add(
                OpcodeBuilder::new(
                    opcode,
                    format!("LD {},{}", R8_NAMES[dst as usize], R8_NAMES[src as usize]),
                )
                .load(r8_arg(src))
                .store(r8_arg(dst)),
            );
        }

        // LD r,d8 / LD (HL),d8
        for dst in 0..8u8 {
            let opcode = 0x06 | (dst << 3);
            self.add(
                OpcodeBuilder::new(opcode, format!("LD {},d8", R8_NAMES[dst as usize]))
                    .load(Arg::D8)
                    .store(r8_arg(dst)),
            );
        }

        // LD rr,d16
        for index in 0..4u8 {
            let (pair, name) = rr_sp(index);
            self.add(
                OpcodeBuilder::new(0x01 | (index << 4), format!("LD {name},d16"))
                    .load(Arg::D16)
                    .store(Arg::R16(pair)),
            );
        }

        let a = Arg::R8(Reg8::A);
        self.add(OpcodeBuilder::new(0x02, "LD (BC),A").load(a).store(Arg::Mem(Reg16::Bc)));
        self.add(OpcodeBuilder::new(0x12, "LD (DE),A").load(a).store(Arg::Mem(Reg16::De)));
        self.add(
            OpcodeBuilder::new(0x22, "LD (HL+),A")
                .load(a)
                .store(Arg::Mem(Reg16::Hl))
                .op(Op::IncHl),
        );
        self.add(
            OpcodeBuilder::new(0x32, "LD (HL-),A")
                .load(a)
                .store(Arg::Mem(Reg16::Hl))
                .op(Op::DecHl),
        );
        self.add(OpcodeBuilder::new(0x0A, "LD A,(BC)").load(Arg::Mem(Reg16::Bc)).store(a));
        self.add(OpcodeBuilder::new(0x1A, "LD A,(DE)").load(Arg::Mem(Reg16::De)).store(a));
        self.add(
            OpcodeBuilder::new(0x2A, "LD A,(HL+)")
                .load(Arg::Mem(Reg16::Hl))
                .store(a)
                .op(Op::IncHl),
        );
        self.add(
            OpcodeBuilder::new(0x3A, "LD A,(HL-)")
                .load(Arg::Mem(Reg16::Hl))
                .store(a)
                .op(Op::DecHl),
        );

        self.add(OpcodeBuilder::new(0xE0, "LDH (a8),A").load(a).store(Arg::A8));
        self.add(OpcodeBuilder::new(0xF0, "LDH A,(a8)").load(Arg::A8).store(a));
        self.add(OpcodeBuilder::new(0xE2, "LD (C),A").load(a).store(Arg::HighC));
        self.add(OpcodeBuilder::new(0xF2, "LD A,(C)").load(Arg::HighC).store(a));
        self.add(OpcodeBuilder::new(0xEA, "LD (a16),A").load(a).store(Arg::A16));
        self.add(OpcodeBuilder::new(0xFA, "LD A,(a16)").load(Arg::A16).store(a));
        self.add(
            OpcodeBuilder::new(0xF9, "LD SP,HL")
                .load(Arg::R16(Reg16::Hl))
                .store(Arg::R16(Reg16::Sp))
                .extra_cycle(),
        );
    }

    fn add_word_ops(&mut self) {
        for index in 0..4u8 {
            let (pair, name) = rr_sp(index);
            self.add(
                OpcodeBuilder::new(0x03 | (index << 4), format!("INC {name}"))
                    .load(Arg::R16(pair))
                    .op(Op::IncWord)
                    .force_finish()
                    .store(Arg::R16(pair)),
            );
            self.add(
                OpcodeBuilder::new(0x0B | (index << 4), format!("DEC {name}"))
                    .load(Arg::R16(pair))
                    .op(Op::DecWord)
                    .force_finish()
                    .store(Arg::R16(pair)),
            );
        }

        for index in 0..4u8 {
            let (pair, name) = rr_af(index);
            self.add(
                OpcodeBuilder::new(0xC5 | (index << 4), format!("PUSH {name}"))
                    .load(Arg::R16(pair))
                    .extra_cycle()
                    .push(),
            );
            self.add(
                OpcodeBuilder::new(0xC1 | (index << 4), format!("POP {name}"))
                    .pop()
                    .store(Arg::R16(pair)),
            );
        }
    }

    fn add_jumps(&mut self) {
        let pc = Arg::R16(Reg16::Pc);

        self.add(
            OpcodeBuilder::new(0xC3, "JP a16")
                .load(Arg::D16)
                .extra_cycle()
                .store(pc),
        );
        self.add(OpcodeBuilder::new(0xE9, "JP HL").load(Arg::R16(Reg16::Hl)).store(pc));
        self.add(
            OpcodeBuilder::new(0x18, "JR r8")
                .op(Op::RelativeTarget)
                .extra_cycle()
                .store(pc),
        );

        for index in 0..4u8 {
            let condition = Condition::from_index(index);
            let name = CONDITION_NAMES[index as usize];
            self.add(
                OpcodeBuilder::new(0xC2 | (index << 3), format!("JP {name},a16"))
                    .load(Arg::D16)
                    .proceed_if(condition)
                    .extra_cycle()
                    .store(pc),
            );
            self.add(
                OpcodeBuilder::new(0x20 | (index << 3), format!("JR {name},r8"))
                    .proceed_if(condition)
                    .op(Op::RelativeTarget)
                    .extra_cycle()
                    .store(pc),
            );
        }
    }

    fn add_calls(&mut self) {
        let pc = Arg::R16(Reg16::Pc);

        self.add(
            OpcodeBuilder::new(0xCD, "CALL a16")
                .load(pc)
                .extra_cycle()
                .push()
                .load(Arg::D16)
                .store(pc),
        );
        self.add(
            OpcodeBuilder::new(0xC9, "RET")
                .pop()
                .extra_cycle()
                .store(pc),
        );
        self.add(
            OpcodeBuilder::new(0xD9, "RETI")
                .pop()
                .extra_cycle()
                .store(pc)
                .switch_interrupts(true, false),
        );

        for index in 0..4u8 {
            let condition = Condition::from_index(index);
            let name = CONDITION_NAMES[index as usize];
            self.add(
                OpcodeBuilder::new(0xC4 | (index << 3), format!("CALL {name},a16"))
                    .proceed_if(condition)
                    .load(pc)
                    .extra_cycle()
                    .push()
                    .load(Arg::D16)
                    .store(pc),
            );
            self.add(
                OpcodeBuilder::new(0xC0 | (index << 3), format!("RET {name}"))
                    .extra_cycle()
                    .proceed_if(condition)
                    .pop()
                    .extra_cycle()
                    .store(pc),
            );
        }

        for index in 0..8u8 {
            let vector = (index as u16) * 8;
            self.add(
                OpcodeBuilder::new(0xC7 | (index << 3), format!("RST {vector:02X}H"))
                    .load(pc)
                    .extra_cycle()
                    .push()
                    .load_word(vector)
                    .store(pc),
            );
        }
    }

    /// CB page: BIT/RES/SET b,r.
    fn add_bit_ops(&mut self) {
        for opcode in 0x40..=0xFFu8 {
            let bit = (opcode >> 3) & 0x07;
            let reg = opcode & 0x07;
            let target = r8_arg(reg);
            let name = R8_NAMES[reg as usize];
            let builder = match opcode >> 6 {
                1 => OpcodeBuilder::new(opcode, format!("BIT {bit},{name}"))
                    .load(target)
                    .op(Op::BitTest(bit)),
                2 => OpcodeBuilder::new(opcode, format!("RES {bit},{name}"))
                    .load(target)
                    .op(Op::ResetBit(bit))
                    .store(target),
                _ => OpcodeBuilder::new(opcode, format!("SET {bit},{name}"))
                    .load(target)
                    .op(Op::SetBit(bit))
                    .store(target),
            };
            self.add_extended(builder);
        }
    }
}
