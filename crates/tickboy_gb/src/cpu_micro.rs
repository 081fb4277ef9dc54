//! Micro-operations sequenced by the CPU state machine.
//!
//! An opcode is an ordered list of [`Op`]s. The state machine runs them one
//! after another, holding back any op that needs the bus until the next
//! machine cycle once the current cycle has already used it. Values are
//! handed from one op to the next through a 16-bit context word owned by
//! the CPU (e.g. `Load(D16)` followed by `Store(R16(Pc))`).

mod arg;

use tickboy_common::bits;

use crate::cpu::{Bus, Flag, Interrupts, Registers};

pub use arg::{Arg, Condition};

/// OAM corruption patterns triggered by the 16-bit inc/dec unit while the
/// PPU is in OAM search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorruptionKind {
    IncDec,
    Pop1,
    Pop2,
    Push1,
    Push2,
    LdHl,
}

/// The inc/dec unit only upsets OAM when it drives an address in
/// $FE00-$FEFF.
#[inline]
fn in_oam_area(addr: u16) -> bool {
    (0xFE00..=0xFEFF).contains(&addr)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// context <- arg
    Load(Arg),
    /// arg <- context
    Store(Arg),
    /// context <- constant (RST vectors).
    LoadWord(u16),
    /// context + 1 through the inc/dec unit.
    IncWord,
    /// context - 1 through the inc/dec unit.
    DecWord,
    /// HL + 1 after an `(HL+)` access.
    IncHl,
    /// HL - 1 after an `(HL-)` access.
    DecHl,
    /// Abort the rest of the sequence unless the condition holds.
    ProceedIf(Condition),
    /// context <- PC + signed 8-bit operand (JR target).
    RelativeTarget,
    /// Internal SP decrement that opens a push.
    PushPrepare,
    /// Write the high byte of context to (SP), then decrement SP.
    PushHigh,
    /// Write the low byte of context to (SP).
    PushLow,
    /// context <- (SP), SP + 1.
    PopLow,
    /// context |= (SP) << 8, SP + 1.
    PopHigh,
    /// Z <- !bit n of context, N <- 0, H <- 1.
    BitTest(u8),
    SetBit(u8),
    ResetBit(u8),
    /// EI/DI/RETI.
    SwitchInterrupts { enable: bool, delayed: bool },
    /// Internal delay that claims the bus slot of its machine cycle.
    ExtraCycle,
    /// End the machine cycle right after this op.
    ForceFinish,
}

impl Op {
    pub fn reads_memory(&self) -> bool {
        match self {
            Op::Load(arg) => arg.is_memory(),
            Op::PopLow | Op::PopHigh | Op::ExtraCycle => true,
            _ => false,
        }
    }

    pub fn writes_memory(&self) -> bool {
        match self {
            Op::Store(arg) => arg.is_memory(),
            Op::PushHigh | Op::PushLow => true,
            _ => false,
        }
    }

    #[inline]
    pub fn accesses_memory(&self) -> bool {
        self.reads_memory() || self.writes_memory()
    }

    /// Corruption this op would cause if it ran during OAM search.
    ///
    /// Evaluated before `execute`, against the address the inc/dec unit is
    /// about to drive.
    pub fn causes_oam_bug(&self, regs: &Registers, context: u16) -> Option<CorruptionKind> {
        let (addr, kind) = match self {
            Op::IncWord | Op::DecWord => (context, CorruptionKind::IncDec),
            Op::IncHl | Op::DecHl => (regs.hl(), CorruptionKind::LdHl),
            Op::PushPrepare => (regs.sp, CorruptionKind::Push1),
            Op::PushHigh => (regs.sp, CorruptionKind::Push2),
            Op::PopLow => (regs.sp, CorruptionKind::Pop1),
            Op::PopHigh => (regs.sp, CorruptionKind::Pop2),
            _ => return None,
        };
        in_oam_area(addr).then_some(kind)
    }

    /// Run the op and return the new context.
    pub fn execute<B: Bus>(
        &self,
        regs: &mut Registers,
        bus: &mut B,
        operand: &[u8; 2],
        context: u16,
    ) -> u16 {
        match *self {
            Op::Load(arg) => arg.read(regs, bus, operand),
            Op::Store(arg) => {
                arg.write(regs, bus, operand, context);
                context
            }
            Op::LoadWord(value) => value,
            Op::IncWord => context.wrapping_add(1),
            Op::DecWord => context.wrapping_sub(1),
            Op::IncHl => {
                regs.set_hl(regs.hl().wrapping_add(1));
                context
            }
            Op::DecHl => {
                regs.set_hl(regs.hl().wrapping_sub(1));
                context
            }
            Op::RelativeTarget => {
                let offset = bits::to_signed(operand[0]) as i16;
                regs.pc.wrapping_add_signed(offset)
            }
            Op::PushPrepare => {
                regs.sp = regs.sp.wrapping_sub(1);
                context
            }
            Op::PushHigh => {
                bus.write8(regs.sp, bits::msb(context));
                regs.sp = regs.sp.wrapping_sub(1);
                context
            }
            Op::PushLow => {
                bus.write8(regs.sp, bits::lsb(context));
                context
            }
            Op::PopLow => {
                let lo = bus.read8(regs.sp);
                regs.sp = regs.sp.wrapping_add(1);
                lo as u16
            }
            Op::PopHigh => {
                let hi = bus.read8(regs.sp);
                regs.sp = regs.sp.wrapping_add(1);
                bits::to_word(hi, bits::lsb(context))
            }
            Op::BitTest(bit) => {
                regs.set_flag(Flag::Z, !bits::get_bit(context as u8, bit));
                regs.set_flag(Flag::N, false);
                regs.set_flag(Flag::H, true);
                context
            }
            Op::SetBit(bit) => bits::set_bit(context as u8, bit) as u16,
            Op::ResetBit(bit) => bits::clear_bit(context as u8, bit) as u16,
            Op::ProceedIf(_) | Op::SwitchInterrupts { .. } | Op::ExtraCycle | Op::ForceFinish => {
                context
            }
        }
    }

    /// Apply the op's effect on IME, if any.
    pub fn switch_interrupts(&self, interrupts: &mut Interrupts) {
        if let Op::SwitchInterrupts { enable, delayed } = *self {
            if enable {
                interrupts.enable(delayed);
            } else {
                interrupts.disable(delayed);
            }
        }
    }

    /// `false` aborts the remaining ops of the instruction (branch not
    /// taken).
    pub fn proceed(&self, regs: &Registers) -> bool {
        match self {
            Op::ProceedIf(condition) => condition.holds(regs),
            _ => true,
        }
    }

    pub fn force_finish_cycle(&self) -> bool {
        matches!(self, Op::ForceFinish)
    }
}
