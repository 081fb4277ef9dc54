use tickboy_common::bits;

use super::super::{Bus, Cpu, State};
use super::Interrupt;

impl Cpu {
    /// One machine cycle of interrupt dispatch.
    ///
    /// Five cycles in total: sample IF, sample IE and pick the line, push
    /// PC high, push PC low, jump to the vector. IF and IE are sampled from
    /// the controller, so only the two pushes go through the bus.
    pub(in crate::cpu) fn step_interrupt<B: Bus>(&mut self, bus: &mut B) {
        match self.state {
            State::IrqReadIf => {
                self.irq_flags = bus.interrupts().pending_mask();
                self.state = State::IrqReadIe;
            }
            State::IrqReadIe => {
                self.irq_enabled = bus.interrupts().enabled_mask();
                match Interrupt::highest_priority(self.irq_flags & self.irq_enabled) {
                    Some(irq) => {
                        let interrupts = bus.interrupts_mut();
                        interrupts.clear(irq);
                        interrupts.disable(false);
                        self.requested_irq = Some(irq);
                        self.state = State::IrqPush1;
                    }
                    // The request went away between the two samples.
                    None => self.state = State::Opcode,
                }
            }
            State::IrqPush1 => {
                self.regs.sp = self.regs.sp.wrapping_sub(1);
                bus.write8(self.regs.sp, bits::msb(self.regs.pc));
                self.state = State::IrqPush2;
            }
            State::IrqPush2 => {
                self.regs.sp = self.regs.sp.wrapping_sub(1);
                bus.write8(self.regs.sp, bits::lsb(self.regs.pc));
                self.state = State::IrqJump;
            }
            State::IrqJump => {
                let Some(irq) = self.requested_irq.take() else {
                    unreachable!("GB CPU: interrupt jump without a latched request");
                };
                log::debug!(
                    "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
                    irq,
                    irq.vector(),
                    self.regs.pc,
                    self.regs.sp
                );
                self.regs.pc = irq.vector();
                self.state = State::Opcode;
            }
            state => unreachable!("GB CPU: {state:?} is not an interrupt state"),
        }
    }
}
