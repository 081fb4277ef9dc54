mod decode;
mod execute;

use crate::TICKS_PER_MCYCLE;

use super::{Bus, Cpu, DecodeError, State};

/// Outcome of one step of the fetch/decode/execute loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::cpu) enum Step {
    /// Keep going within the current machine cycle.
    Continue,
    /// The machine cycle is over.
    Yield,
}

impl Cpu {
    /// Advance the CPU by one base clock tick.
    ///
    /// Panics if the CPU fetches a byte with no opcode descriptor; use
    /// [`Cpu::try_tick`] to get the error instead.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) {
        if let Err(err) = self.try_tick(bus) {
            panic!("GB CPU: {err}");
        }
    }

    /// Advance the CPU by one base clock tick.
    ///
    /// Only every fourth tick (every second in CGB double speed) does any
    /// work; that tick runs one machine cycle. A decode error leaves the
    /// CPU in the state it reached before the failing lookup.
    pub fn try_tick<B: Bus>(&mut self, bus: &mut B) -> Result<(), DecodeError> {
        self.clock_cycle += 1;
        let threshold = TICKS_PER_MCYCLE / bus.speed_mode().divisor();
        if self.clock_cycle < threshold {
            return Ok(());
        }
        self.clock_cycle = 0;

        if matches!(self.state, State::Opcode | State::Halted | State::Stopped) {
            let irq = bus.interrupts();
            if irq.ime() && irq.is_requested() {
                if self.state == State::Stopped {
                    bus.set_lcd_enabled(true);
                }
                self.state = State::IrqReadIf;
            }
        }

        if self.state.is_irq() {
            self.step_interrupt(bus);
            return Ok(());
        }

        // HALT ends as soon as a line is requested, even with IME off.
        if self.state == State::Halted && bus.interrupts().is_requested() {
            self.state = State::Opcode;
        }

        if matches!(self.state, State::Halted | State::Stopped) {
            return Ok(());
        }

        let mut bus_used = false;
        loop {
            let step = match self.state {
                State::Opcode => self.fetch_opcode(bus, &mut bus_used)?,
                State::ExtOpcode => self.fetch_ext_opcode(bus, &mut bus_used)?,
                State::Operand => self.fetch_operands(bus, &mut bus_used),
                State::Running => self.run_ops(bus, &mut bus_used),
                State::Halted | State::Stopped => Step::Yield,
                State::IrqReadIf
                | State::IrqReadIe
                | State::IrqPush1
                | State::IrqPush2
                | State::IrqJump => unreachable!("interrupt dispatch inside the fetch loop"),
            };
            if step == Step::Yield {
                return Ok(());
            }
        }
    }
}
