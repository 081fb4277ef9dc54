use crate::cpu_micro::CorruptionKind;
use crate::opcodes::{HALT, STOP};

use super::super::{Bus, Cpu, State};
use super::Step;

/// Last PPU tick of OAM search at which the inc/dec unit still hits OAM.
const OAM_BUG_LAST_TICK: u32 = 79;

impl Cpu {
    /// Run micro-ops of the latched opcode until one needs a bus slot the
    /// current machine cycle has already spent.
    pub(super) fn run_ops<B: Bus>(&mut self, bus: &mut B, bus_used: &mut bool) -> Step {
        match self.opcode1 {
            STOP => {
                if bus.speed_mode().on_stop() {
                    self.state = State::Opcode;
                } else {
                    log::debug!("GB CPU STOP at pc=0x{:04X}", self.regs.pc);
                    self.state = State::Stopped;
                    bus.set_lcd_enabled(false);
                }
                return Step::Yield;
            }
            // STOP and HALT do not count as retired. An EI right before
            // HALT therefore only lands once the instruction after HALT
            // retires, and that instruction runs before any dispatch.
            HALT => {
                if bus.interrupts().is_halt_bug() {
                    log::debug!("GB CPU halt bug at pc=0x{:04X}", self.regs.pc);
                    self.state = State::Opcode;
                    self.halt_bug = true;
                } else {
                    self.state = State::Halted;
                }
                return Step::Yield;
            }
            _ => {}
        }

        let ops = self.latched_opcode().ops();
        if self.op_index < ops.len() {
            let op = ops[self.op_index];
            let accesses_memory = op.accesses_memory();
            if accesses_memory && *bus_used {
                return Step::Yield;
            }
            self.op_index += 1;

            let mut end_cycle = false;
            if self.config.model.has_oam_bug() {
                if let Some(kind) = op.causes_oam_bug(&self.regs, self.op_context) {
                    end_cycle = !self.handle_oam_bug(bus, kind);
                }
            }

            self.op_context = op.execute(&mut self.regs, bus, &self.operand, self.op_context);
            op.switch_interrupts(bus.interrupts_mut());

            if !op.proceed(&self.regs) {
                self.op_index = ops.len();
            } else if op.force_finish_cycle() {
                return Step::Yield;
            }
            if accesses_memory {
                *bus_used = true;
            }
            if end_cycle {
                return Step::Yield;
            }
        }

        if self.op_index >= ops.len() {
            self.state = State::Opcode;
            self.operand_index = 0;
            bus.interrupts_mut().on_instruction_retired();
            return Step::Yield;
        }
        Step::Continue
    }

    /// Apply the DMG OAM corruption for an op about to drive the inc/dec
    /// unit into OAM.
    ///
    /// Returns `false` when the LCD is off: nothing is corrupted, but the
    /// machine cycle ends right after the op.
    fn handle_oam_bug<B: Bus>(&self, bus: &mut B, kind: CorruptionKind) -> bool {
        if !bus.lcd_enabled() {
            return false;
        }
        let ticks = bus.ticks_in_line();
        if bus.in_oam_search() && ticks < OAM_BUG_LAST_TICK {
            log::debug!(
                "GB CPU OAM corruption {:?} at pc=0x{:04X} ticks_in_line={}",
                kind,
                self.regs.pc,
                ticks
            );
            bus.corrupt_oam(kind, ticks);
        }
        true
    }
}
