use crate::opcodes::{opcodes, Opcode, PREFIX_CB, STOP};

use super::super::{Bus, Cpu, DecodeError, State};
use super::Step;

impl Cpu {
    /// Descriptor of the instruction in flight.
    pub(super) fn latched_opcode(&self) -> &'static Opcode {
        match self.current {
            Some(opcode) => opcode,
            None => unreachable!("GB CPU: no opcode latched in {:?}", self.state),
        }
    }

    fn decode(opcode: u8, pc: u16) -> Result<&'static Opcode, DecodeError> {
        opcodes()
            .lookup(opcode)
            .ok_or(DecodeError::UnknownOpcode { opcode, pc })
    }

    /// Opcode fetch. Always the first bus access of its machine cycle.
    pub(super) fn fetch_opcode<B: Bus>(
        &mut self,
        bus: &mut B,
        bus_used: &mut bool,
    ) -> Result<Step, DecodeError> {
        self.clear_state();
        let pc = self.regs.pc;
        self.opcode1 = bus.read8(pc);
        *bus_used = true;

        match self.opcode1 {
            PREFIX_CB => self.state = State::ExtOpcode,
            // STOP is followed by a padding byte, fetched like a CB suffix.
            STOP => {
                self.current = Some(Self::decode(STOP, pc)?);
                self.state = State::ExtOpcode;
            }
            opcode => {
                self.current = Some(Self::decode(opcode, pc)?);
                self.state = State::Operand;
            }
        }
        log::trace!("GB CPU fetch pc=0x{pc:04X} opcode=0x{:02X}", self.opcode1);

        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.regs.increment_pc();
        }
        Ok(Step::Continue)
    }

    /// Second opcode byte: CB page selector or STOP's padding.
    pub(super) fn fetch_ext_opcode<B: Bus>(
        &mut self,
        bus: &mut B,
        bus_used: &mut bool,
    ) -> Result<Step, DecodeError> {
        if *bus_used {
            return Ok(Step::Yield);
        }
        *bus_used = true;

        let pc = self.regs.pc;
        self.opcode2 = bus.read8(pc);
        if self.current.is_none() {
            let opcode = self.opcode2;
            let descriptor = opcodes()
                .lookup_extended(opcode)
                .ok_or(DecodeError::UnknownExtendedOpcode { opcode, pc })?;
            self.current = Some(descriptor);
        }

        self.state = State::Operand;
        self.regs.increment_pc();
        Ok(Step::Continue)
    }

    /// Immediate operand bytes, one per machine cycle.
    pub(super) fn fetch_operands<B: Bus>(&mut self, bus: &mut B, bus_used: &mut bool) -> Step {
        let length = self.latched_opcode().length();
        debug_assert!(length <= self.operand.len());

        while self.operand_index < length {
            if *bus_used {
                return Step::Yield;
            }
            *bus_used = true;
            self.operand[self.operand_index] = bus.read8(self.regs.pc);
            self.operand_index += 1;
            self.regs.increment_pc();
        }

        self.op_index = 0;
        self.state = State::Running;
        Step::Continue
    }
}
