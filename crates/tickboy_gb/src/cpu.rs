mod bus;
mod interrupts;
mod regs;
mod speed;
mod step;

use thiserror::Error;

use crate::config::{CpuConfig, Model};
use crate::opcodes::Opcode;

pub use bus::Bus;
pub use interrupts::{Interrupt, InterruptFlags, Interrupts};
pub use regs::{Flag, Reg16, Reg8, Registers};
pub use speed::SpeedMode;

/// Control state of the CPU between two machine cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Next machine cycle fetches an opcode.
    Opcode,
    /// Second byte of a CB-prefixed opcode (or STOP's padding byte).
    ExtOpcode,
    /// Collecting immediate operand bytes.
    Operand,
    /// Running the micro-ops of the current opcode.
    Running,
    IrqReadIf,
    IrqReadIe,
    IrqPush1,
    IrqPush2,
    IrqJump,
    Stopped,
    Halted,
}

impl State {
    #[inline]
    pub fn is_irq(self) -> bool {
        matches!(
            self,
            State::IrqReadIf | State::IrqReadIe | State::IrqPush1 | State::IrqPush2 | State::IrqJump
        )
    }
}

/// Fetched byte that has no descriptor in the opcode table.
///
/// Running into one means the program (or the table) is broken; the CPU
/// cannot make progress past it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode 0x{opcode:02X} at 0x{pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },
    #[error("unknown opcode 0xCB 0x{opcode:02X} at 0x{pc:04X}")]
    UnknownExtendedOpcode { opcode: u8, pc: u16 },
}

/// Game Boy CPU core, stepped one base clock tick at a time.
///
/// Four ticks (two in CGB double speed) make a machine cycle, and a machine
/// cycle performs at most one bus access. An instruction therefore spans
/// several `tick` calls; the CPU can be left at any point between two calls
/// and resumed later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    config: CpuConfig,
    state: State,
    /// Base ticks accumulated towards the current machine cycle.
    clock_cycle: u32,
    opcode1: u8,
    opcode2: u8,
    operand: [u8; 2],
    operand_index: usize,
    current: Option<&'static Opcode>,
    op_index: usize,
    /// Value handed from one micro-op to the next.
    op_context: u16,
    /// Set by HALT when the halt bug triggers: the next opcode fetch does
    /// not advance PC.
    halt_bug: bool,
    /// IF/IE as sampled by the interrupt dispatch cycles.
    irq_flags: u8,
    irq_enabled: u8,
    requested_irq: Option<Interrupt>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            config,
            state: State::Opcode,
            clock_cycle: 0,
            opcode1: 0,
            opcode2: 0,
            operand: [0; 2],
            operand_index: 0,
            current: None,
            op_index: 0,
            op_context: 0,
            halt_bug: false,
            irq_flags: 0,
            irq_enabled: 0,
            requested_irq: None,
        };
        if config.post_boot {
            cpu.apply_boot_state();
        }
        cpu
    }

    /// Reset the CPU to the state it was constructed with.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    /// Initialize registers to match the boot ROM's state after it hands
    /// control to cartridge code.
    ///
    /// Values as documented in Pan Docs ("Power Up Sequence").
    fn apply_boot_state(&mut self) {
        match self.config.model {
            Model::Dmg => {
                self.regs.a = 0x01;
                self.regs.f = 0xB0; // Z, N, H, C = 1,0,1,1
                self.regs.b = 0x00;
                self.regs.c = 0x13;
                self.regs.d = 0x00;
                self.regs.e = 0xD8;
                self.regs.h = 0x01;
                self.regs.l = 0x4D;
            }
            Model::Cgb => {
                self.regs.a = 0x11;
                self.regs.f = 0x80;
                self.regs.b = 0x00;
                self.regs.c = 0x00;
                self.regs.d = 0xFF;
                self.regs.e = 0x56;
                self.regs.h = 0x00;
                self.regs.l = 0x0D;
            }
        }
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }

    #[inline]
    pub fn config(&self) -> CpuConfig {
        self.config
    }

    #[inline]
    pub fn model(&self) -> Model {
        self.config.model
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// Whether the next opcode fetch will skip the PC increment.
    #[inline]
    pub fn halt_bug(&self) -> bool {
        self.halt_bug
    }

    /// Descriptor of the instruction being decoded or run, if any.
    #[inline]
    pub fn current_opcode(&self) -> Option<&'static Opcode> {
        self.current
    }

    /// True between instructions: nothing decoded, no partial machine cycle.
    #[inline]
    pub fn at_instruction_boundary(&self) -> bool {
        self.state == State::Opcode && self.clock_cycle == 0
    }

    /// Clear the per-instruction transient state ahead of an opcode fetch.
    fn clear_state(&mut self) {
        self.opcode1 = 0;
        self.opcode2 = 0;
        self.current = None;
        self.operand = [0; 2];
        self.operand_index = 0;
        self.op_index = 0;
        self.op_context = 0;
        self.irq_flags = 0;
        self.irq_enabled = 0;
    }
}
