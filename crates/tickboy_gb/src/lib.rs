pub mod config;
pub mod cpu;
pub mod cpu_micro;
pub mod opcodes;

pub use config::{CpuConfig, Model};
pub use cpu::{
    Bus, Cpu, DecodeError, Flag, Interrupt, InterruptFlags, Interrupts, Registers, SpeedMode,
    State,
};
pub use cpu_micro::CorruptionKind;

/// Base clock ticks per machine cycle at normal speed.
pub const TICKS_PER_MCYCLE: u32 = 4;
