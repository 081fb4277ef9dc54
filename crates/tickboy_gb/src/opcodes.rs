//! Opcode descriptors and the table the CPU decodes against.
//!
//! Each descriptor carries the micro-op sequence of one instruction and
//! the number of operand bytes that follow the opcode. The CPU only ever
//! borrows descriptors from the process-wide table returned by
//! [`opcodes`].

mod builder;
mod table;

use lazy_static::lazy_static;

use crate::cpu_micro::Op;

pub use builder::OpcodeBuilder;
pub use table::OpcodeTable;

/// CB prefix selecting the extended opcode page.
pub const PREFIX_CB: u8 = 0xCB;
pub const STOP: u8 = 0x10;
pub const HALT: u8 = 0x76;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    value: u8,
    label: String,
    ops: Vec<Op>,
    length: usize,
}

impl Opcode {
    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Mnemonic, for logs and diagnostics only.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Operand bytes following the opcode (0..=2).
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X} {}", self.value, self.label)
    }
}

lazy_static! {
    static ref OPCODES: OpcodeTable = OpcodeTable::new();
}

/// The process-wide opcode table.
pub fn opcodes() -> &'static OpcodeTable {
    &OPCODES
}
