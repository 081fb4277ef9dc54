use crate::cpu_micro::{Arg, Condition, Op};

use super::Opcode;

/// Assembles an [`Opcode`] from micro-ops.
///
/// The operand length is derived from the immediates the ops consume, so
/// `OpcodeBuilder::new(0x01, "LD BC,d16").load(Arg::D16)` already knows two
/// operand bytes follow the opcode.
#[derive(Clone, Debug)]
pub struct OpcodeBuilder {
    value: u8,
    label: String,
    ops: Vec<Op>,
    length: usize,
}

impl OpcodeBuilder {
    pub fn new(value: u8, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            ops: Vec::new(),
            length: 0,
        }
    }

    pub fn op(mut self, op: Op) -> Self {
        let consumed = match op {
            Op::Load(arg) | Op::Store(arg) => arg.operand_length(),
            Op::RelativeTarget => 1,
            _ => 0,
        };
        self.length = self.length.max(consumed);
        self.ops.push(op);
        self
    }

    pub fn load(self, arg: Arg) -> Self {
        self.op(Op::Load(arg))
    }

    pub fn store(self, arg: Arg) -> Self {
        debug_assert!(
            !matches!(arg, Arg::D8 | Arg::D16),
            "{:02X} {}: store into an immediate",
            self.value,
            self.label
        );
        self.op(Op::Store(arg))
    }

    pub fn load_word(self, value: u16) -> Self {
        self.op(Op::LoadWord(value))
    }

    pub fn proceed_if(self, condition: Condition) -> Self {
        self.op(Op::ProceedIf(condition))
    }

    pub fn extra_cycle(self) -> Self {
        self.op(Op::ExtraCycle)
    }

    pub fn force_finish(self) -> Self {
        self.op(Op::ForceFinish)
    }

    /// Push the context: internal SP decrement, then high and low byte.
    pub fn push(self) -> Self {
        self.op(Op::PushPrepare).op(Op::PushHigh).op(Op::PushLow)
    }

    /// Pop a word into the context.
    pub fn pop(self) -> Self {
        self.op(Op::PopLow).op(Op::PopHigh)
    }

    pub fn switch_interrupts(self, enable: bool, delayed: bool) -> Self {
        self.op(Op::SwitchInterrupts { enable, delayed })
    }

    pub fn build(self) -> Opcode {
        Opcode {
            value: self.value,
            label: self.label,
            ops: self.ops,
            length: self.length,
        }
    }
}
