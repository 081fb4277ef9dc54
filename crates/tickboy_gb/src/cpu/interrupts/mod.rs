mod dispatch;

use bitflags::bitflags;

use crate::config::Model;

bitflags! {
    /// Interrupt lines as laid out in IE ($FFFF) and IF ($FF0F).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// The five interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Mask of this source in IE/IF.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(self.bit())
    }

    /// Handler address: $0040, $0048, $0050, $0058, $0060.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self.index() as u16) * 8
    }

    /// Lowest-numbered source set in `mask`, if any.
    pub fn highest_priority(mask: u8) -> Option<Self> {
        let pending = mask & InterruptFlags::all().bits();
        if pending == 0 {
            return None;
        }
        Some(Self::ALL[pending.trailing_zeros() as usize])
    }
}

/// Interrupt controller: IE, IF and the master enable (IME).
///
/// EI (and DI on CGB) take effect one instruction late; the CPU reports
/// every retired instruction through `on_instruction_retired` to advance
/// those pipelines.
#[derive(Clone, Debug, Default)]
pub struct Interrupts {
    ime: bool,
    ie: u8,
    iflags: InterruptFlags,
    delayed_disable: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    ime_disable_pending: bool,
    ime_disable_delay: bool,
}

impl Interrupts {
    pub fn new(model: Model) -> Self {
        Self {
            delayed_disable: model.is_cgb(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn enabled_mask(&self) -> u8 {
        self.ie
    }

    #[inline]
    pub fn pending_mask(&self) -> u8 {
        self.iflags.bits()
    }

    pub fn request(&mut self, irq: Interrupt) {
        self.iflags.insert(irq.flag());
    }

    pub fn clear(&mut self, irq: Interrupt) {
        self.iflags.remove(irq.flag());
    }

    /// Set IME. With `delayed` (EI) the change lands after the next
    /// instruction retires.
    pub fn enable(&mut self, delayed: bool) {
        self.ime_disable_pending = false;
        self.ime_disable_delay = false;
        if delayed {
            if !self.ime_enable_delay {
                self.ime_enable_pending = true;
            }
        } else {
            self.ime_enable_pending = false;
            self.ime_enable_delay = false;
            self.ime = true;
        }
    }

    /// Clear IME. Only CGB honours `delayed`; DMG's DI is immediate.
    pub fn disable(&mut self, delayed: bool) {
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        if delayed && self.delayed_disable {
            if !self.ime_disable_delay {
                self.ime_disable_pending = true;
            }
        } else {
            self.ime_disable_pending = false;
            self.ime_disable_delay = false;
            self.ime = false;
        }
    }

    pub fn set_master_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable(false);
        } else {
            self.disable(false);
        }
    }

    /// Some line is both requested and enabled, regardless of IME.
    #[inline]
    pub fn is_requested(&self) -> bool {
        (self.ie & self.iflags.bits()) != 0
    }

    /// HALT executed now would trigger the halt bug: an interrupt is
    /// requested while IME is off.
    #[inline]
    pub fn is_halt_bug(&self) -> bool {
        self.is_requested() && !self.ime
    }

    /// Advance the EI/DI delay pipelines by one retired instruction.
    pub fn on_instruction_retired(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }

        if self.ime_disable_delay {
            self.ime = false;
            self.ime_disable_delay = false;
        } else if self.ime_disable_pending {
            self.ime_disable_pending = false;
            self.ime_disable_delay = true;
        }
    }

    /// IF as read by the CPU; the upper three bits are unused and read 1.
    pub fn read_if(&self) -> u8 {
        0xE0 | self.iflags.bits()
    }

    pub fn write_if(&mut self, value: u8) {
        self.iflags = InterruptFlags::from_bits_truncate(value);
    }

    pub fn read_ie(&self) -> u8 {
        self.ie
    }

    /// All eight IE bits are writable, only the low five select sources.
    pub fn write_ie(&mut self, value: u8) {
        self.ie = value;
    }
}
