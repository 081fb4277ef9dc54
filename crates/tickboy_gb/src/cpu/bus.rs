use crate::cpu_micro::CorruptionKind;

use super::{Interrupts, SpeedMode};

/// Abstraction over the Game Boy bus (memory, IO and the pieces of the
/// machine the CPU core talks to directly).
///
/// The CPU never keeps references into the bus between two `tick` calls;
/// everything is re-read through these methods on every machine cycle.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Interrupt controller backing IE ($FFFF), IF ($FF0F) and IME.
    fn interrupts(&self) -> &Interrupts;
    fn interrupts_mut(&mut self) -> &mut Interrupts;

    /// CGB clock multiplier state backing KEY1 ($FF4D).
    fn speed_mode(&mut self) -> &mut SpeedMode;

    /// Whether the LCD controller is switched on (LCDC bit 7).
    ///
    /// Called in the middle of a machine cycle, so implementations must
    /// answer from PPU state rather than through `read8`. Buses without a
    /// PPU model can leave the default.
    fn lcd_enabled(&mut self) -> bool {
        true
    }

    /// Switch the LCD controller on or off. Used when entering and leaving
    /// STOP; like `lcd_enabled` it must not go through `write8`.
    fn set_lcd_enabled(&mut self, _enabled: bool) {}

    /// Position of the PPU within the current scanline, in PPU ticks.
    ///
    /// Buses without a PPU model can leave the default.
    fn ticks_in_line(&self) -> u32 {
        0
    }

    /// Returns `true` while the PPU is in mode 2 (OAM search).
    fn in_oam_search(&mut self) -> bool {
        false
    }

    /// Inject the DMG OAM corruption pattern for `kind` at the given line
    /// position.
    ///
    /// The corruption patterns live with the PPU; the default does nothing.
    fn corrupt_oam(&mut self, _kind: CorruptionKind, _ticks_in_line: u32) {}
}
