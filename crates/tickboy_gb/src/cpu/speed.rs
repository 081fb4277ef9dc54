/// CGB clock multiplier (KEY1, $FF4D).
///
/// Writing bit 0 of KEY1 arms a switch; the next STOP instruction consumes
/// it and flips between normal and double speed instead of stopping the
/// CPU. On DMG nothing ever arms a switch, so STOP always stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeedMode {
    double_speed: bool,
    switch_armed: bool,
}

impl SpeedMode {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_double_speed(&self) -> bool {
        self.double_speed
    }

    #[inline]
    pub fn is_switch_armed(&self) -> bool {
        self.switch_armed
    }

    pub fn arm_switch(&mut self) {
        self.switch_armed = true;
    }

    /// Called when a STOP instruction executes.
    ///
    /// Returns `true` if an armed switch was consumed (the speed flipped and
    /// the CPU keeps running), `false` if the CPU has to enter STOP.
    pub fn on_stop(&mut self) -> bool {
        if !self.switch_armed {
            return false;
        }
        self.switch_armed = false;
        self.double_speed = !self.double_speed;
        log::debug!(
            "GB CPU speed switch: now {} speed",
            if self.double_speed { "double" } else { "normal" }
        );
        true
    }

    /// Clock divisor applied to the 4 base ticks of a machine cycle.
    #[inline]
    pub fn divisor(&self) -> u32 {
        if self.double_speed {
            2
        } else {
            1
        }
    }

    /// KEY1 as seen by the CPU: bit 7 current speed, bit 0 armed switch,
    /// unused bits read as 1.
    pub fn key1(&self) -> u8 {
        let mut value = 0x7E;
        if self.double_speed {
            value |= 0x80;
        }
        if self.switch_armed {
            value |= 0x01;
        }
        value
    }

    /// Only bit 0 of KEY1 is writable.
    pub fn write_key1(&mut self, value: u8) {
        self.switch_armed = (value & 0x01) != 0;
    }
}
