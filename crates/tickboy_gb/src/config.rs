use typed_builder::TypedBuilder;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Model {
    #[default]
    Dmg,
    /// CGB hardware: KEY1 speed switching, delayed DI and no OAM corruption
    /// from the 16-bit inc/dec unit.
    Cgb,
}

impl Model {
    #[inline]
    pub fn is_cgb(self) -> bool {
        matches!(self, Model::Cgb)
    }

    /// Whether the DMG OAM corruption bug exists on this model.
    #[inline]
    pub fn has_oam_bug(self) -> bool {
        matches!(self, Model::Dmg)
    }
}

/// Construction options for [`Cpu`](crate::Cpu).
///
/// ```
/// use tickboy_gb::{CpuConfig, Model};
///
/// let config = CpuConfig::builder().model(Model::Cgb).build();
/// assert!(config.post_boot);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    #[builder(default)]
    pub model: Model,
    /// Start from the register state the boot ROM hands to the cartridge
    /// (PC = $0100). When false every register starts at zero so a boot ROM
    /// can run from $0000.
    #[builder(default = true)]
    pub post_boot: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
