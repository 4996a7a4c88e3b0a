//! Variant and timing configuration.

use crate::constants::*;
use crate::sample::FrameLayout;

/// Default settle time between power-up and `init_pass2`
pub const DEFAULT_POWER_STABLE_MS: u32 = 0;

/// Default wait between `init_pass2` and `init_pass3`.
///
/// The datasheet gives t_POR as 2^16 t_CLK (about 33 ms) as a minimum, while its
/// power-up flow chart asks for 1 s. The longer figure is used here.
pub const DEFAULT_POWER_ON_RESET_MS: u32 = 1000;

/// Default wait between `init_pass3` and `init_pass4` for the internal reference
pub const DEFAULT_REFERENCE_SETTLE_MS: u32 = 500;

/// Register value pairs written during initialization
pub type RegisterTable = &'static [(u8, u8)];

const BASE_REFERENCE: [(u8, u8); 1] = [(REG_CONFIG2, 0x30)];
const BASE_CONFIGURATION: [(u8, u8); 0] = [];

const ADS1194_REFERENCE: [(u8, u8); 1] = [(REG_CONFIG3, 0xE0)];
const ADS1194_CONFIGURATION: [(u8, u8); 6] = [
    // Daisy-chain disabled, 125 SPS
    (REG_CONFIG1, 0x46),
    (REG_CONFIG2, 0x30),
    (REG_CH1SET, 0x05),
    (REG_CH2SET, 0x05),
    (REG_CH3SET, 0x04),
    (REG_CH4SET, 0x04),
];

/// Chip sub-model, selecting the registers written during initialization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Family members whose power-on defaults (500 SPS, 6x PGA) are kept as is
    #[default]
    Base,
    Ads1194,
}

impl Variant {
    /// Registers enabling the internal reference (4 V), written by `init_pass3`
    pub fn reference_registers(self) -> RegisterTable {
        match self {
            Variant::Base => &BASE_REFERENCE,
            Variant::Ads1194 => &ADS1194_REFERENCE,
        }
    }

    /// Registers written by `init_pass4` once the reference has settled
    pub fn configuration_registers(self) -> RegisterTable {
        match self {
            Variant::Base => &BASE_CONFIGURATION,
            Variant::Ads1194 => &ADS1194_CONFIGURATION,
        }
    }

    /// Continuous-mode frame shape: 24 status bits, then 16 bits per channel
    pub fn frame_layout(self) -> FrameLayout {
        match self {
            Variant::Base | Variant::Ads1194 => FrameLayout::new(3),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Base => "ADS1x9x",
            Variant::Ads1194 => "ADS1194",
        }
    }
}

/// Delays observed by [`Ads1x9x::initialize`](crate::Ads1x9x::initialize)
/// between the init passes, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub power_stable_ms: u32,
    pub power_on_reset_ms: u32,
    pub reference_settle_ms: u32,
}

impl Timing {
    pub fn with_power_stable_ms(mut self, ms: u32) -> Self {
        self.power_stable_ms = ms;
        self
    }

    pub fn with_power_on_reset_ms(mut self, ms: u32) -> Self {
        self.power_on_reset_ms = ms;
        self
    }

    pub fn with_reference_settle_ms(mut self, ms: u32) -> Self {
        self.reference_settle_ms = ms;
        self
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            power_stable_ms: DEFAULT_POWER_STABLE_MS,
            power_on_reset_ms: DEFAULT_POWER_ON_RESET_MS,
            reference_settle_ms: DEFAULT_REFERENCE_SETTLE_MS,
        }
    }
}

/// Driver configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub variant: Variant,
    pub timing: Timing,
}

impl Config {
    pub fn new(variant: Variant) -> Self {
        Config {
            variant,
            timing: Timing::default(),
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}
