//! Driver for TI ADS1x9x biopotential analog front ends on a shared SPI bus.
//!
//! Power-up is split into four passes that the caller runs with the
//! hardware-dependent delays in between (or all at once with
//! [`Ads1x9x::initialize`]). After that, frames are polled per chip with
//! [`Ads1x9x::read_sample`].
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod config;
mod constants;
mod driver;
mod error;
pub mod protocol;
mod sample;

#[cfg(test)]
mod testing;

pub use config::{
    Config, RegisterTable, Timing, Variant, DEFAULT_POWER_ON_RESET_MS, DEFAULT_POWER_STABLE_MS,
    DEFAULT_REFERENCE_SETTLE_MS,
};
pub use constants::*;

pub use driver::{Ads1x9x, InitPhase};

pub use error::Ads1x9xError;
pub use sample::{FrameLayout, SampleFrame, CHANNELS, MAX_FRAME_LEN, MAX_STATUS_LEN};
