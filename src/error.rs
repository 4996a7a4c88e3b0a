use core::fmt;

use crate::driver::InitPhase;

#[derive(Debug, PartialEq, Eq)]
pub enum Ads1x9xError<SpiError, GpioError> {
    Spi(SpiError),
    Gpio(GpioError),
    /// Chip index outside the configured chip count
    InvalidChip(usize),
    /// Register burst length outside 1..=32
    InvalidCount(usize),
    /// Init pass called before its predecessor completed, or called twice
    OutOfOrder {
        requested: InitPhase,
        completed: Option<InitPhase>,
    },
    /// Bus used before `init_pass1`
    BusNotReady,
}

impl<SpiError: fmt::Debug, GpioError: fmt::Debug> fmt::Display
    for Ads1x9xError<SpiError, GpioError>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ads1x9xError::Spi(e) => write!(f, "SPI error: {:?}", e),
            Ads1x9xError::Gpio(e) => write!(f, "chip select error: {:?}", e),
            Ads1x9xError::InvalidChip(chip) => write!(f, "no chip at index {}", chip),
            Ads1x9xError::InvalidCount(count) => {
                write!(f, "register burst of {} is outside 1..=32", count)
            }
            Ads1x9xError::OutOfOrder {
                requested,
                completed,
            } => write!(f, "{:?} requested after {:?}", requested, completed),
            Ads1x9xError::BusNotReady => write!(f, "SPI bus used before init pass 1"),
        }
    }
}

#[cfg(feature = "std")]
impl<SpiError: fmt::Debug, GpioError: fmt::Debug> std::error::Error
    for Ads1x9xError<SpiError, GpioError>
{
}
