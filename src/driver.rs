use crate::config::Config;
use crate::constants::*;
use crate::error::Ads1x9xError;
use crate::protocol;
use crate::sample::{SampleFrame, MAX_FRAME_LEN};
use core::result::Result;
use core::result::Result::Ok;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

/// Power-up stages, in the order they must run
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InitPhase {
    /// Bus ready, no chip selected
    Pass1,
    /// All chip selects idle
    Pass2,
    /// Continuous mode stopped, internal reference enabled
    Pass3,
    /// Sampling registers configured
    Pass4,
}

impl InitPhase {
    fn previous(self) -> Option<InitPhase> {
        match self {
            InitPhase::Pass1 => None,
            InitPhase::Pass2 => Some(InitPhase::Pass1),
            InitPhase::Pass3 => Some(InitPhase::Pass2),
            InitPhase::Pass4 => Some(InitPhase::Pass3),
        }
    }
}

/// Driver for `N` ADS1x9x chips sharing one SPI bus, each with its own
/// active-low chip select.
///
/// The driver holds chip select itself, so it takes the raw [`SpiBus`]
/// rather than an `SpiDevice`. At most one chip is selected at a time.
pub struct Ads1x9x<SPI, CS, const N: usize> {
    spi: SPI,
    cs: [CS; N],
    config: Config,
    completed: Option<InitPhase>,
    selected: Option<usize>,
}

impl<SPI, CS, SpiError, GpioError, const N: usize> Ads1x9x<SPI, CS, N>
where
    SPI: SpiBus<u8, Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
{
    /// Creates a new driver instance. Nothing is sent until `init_pass1`.
    pub fn new(spi: SPI, cs: [CS; N], config: Config) -> Self {
        Ads1x9x {
            spi,
            cs,
            config,
            completed: None,
            selected: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Last init pass that completed
    pub fn phase(&self) -> Option<InitPhase> {
        self.completed
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Gives back the bus and chip-select pins
    pub fn release(self) -> (SPI, [CS; N]) {
        (self.spi, self.cs)
    }

    fn enter(&self, requested: InitPhase) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        if self.completed != requested.previous() {
            log::error!(
                "{:?} requested, last completed pass is {:?}",
                requested,
                self.completed
            );
            return Err(Ads1x9xError::OutOfOrder {
                requested,
                completed: self.completed,
            });
        }
        Ok(())
    }

    fn complete(&mut self, phase: InitPhase) {
        log::info!(
            "{} {:?} complete for {} chip(s)",
            self.config.variant.name(),
            phase,
            N
        );
        self.completed = Some(phase);
    }

    fn ensure_bus_ready(&self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        if self.completed.is_none() {
            log::error!("SPI bus used before init pass 1");
            return Err(Ads1x9xError::BusNotReady);
        }
        Ok(())
    }
}

// Initialization sequence.
//
// The passes never wait on their own: the caller runs each one once the
// physical condition it depends on holds (see `Timing`), or uses `initialize`.
impl<SPI, CS, SpiError, GpioError, const N: usize> Ads1x9x<SPI, CS, N>
where
    SPI: SpiBus<u8, Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
{
    /// Brings the bus up. Run once, right after startup.
    pub fn init_pass1(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.enter(InitPhase::Pass1)?;
        self.spi.flush().map_err(Ads1x9xError::Spi)?;
        self.selected = None;
        self.complete(InitPhase::Pass1);
        Ok(())
    }

    /// Drives every chip select to idle. Run once the supplies are stable.
    pub fn init_pass2(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.enter(InitPhase::Pass2)?;
        for pin in self.cs.iter_mut() {
            pin.set_high().map_err(Ads1x9xError::Gpio)?;
        }
        self.selected = None;
        self.complete(InitPhase::Pass2);
        Ok(())
    }

    /// Leaves continuous mode, stops conversions and enables the internal
    /// reference on every chip. Run t_POR after `init_pass2`.
    pub fn init_pass3(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.enter(InitPhase::Pass3)?;
        let registers = self.config.variant.reference_registers();
        for chip in 0..N {
            self.with_chip(chip, |ads| {
                ads.command(Command::Sdatac)?;
                ads.command(Command::Stop)?;
                for &(address, value) in registers {
                    ads.write_register(address, value)?;
                }
                Ok(())
            })?;
        }
        self.complete(InitPhase::Pass3);
        Ok(())
    }

    /// Writes the sampling configuration to every chip. Run once the
    /// internal reference has settled after `init_pass3`.
    pub fn init_pass4(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.enter(InitPhase::Pass4)?;
        let registers = self.config.variant.configuration_registers();
        for chip in 0..N {
            self.with_chip(chip, |ads| {
                for &(address, value) in registers {
                    ads.write_register(address, value)?;
                }
                Ok(())
            })?;
        }
        self.complete(InitPhase::Pass4);
        Ok(())
    }

    /// Runs all four passes, waiting the configured [`Timing`](crate::Timing)
    /// between them.
    pub fn initialize<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        let timing = self.config.timing;
        self.init_pass1()?;
        delay.delay_ms(timing.power_stable_ms);
        self.init_pass2()?;
        delay.delay_ms(timing.power_on_reset_ms);
        self.init_pass3()?;
        delay.delay_ms(timing.reference_settle_ms);
        self.init_pass4()
    }
}

// Chip select and raw exchanges
impl<SPI, CS, SpiError, GpioError, const N: usize> Ads1x9x<SPI, CS, N>
where
    SPI: SpiBus<u8, Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
{
    /// Selects `chip`, deselecting any other chip first
    pub fn select(&mut self, chip: usize) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        if chip >= N {
            log::error!("Chip index {} out of range (have {})", chip, N);
            return Err(Ads1x9xError::InvalidChip(chip));
        }
        self.ensure_bus_ready()?;
        match self.selected {
            Some(current) if current == chip => return Ok(()),
            Some(_) => self.deselect()?,
            None => {}
        }
        self.cs[chip].set_low().map_err(Ads1x9xError::Gpio)?;
        self.selected = Some(chip);
        Ok(())
    }

    /// Finishes pending transfers and releases the selected chip, if any.
    /// Chip select is raised even when the flush fails.
    pub fn deselect(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        let Some(chip) = self.selected.take() else {
            return Ok(());
        };
        let flushed = self.spi.flush().map_err(Ads1x9xError::Spi);
        self.cs[chip].set_high().map_err(Ads1x9xError::Gpio)?;
        flushed
    }

    /// Runs `body` in one chip-select frame of `chip`. The chip is released
    /// on every path; the first error wins.
    fn with_chip<T>(
        &mut self,
        chip: usize,
        body: impl FnOnce(&mut Self) -> Result<T, Ads1x9xError<SpiError, GpioError>>,
    ) -> Result<T, Ads1x9xError<SpiError, GpioError>> {
        self.select(chip)?;
        let result = body(self);
        if result.is_err() {
            log::error!("Transfer to chip {} failed, releasing chip select", chip);
        }
        let released = self.deselect();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Clocks one byte out and returns the byte clocked in
    pub fn exchange(&mut self, byte: u8) -> Result<u8, Ads1x9xError<SpiError, GpioError>> {
        self.ensure_bus_ready()?;
        let mut buffer = [byte];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(Ads1x9xError::Spi)?;
        Ok(buffer[0])
    }

    /// Sends a command to the currently selected chip
    pub fn command(&mut self, command: Command) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.ensure_bus_ready()?;
        log::debug!("Sending command: 0x{:02X}", command.opcode());
        self.spi
            .write(&[command.opcode()])
            .map_err(Ads1x9xError::Spi)?;
        Ok(())
    }

    /// Selects `chip`, exchanges one byte, deselects
    pub fn chip_transact(
        &mut self,
        chip: usize,
        byte: u8,
    ) -> Result<u8, Ads1x9xError<SpiError, GpioError>> {
        self.with_chip(chip, |ads| ads.exchange(byte))
    }

    /// Sends a single command byte to `chip` in its own chip-select frame
    pub fn send_command(
        &mut self,
        chip: usize,
        command: Command,
    ) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        log::debug!("Sending command 0x{:02X} to chip {}", command.opcode(), chip);
        self.chip_transact(chip, command.opcode())?;
        Ok(())
    }
}

// Register access. These do not touch chip select: bracket them with
// `select`/`deselect`.
impl<SPI, CS, SpiError, GpioError, const N: usize> Ads1x9x<SPI, CS, N>
where
    SPI: SpiBus<u8, Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
{
    pub fn read_register(&mut self, address: u8) -> Result<u8, Ads1x9xError<SpiError, GpioError>> {
        let mut value = [0u8; 1];
        self.read_registers(address, &mut value)?;
        Ok(value[0])
    }

    /// Reads `buffer.len()` consecutive registers starting at `address`.
    /// Address bits above bit 4 are ignored.
    pub fn read_registers(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.ensure_bus_ready()?;
        self.check_count(buffer.len())?;
        let header = protocol::read_command(address, buffer.len());
        self.spi.write(&header).map_err(Ads1x9xError::Spi)?;
        buffer.fill(0x00);
        self.spi
            .transfer_in_place(buffer)
            .map_err(Ads1x9xError::Spi)?;
        log::debug!(
            "Read {} register(s) at 0x{:02X}: {:02X?}",
            buffer.len(),
            address & FIELD_MASK,
            buffer
        );
        Ok(())
    }

    pub fn write_register(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.write_registers(address, &[value])
    }

    /// Writes `data` to consecutive registers starting at `address`
    pub fn write_registers(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        self.ensure_bus_ready()?;
        self.check_count(data.len())?;
        log::debug!(
            "Writing register(s) at 0x{:02X}: {:02X?}",
            address & FIELD_MASK,
            data
        );
        let header = protocol::write_command(address, data.len());
        self.spi.write(&header).map_err(Ads1x9xError::Spi)?;
        self.spi.write(data).map_err(Ads1x9xError::Spi)?;
        Ok(())
    }

    fn check_count(&self, count: usize) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        if !protocol::valid_count(count) {
            log::error!("Register burst of {} outside 1..={}", count, MAX_BURST);
            return Err(Ads1x9xError::InvalidCount(count));
        }
        Ok(())
    }
}

// Sampling and diagnostics
impl<SPI, CS, SpiError, GpioError, const N: usize> Ads1x9x<SPI, CS, N>
where
    SPI: SpiBus<u8, Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
{
    /// Clocks one frame out of `chip`. The chip must be in continuous data
    /// mode; no command byte is sent.
    pub fn read_sample(
        &mut self,
        chip: usize,
    ) -> Result<SampleFrame, Ads1x9xError<SpiError, GpioError>> {
        let layout = self.config.variant.frame_layout();
        let mut raw = [0u8; MAX_FRAME_LEN];
        self.with_chip(chip, |ads| {
            ads.spi
                .transfer_in_place(&mut raw[..layout.frame_len()])
                .map_err(Ads1x9xError::Spi)
        })?;
        log::trace!(
            "Raw frame from chip {}: {:02X?}",
            chip,
            &raw[..layout.frame_len()]
        );
        Ok(SampleFrame::from_wire(&raw, layout))
    }

    /// Starts conversions and enters continuous data mode on every chip
    pub fn start_streaming(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        for chip in 0..N {
            self.send_command(chip, Command::Start)?;
            self.send_command(chip, Command::Rdatac)?;
        }
        Ok(())
    }

    /// Leaves continuous data mode and stops conversions on every chip
    pub fn stop_streaming(&mut self) -> Result<(), Ads1x9xError<SpiError, GpioError>> {
        for chip in 0..N {
            self.send_command(chip, Command::Sdatac)?;
            self.send_command(chip, Command::Stop)?;
        }
        Ok(())
    }

    pub fn read_id(&mut self, chip: usize) -> Result<u8, Ads1x9xError<SpiError, GpioError>> {
        self.with_chip(chip, |ads| ads.read_register(REG_ID))
    }

    /// Reads the whole register file of `chip` and logs the named registers
    pub fn dump_registers(
        &mut self,
        chip: usize,
    ) -> Result<[u8; REGISTER_FILE_LEN], Ads1x9xError<SpiError, GpioError>> {
        let mut registers = [0u8; REGISTER_FILE_LEN];
        self.with_chip(chip, |ads| ads.read_registers(REG_ID, &mut registers))?;

        for (reg, name) in REGISTER_NAMES.iter() {
            log::debug!(
                "Chip {} register {}: 0x{:02X}",
                chip,
                name,
                registers[*reg as usize]
            );
        }

        Ok(registers)
    }
}
