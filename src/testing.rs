//! Recording test bench: a fake SPI bus and chip-select pins wired to a
//! register-level model of each chip.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, ErrorKind, SpiBus};

use crate::constants::{CMD_RREG, CMD_WREG, FIELD_MASK};
use crate::sample::MAX_FRAME_LEN;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Select(usize),
    Deselect(usize),
    Command { chip: usize, opcode: u8 },
    WriteRegister { chip: usize, address: u8, value: u8 },
}

#[derive(Clone, Copy, Debug)]
enum Decode {
    Idle,
    Count { write: bool, address: u8 },
    Burst { write: bool, address: u8, remaining: usize },
}

pub struct Chip {
    pub registers: [u8; 32],
    /// Streamed on dummy bytes outside a register command
    pub frame: [u8; MAX_FRAME_LEN],
    decode: Decode,
    frame_pos: usize,
}

impl Chip {
    fn new() -> Self {
        Chip {
            registers: [0; 32],
            frame: [0; MAX_FRAME_LEN],
            decode: Decode::Idle,
            frame_pos: 0,
        }
    }

    fn reset_interface(&mut self) {
        self.decode = Decode::Idle;
        self.frame_pos = 0;
    }

    fn clock(&mut self, index: usize, byte: u8, events: &mut Vec<Event>) -> u8 {
        match self.decode {
            Decode::Idle => match byte & !FIELD_MASK {
                CMD_RREG | CMD_WREG => {
                    self.decode = Decode::Count {
                        write: byte & !FIELD_MASK == CMD_WREG,
                        address: byte & FIELD_MASK,
                    };
                    0
                }
                _ if byte == 0x00 => {
                    let out = self.frame[self.frame_pos];
                    self.frame_pos = (self.frame_pos + 1) % MAX_FRAME_LEN;
                    out
                }
                _ => {
                    events.push(Event::Command {
                        chip: index,
                        opcode: byte,
                    });
                    0
                }
            },
            Decode::Count { write, address } => {
                self.decode = Decode::Burst {
                    write,
                    address,
                    remaining: (byte & FIELD_MASK) as usize + 1,
                };
                0
            }
            Decode::Burst {
                write,
                address,
                remaining,
            } => {
                let slot = (address & FIELD_MASK) as usize;
                let out = if write {
                    self.registers[slot] = byte;
                    events.push(Event::WriteRegister {
                        chip: index,
                        address,
                        value: byte,
                    });
                    0
                } else {
                    self.registers[slot]
                };
                self.decode = if remaining > 1 {
                    Decode::Burst {
                        write,
                        address: address.wrapping_add(1),
                        remaining: remaining - 1,
                    }
                } else {
                    Decode::Idle
                };
                out
            }
        }
    }
}

pub struct Bench {
    pub events: Vec<Event>,
    pub chips: Vec<Chip>,
    /// Set if two chip selects were ever low together
    pub overlap: bool,
    /// Bus operations that succeed before the next one fails
    pub fail_after: Option<usize>,
    low: Vec<bool>,
}

impl Bench {
    fn check_failure(&mut self) -> Result<(), ErrorKind> {
        match self.fail_after {
            Some(0) => {
                self.fail_after = None;
                Err(ErrorKind::Other)
            }
            Some(n) => {
                self.fail_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn clock(&mut self, byte: u8) -> u8 {
        match self.low.iter().position(|&low| low) {
            Some(index) => self.chips[index].clock(index, byte, &mut self.events),
            // Nothing drives MISO
            None => 0xFF,
        }
    }

    fn set_low(&mut self, index: usize) {
        if self.low.iter().enumerate().any(|(i, &low)| low && i != index) {
            self.overlap = true;
        }
        self.low[index] = true;
        self.chips[index].reset_interface();
        self.events.push(Event::Select(index));
    }

    fn set_high(&mut self, index: usize) {
        self.low[index] = false;
        self.events.push(Event::Deselect(index));
    }
}

pub type SharedBench = Rc<RefCell<Bench>>;

pub struct FakeBus(SharedBench);

impl spi::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl SpiBus<u8> for FakeBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut bench = self.0.borrow_mut();
        bench.check_failure()?;
        for word in words.iter_mut() {
            *word = bench.clock(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut bench = self.0.borrow_mut();
        bench.check_failure()?;
        for &word in words {
            bench.clock(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut bench = self.0.borrow_mut();
        bench.check_failure()?;
        for i in 0..read.len().max(write.len()) {
            let response = bench.clock(write.get(i).copied().unwrap_or(0x00));
            if let Some(slot) = read.get_mut(i) {
                *slot = response;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut bench = self.0.borrow_mut();
        bench.check_failure()?;
        for word in words.iter_mut() {
            *word = bench.clock(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct FakePin {
    index: usize,
    bench: SharedBench,
}

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bench.borrow_mut().set_low(self.index);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bench.borrow_mut().set_high(self.index);
        Ok(())
    }
}

/// Bench with `N` chips, plus the bus and chip-select pins wired to it
pub fn rig<const N: usize>() -> (SharedBench, FakeBus, [FakePin; N]) {
    let bench = Rc::new(RefCell::new(Bench {
        events: Vec::new(),
        chips: (0..N).map(|_| Chip::new()).collect(),
        overlap: false,
        fail_after: None,
        low: std::vec![false; N],
    }));
    let pins = core::array::from_fn(|index| FakePin {
        index,
        bench: bench.clone(),
    });
    (bench.clone(), FakeBus(bench), pins)
}
