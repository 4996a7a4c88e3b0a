//! Command framing for register access.
//!
//! Every register command is two bytes: the opcode with the 5-bit start
//! address folded in, then the number of registers minus one. Address bits
//! above bit 4 are dropped, never carried into the opcode.

use crate::constants::{CMD_RREG, CMD_WREG, FIELD_MASK, MAX_BURST};

/// Header for reading `count` registers starting at `address`.
///
/// `count` must be in `1..=32`; the driver checks this before framing.
pub fn read_command(address: u8, count: usize) -> [u8; 2] {
    [CMD_RREG | (address & FIELD_MASK), count_field(count)]
}

/// Header for writing `count` registers starting at `address`
pub fn write_command(address: u8, count: usize) -> [u8; 2] {
    [CMD_WREG | (address & FIELD_MASK), count_field(count)]
}

pub fn valid_count(count: usize) -> bool {
    (1..=MAX_BURST).contains(&count)
}

fn count_field(count: usize) -> u8 {
    (count.wrapping_sub(1) as u8) & FIELD_MASK
}
