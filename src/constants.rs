/// ADS1x9x SPI commands
pub const CMD_WAKEUP: u8 = 0x02;
pub const CMD_STANDBY: u8 = 0x04;
pub const CMD_RESET: u8 = 0x06;
pub const CMD_START: u8 = 0x08;
pub const CMD_STOP: u8 = 0x0A;
pub const CMD_RDATAC: u8 = 0x10;
pub const CMD_SDATAC: u8 = 0x11;
pub const CMD_RDATA: u8 = 0x12;
pub const CMD_RREG: u8 = 0x20;
pub const CMD_WREG: u8 = 0x40;

/// Register addresses and burst counts share a 5-bit field
pub const FIELD_MASK: u8 = 0x1F;

/// Longest register burst a single command can describe
pub const MAX_BURST: usize = 32;

/// ADS1x9x registers
pub const REG_ID: u8 = 0x00;
pub const REG_CONFIG1: u8 = 0x01;
pub const REG_CONFIG2: u8 = 0x02;
pub const REG_CONFIG3: u8 = 0x03;
pub const REG_LOFF: u8 = 0x04;
pub const REG_CH1SET: u8 = 0x05;
pub const REG_CH2SET: u8 = 0x06;
pub const REG_CH3SET: u8 = 0x07;
pub const REG_CH4SET: u8 = 0x08;
pub const REG_RLD_SENSP: u8 = 0x0D;
pub const REG_RLD_SENSN: u8 = 0x0E;
pub const REG_LOFF_SENSP: u8 = 0x0F;
pub const REG_LOFF_SENSN: u8 = 0x10;
pub const REG_LOFF_FLIP: u8 = 0x11;
pub const REG_LOFF_STATP: u8 = 0x12;
pub const REG_LOFF_STATN: u8 = 0x13;
pub const REG_GPIO: u8 = 0x14;
pub const REG_PACE: u8 = 0x15;
pub const REG_CONFIG4: u8 = 0x17;

/// Registers from ID through CONFIG4
pub const REGISTER_FILE_LEN: usize = REG_CONFIG4 as usize + 1;

/// Registers reported by `dump_registers`, in address order
pub const REGISTER_NAMES: [(u8, &str); 19] = [
    (REG_ID, "ID"),
    (REG_CONFIG1, "CONFIG1"),
    (REG_CONFIG2, "CONFIG2"),
    (REG_CONFIG3, "CONFIG3"),
    (REG_LOFF, "LOFF"),
    (REG_CH1SET, "CH1SET"),
    (REG_CH2SET, "CH2SET"),
    (REG_CH3SET, "CH3SET"),
    (REG_CH4SET, "CH4SET"),
    (REG_RLD_SENSP, "RLD_SENSP"),
    (REG_RLD_SENSN, "RLD_SENSN"),
    (REG_LOFF_SENSP, "LOFF_SENSP"),
    (REG_LOFF_SENSN, "LOFF_SENSN"),
    (REG_LOFF_FLIP, "LOFF_FLIP"),
    (REG_LOFF_STATP, "LOFF_STATP"),
    (REG_LOFF_STATN, "LOFF_STATN"),
    (REG_GPIO, "GPIO"),
    (REG_PACE, "PACE"),
    (REG_CONFIG4, "CONFIG4"),
];

/// Single-byte commands understood by every member of the family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Wakeup = CMD_WAKEUP as isize,
    Standby = CMD_STANDBY as isize,
    Reset = CMD_RESET as isize,
    Start = CMD_START as isize,
    Stop = CMD_STOP as isize,
    /// Enter continuous data mode
    Rdatac = CMD_RDATAC as isize,
    /// Leave continuous data mode; registers can only be accessed after this
    Sdatac = CMD_SDATAC as isize,
    Rdata = CMD_RDATA as isize,
}

impl Command {
    pub fn opcode(self) -> u8 {
        self as u8
    }
}
