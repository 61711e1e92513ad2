// Commands are sent verbatim; the sensor firmware rejects anything that is not byte-exact.

/// Requests a gas concentration reading. The sensor answers with one 9-byte frame.
pub const MHZ19_CMD_READ: [u8; 9] = [0xFF, 0x01, 0x86, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79];

/// Zero-point calibration ("reset to zero"). No response.
pub const MHZ19_CMD_RESET: [u8; 9] = [0xFF, 0x01, 0x87, 0x00, 0x00, 0x00, 0x00, 0x00, 0x78];

/// Turns off automatic baseline correction. No response.
pub const MHZ19_CMD_DISABLE_ABC: [u8; 9] = [0xFF, 0x01, 0x79, 0x00, 0x00, 0x00, 0x00, 0x00, 0x86];

/// A command understood by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read CO2 concentration and temperature.
    Read,
    /// Zero-point calibration.
    Reset,
    /// Disable automatic baseline correction (ABC).
    DisableAutoBaselineCorrection,
}

impl Command {
    /// Every command, in declaration order.
    pub const ALL: [Command; 3] = [
        Command::Read,
        Command::Reset,
        Command::DisableAutoBaselineCorrection,
    ];

    /// The fixed frame sent on the wire for this command.
    #[inline]
    pub fn bytes(&self) -> &'static [u8; 9] {
        match self {
            Command::Read => &MHZ19_CMD_READ,
            Command::Reset => &MHZ19_CMD_RESET,
            Command::DisableAutoBaselineCorrection => &MHZ19_CMD_DISABLE_ABC,
        }
    }
}
