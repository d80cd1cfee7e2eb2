//! The core's typed error taxonomy. Fatal conditions (bad header, illegal opcode,
//! I/O failure) surface here instead of panicking; recoverable conditions
//! (unmapped bus access) are logged and handled in place rather than modeled as errors.

use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    /// Decoding hit a byte with no assigned instruction.
    IllegalOpcode(u8),
    /// The header checksum at 0x14D didn't match the computed sum over 0x134..0x14D.
    HeaderChecksumMismatch { expected: u8, computed: u8 },
    /// The cartridge type byte at 0x147 isn't one this core supports.
    UnsupportedCartridgeType(u8),
    /// The ROM size implied by the header's size code doesn't match the actual image length.
    RomSizeMismatch { expected: usize, actual: usize },
    /// I/O failure loading a boot ROM or cartridge image.
    IoErr(std::io::Error),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::IllegalOpcode(opcode) => {
                write!(f, "illegal opcode 0x{:02X}", opcode)
            }
            CoreError::HeaderChecksumMismatch { expected, computed } => write!(
                f,
                "cartridge header checksum mismatch: expected 0x{:02X}, computed 0x{:02X}",
                expected, computed
            ),
            CoreError::UnsupportedCartridgeType(byte) => {
                write!(f, "unsupported cartridge type 0x{:02X}", byte)
            }
            CoreError::RomSizeMismatch { expected, actual } => write!(
                f,
                "ROM size mismatch: header declares {} bytes, image is {} bytes",
                expected, actual
            ),
            CoreError::IoErr(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::IoErr(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::IoErr(err)
    }
}
