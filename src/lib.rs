pub mod emulator;
pub mod error;
pub mod hardware;
mod io;

pub use crate::emulator::{GameBoy, TickOutcome};
pub use crate::error::CoreError;
pub use crate::io::bootrom::BootRom;
pub use crate::io::joypad::InputKey;

/// Wraps the options needed to construct a [`GameBoy`], following the builder
/// pattern used throughout the rest of this crate for multi-field setup.
#[derive(Debug, Default)]
pub struct EmulatorOptions {
    pub boot_rom: Option<BootRom>,
    pub color_mode: bool,
}

#[derive(Debug, Default)]
pub struct EmulatorOptionsBuilder {
    boot_rom: Option<BootRom>,
    color_mode: bool,
}

impl EmulatorOptionsBuilder {
    pub fn new() -> Self {
        EmulatorOptionsBuilder::default()
    }

    pub fn boot_rom(mut self, boot_rom: Option<BootRom>) -> Self {
        self.boot_rom = boot_rom;
        self
    }

    pub fn color_mode(mut self, color_mode: bool) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn build(self) -> EmulatorOptions {
        EmulatorOptions {
            boot_rom: self.boot_rom,
            color_mode: self.color_mode,
        }
    }
}

impl From<EmulatorOptions> for EmulatorOptionsBuilder {
    fn from(from: EmulatorOptions) -> Self {
        EmulatorOptionsBuilder {
            boot_rom: from.boot_rom,
            color_mode: from.color_mode,
        }
    }
}

impl GameBoy {
    /// Construct from a pre-built [`EmulatorOptions`], loading `rom` as the cartridge.
    pub fn with_options(rom: Vec<u8>, options: EmulatorOptions) -> Result<Self, CoreError> {
        GameBoy::new(rom, options.boot_rom, options.color_mode)
    }
}
