pub mod header;
pub mod mbc;

use crate::error::CoreError;
use crate::hardware::cartridge::header::{CartridgeHeader, CartridgeType};
use crate::hardware::cartridge::mbc::{Mbc, Mbc0, Mbc1};
use crate::hardware::cartridge::mbc::{EXTERNAL_RAM_END, EXTERNAL_RAM_START};

#[derive(Debug)]
pub struct Cartridge {
    pub header: CartridgeHeader,
    mbc: Box<dyn Mbc>,
}

impl Cartridge {
    pub fn load(rom: Vec<u8>) -> Result<Self, CoreError> {
        let header = CartridgeHeader::new(&rom)?;
        log::info!(
            "loaded cartridge \"{}\": type={:?} rom={}KiB ram={}KiB",
            header.title,
            header.cartridge_type,
            header.rom_size / 1024,
            header.ram_size / 1024,
        );

        let ram_size = header.ram_size;
        let mbc: Box<dyn Mbc> = match header.cartridge_type {
            CartridgeType::RomOnly | CartridgeType::RomRam | CartridgeType::RomRamBattery => {
                Box::new(Mbc0::new(rom, ram_size))
            }
            CartridgeType::Mbc1 | CartridgeType::Mbc1Ram | CartridgeType::Mbc1RamBattery => {
                Box::new(Mbc1::new(rom, ram_size))
            }
        };

        Ok(Cartridge { header, mbc })
    }

    pub fn read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x7FFF => self.mbc.read_rom(address),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.mbc.read_ram(address),
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x7FFF => self.mbc.write_rom(address, value),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.mbc.write_ram(address, value),
            _ => {}
        }
    }
}
