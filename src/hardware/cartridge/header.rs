use bitflags::_core::str::from_utf8;

use crate::error::CoreError;

pub const HEADER_START: u16 = 0x0100;
pub const HEADER_END: u16 = 0x014F;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CartridgeType {
    RomOnly,
    Mbc1,
    Mbc1Ram,
    Mbc1RamBattery,
    RomRam,
    RomRamBattery,
}

impl CartridgeType {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(CartridgeType::RomOnly),
            0x01 => Some(CartridgeType::Mbc1),
            0x02 => Some(CartridgeType::Mbc1Ram),
            0x03 => Some(CartridgeType::Mbc1RamBattery),
            0x08 => Some(CartridgeType::RomRam),
            0x09 => Some(CartridgeType::RomRamBattery),
            _ => None,
        }
    }

    pub fn has_ram(self) -> bool {
        matches!(
            self,
            CartridgeType::Mbc1Ram
                | CartridgeType::Mbc1RamBattery
                | CartridgeType::RomRam
                | CartridgeType::RomRamBattery
        )
    }
}

/// 32 KiB << N, N being the header's ROM size code.
fn rom_size_bytes(code: u8) -> usize {
    0x8000usize << code
}

/// Header RAM size codes aren't a clean power-of-two progression (3 and 4 are swapped
/// relative to ROM size codes), so this is a table rather than a shift.
fn ram_size_bytes(code: u8) -> usize {
    match code {
        0x00 => 0,
        0x01 => 2 * 1024,
        0x02 => 8 * 1024,
        0x03 => 32 * 1024,
        0x04 => 128 * 1024,
        0x05 => 64 * 1024,
        _ => 0,
    }
}

/// Sum of bytes 0x134..0x14D, each folded in as `x = x - byte - 1`; the header is valid
/// iff this equals the byte stored at 0x14D.
fn compute_header_checksum(rom: &[u8]) -> u8 {
    rom[0x134..=0x14C]
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_sub(byte).wrapping_sub(1))
}

#[derive(Debug)]
pub struct CartridgeHeader {
    /// Upper case ASCII, 16 characters in DMG, zero filled if less than that.
    /// In CGB it's either 15 or 11 characters instead.
    pub title: String,
    /// In DMG this is still part of the title bytes, in CGB it contains a flag for determining
    /// the relevant mode.
    pub cgb_flag: bool,
    /// Two character ASCII code, this one is for newer games only. Older games use the other header.
    pub new_licensee_code: u16,
    /// Specifies whether the game supports SGB functions.
    pub sgb_flag: bool,
    /// Which Memory Bank Controller (if any) is used in the cartridge.
    pub cartridge_type: CartridgeType,
    /// Size of the ROM in bytes, decoded from the header's size code.
    pub rom_size: usize,
    /// Size of the external RAM in bytes (if any), decoded from the header's size code.
    pub ram_size: usize,
    /// Specifies if this version of the game is supposed to be sold in Japan,
    /// or anywhere else. Only two values are defined.
    pub is_japanese: bool,
    /// Specifies the games company/publisher code in range 00-FFh.
    /// A value of 0x33 signalizes that the New License Code in header bytes 0144-0145 is used instead.
    pub old_licensee_code: u8,
    /// Specifies the version number of the game. That is usually 0x00.
    pub mask_rom_version_number: u8,
    /// Contains an 8 bit checksum across the cartridge header bytes 0134-014C, already
    /// validated against the computed sum by the time a `CartridgeHeader` exists.
    pub header_checksum: u8,
    /// Contains a 16 bit checksum (upper byte first) across the whole cartridge ROM.
    /// The Game Boy doesn't verify this checksum; neither does this core.
    pub global_checksum: u16,
}

impl CartridgeHeader {
    pub fn new(rom: &[u8]) -> Result<Self, CoreError> {
        let computed = compute_header_checksum(rom);
        let expected = read_header_checksum(rom);
        if computed != expected {
            return Err(CoreError::HeaderChecksumMismatch { expected, computed });
        }

        let cartridge_type = CartridgeType::from_byte(read_cartridge_type(rom))
            .ok_or_else(|| CoreError::UnsupportedCartridgeType(read_cartridge_type(rom)))?;

        let rom_size = rom_size_bytes(read_rom_size(rom));
        if rom_size != rom.len() {
            return Err(CoreError::RomSizeMismatch {
                expected: rom_size,
                actual: rom.len(),
            });
        }

        let is_cgb_rom = read_cgb_flag(rom);
        Ok(CartridgeHeader {
            title: read_title(rom, is_cgb_rom),
            cgb_flag: is_cgb_rom,
            new_licensee_code: read_new_licensee(rom),
            sgb_flag: read_sgb_flag(rom),
            cartridge_type,
            rom_size,
            ram_size: ram_size_bytes(read_ram_size(rom)),
            is_japanese: read_dest_code(rom),
            old_licensee_code: read_old_licensee(rom),
            mask_rom_version_number: read_mask_rom_version(rom),
            header_checksum: expected,
            global_checksum: read_global_checksum(rom),
        })
    }
}

fn read_title(rom: &[u8], cgb_mode: bool) -> String {
    // CGB apparently varies between 11 and 15 characters, chose the pessimistic option here.
    let slice = if cgb_mode {
        &rom[0x134..=0x13E]
    } else {
        &rom[0x134..=0x143]
    };

    from_utf8(slice)
        .unwrap_or("")
        .trim_matches(char::from(0))
        .to_owned()
}

fn read_cgb_flag(rom: &[u8]) -> bool {
    matches!(rom[0x143], 0x80 | 0xC0)
}

fn read_new_licensee(rom: &[u8]) -> u16 {
    ((rom[0x144] as u16) << 8) | rom[0x145] as u16
}

fn read_sgb_flag(rom: &[u8]) -> bool {
    rom[0x146] == 0x03
}

fn read_cartridge_type(rom: &[u8]) -> u8 {
    rom[0x147]
}

fn read_rom_size(rom: &[u8]) -> u8 {
    rom[0x148]
}

fn read_ram_size(rom: &[u8]) -> u8 {
    rom[0x149]
}

fn read_dest_code(rom: &[u8]) -> bool {
    rom[0x14A] == 0x00
}

fn read_old_licensee(rom: &[u8]) -> u8 {
    rom[0x14B]
}

fn read_mask_rom_version(rom: &[u8]) -> u8 {
    rom[0x14C]
}

fn read_header_checksum(rom: &[u8]) -> u8 {
    rom[0x14D]
}

fn read_global_checksum(rom: &[u8]) -> u16 {
    ((rom[0x14E] as u16) << 8) | rom[0x14F] as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with_header(cartridge_type: u8, rom_size_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; rom_size_bytes(rom_size_code)];
        for (loc, byte) in [
            0x48u8, 0x65, 0x6c, 0x6c, 0x6f, 0x20, 0x57, 0x6f, 0x72, 0x00, 0x00,
        ]
        .iter()
        .enumerate()
        {
            rom[0x134 + loc] = *byte;
        }
        rom[0x147] = cartridge_type;
        rom[0x148] = rom_size_code;
        rom[0x14D] = compute_header_checksum(&rom);
        rom
    }

    #[test]
    fn test_read_title() {
        let rom = rom_with_header(0x00, 0);
        assert_eq!("Hello Wor", read_title(&rom, false));
    }

    #[test]
    fn test_valid_header_parses() {
        let rom = rom_with_header(0x01, 0);
        let header = CartridgeHeader::new(&rom).unwrap();
        assert_eq!(header.cartridge_type, CartridgeType::Mbc1);
        assert_eq!(header.rom_size, 0x8000);
    }

    #[test]
    fn test_checksum_mismatch_is_rejected() {
        let mut rom = rom_with_header(0x00, 0);
        rom[0x14D] ^= 0xFF;
        assert!(matches!(
            CartridgeHeader::new(&rom),
            Err(CoreError::HeaderChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_cartridge_type_is_rejected() {
        let rom = rom_with_header(0xFF, 0);
        assert!(matches!(
            CartridgeHeader::new(&rom),
            Err(CoreError::UnsupportedCartridgeType(0xFF))
        ));
    }

    #[test]
    fn test_rom_size_mismatch_is_rejected() {
        let mut rom = rom_with_header(0x00, 0);
        rom.truncate(rom.len() - 1);
        // Recompute checksum over the truncated (but header-bytes-intact) image.
        let checksum = compute_header_checksum(&rom);
        rom[0x14D] = checksum;
        assert!(matches!(
            CartridgeHeader::new(&rom),
            Err(CoreError::RomSizeMismatch { .. })
        ));
    }
}
