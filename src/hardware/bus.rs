//! The memory bus: address decoding, boot-ROM overlay, WRAM/HRAM, and the glue between
//! the peripherals the CPU can't reach directly.

use std::fmt::Debug;

use crate::hardware::cartridge::mbc::{EXTERNAL_RAM_END, EXTERNAL_RAM_START};
use crate::hardware::cartridge::Cartridge;
use crate::hardware::ppu::Ppu;
use crate::io::bootrom::BootRom;
use crate::io::interrupts::InterruptController;
use crate::io::joypad::{interrupt_for_press, Joypad};
use crate::io::timer::Timer;

pub const ROM_BANK_NN_START: u16 = 0x4000;
pub const VRAM_START: u16 = 0x8000;
pub const VRAM_END: u16 = 0x9FFF;
pub const WRAM_START: u16 = 0xC000;
pub const WRAM_END: u16 = 0xDFFF;
pub const ECHO_START: u16 = 0xE000;
pub const ECHO_END: u16 = 0xFDFF;
pub const ECHO_OFFSET: u16 = 0x2000;
pub const OAM_START: u16 = 0xFE00;
pub const OAM_END: u16 = 0xFE9F;
pub const NOT_USABLE_START: u16 = 0xFEA0;
pub const NOT_USABLE_END: u16 = 0xFEFF;
pub const JOYPAD_REGISTER: u16 = 0xFF00;
pub const SERIAL_DATA: u16 = 0xFF01;
pub const SERIAL_CONTROL: u16 = 0xFF02;
pub const DIVIDER_REGISTER: u16 = 0xFF04;
pub const TIMER_COUNTER: u16 = 0xFF05;
pub const TIMER_MODULO: u16 = 0xFF06;
pub const TIMER_CONTROL: u16 = 0xFF07;
pub const INTERRUPT_FLAG: u16 = 0xFF0F;
pub const PPU_CONTROL_START: u16 = 0xFF40;
pub const PPU_CONTROL_END: u16 = 0xFF4B;
pub const VRAM_BANK_SELECT: u16 = 0xFF4F;
pub const BOOTROM_CONTROL: u16 = 0xFF50;
pub const HDMA_START: u16 = 0xFF51;
pub const HDMA_END: u16 = 0xFF55;
pub const CGB_PALETTE_START: u16 = 0xFF68;
pub const CGB_PALETTE_END: u16 = 0xFF6B;
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_END: u16 = 0xFFFE;
pub const INTERRUPT_ENABLE: u16 = 0xFFFF;
pub const INVALID_READ: u8 = 0xFF;
pub const OAM_DMA_REGISTER: u16 = 0xFF46;
const OAM_DMA_CYCLES: u8 = 160;

#[derive(Debug)]
struct OamDma {
    source_base: u16,
    progress: u8,
}

/// The CPU's view of the rest of the system: a byte-addressable store plus the
/// interrupt controller it needs direct access to for ISR dispatch.
pub trait MemoryMapper: Debug {
    fn read_byte(&self, address: u16) -> u8;
    fn write_byte(&mut self, address: u16, value: u8);
    fn interrupts(&self) -> &InterruptController;
    fn interrupts_mut(&mut self) -> &mut InterruptController;
}

#[derive(Debug)]
pub struct Bus {
    cartridge: Cartridge,
    bootrom: BootRom,
    pub ppu: Ppu,
    pub timer: Timer,
    pub interrupts: InterruptController,
    pub joypad: Joypad,
    wram: Vec<u8>,
    hram: [u8; (HRAM_END - HRAM_START + 1) as usize],
    /// Bytes written to the serial data register, retained for host inspection
    /// (link-cable emulation itself is out of scope).
    pub serial_out: Vec<u8>,
    oam_dma: Option<OamDma>,
}

impl Bus {
    pub fn new(cartridge: Cartridge, bootrom: BootRom) -> Self {
        Bus {
            cartridge,
            bootrom,
            ppu: Ppu::new(),
            timer: Timer::new(),
            interrupts: InterruptController::new(),
            joypad: Joypad::new(),
            wram: vec![0; (WRAM_END - WRAM_START + 1) as usize],
            hram: [0; (HRAM_END - HRAM_START + 1) as usize],
            serial_out: Vec::new(),
            oam_dma: None,
        }
    }

    pub fn bootrom_active(&self) -> bool {
        self.bootrom.is_active()
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    fn raw_read(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x7FFF => self.cartridge.read(address),
            VRAM_START..=VRAM_END => self.ppu.read_vram(address),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.cartridge.read(address),
            WRAM_START..=WRAM_END => self.wram[(address - WRAM_START) as usize],
            ECHO_START..=ECHO_END => self.wram[(address - ECHO_START) as usize],
            HRAM_START..=HRAM_END => self.hram[(address - HRAM_START) as usize],
            _ => INVALID_READ,
        }
    }

    /// One M-cycle of in-flight OAM DMA, copying a single byte; called from the
    /// top-level tick loop alongside the timer and PPU.
    pub fn tick_dma(&mut self) {
        if let Some(dma) = &self.oam_dma {
            let offset = dma.progress;
            let source = dma.source_base;
            let byte = self.raw_read(source.wrapping_add(offset as u16));
            self.ppu.write_oam_raw(offset, byte);
            let dma = self.oam_dma.as_mut().unwrap();
            dma.progress += 1;
            if dma.progress >= OAM_DMA_CYCLES {
                self.oam_dma = None;
            }
        }
    }

    fn start_oam_dma(&mut self, value: u8) {
        self.oam_dma = Some(OamDma {
            source_base: (value as u16) << 8,
            progress: 0,
        });
    }

    /// Run color-mode general-purpose DMA (FF55 write with bit 7 clear): an
    /// immediate blocking copy of the whole requested length.
    fn run_general_dma(&mut self) {
        let (source, len) = self.ppu.general_dma_source_range();
        let bytes: Vec<u8> = (0..len as u16)
            .map(|i| self.raw_read(source.wrapping_add(i)))
            .collect();
        self.ppu.run_general_dma(&bytes);
    }

    /// Copy one HBlank DMA chunk; called once per `entered_hblank` PPU tick signal.
    pub fn run_hblank_dma_chunk(&mut self) {
        if !self.ppu.hblank_dma_armed() {
            return;
        }
        let source = self.ppu.hblank_dma_chunk_source();
        let mut bytes = [0u8; 16];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.raw_read(source.wrapping_add(i as u16));
        }
        self.ppu.run_hblank_dma_chunk(&bytes);
    }
}

impl MemoryMapper for Bus {
    fn read_byte(&self, address: u16) -> u8 {
        if self.bootrom.is_active() && self.bootrom.contains(address) {
            return self.bootrom.read_byte(address);
        }

        match address {
            0x0000..=0x7FFF => self.cartridge.read(address),
            VRAM_START..=VRAM_END => self.ppu.read_vram(address),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.cartridge.read(address),
            WRAM_START..=WRAM_END => self.wram[(address - WRAM_START) as usize],
            ECHO_START..=ECHO_END => self.wram[(address - ECHO_START) as usize],
            OAM_START..=OAM_END => {
                if self.oam_dma.is_some() {
                    INVALID_READ
                } else {
                    self.ppu.read_oam(address)
                }
            }
            NOT_USABLE_START..=NOT_USABLE_END => INVALID_READ,
            JOYPAD_REGISTER => self.joypad.read_register(),
            SERIAL_DATA | SERIAL_CONTROL => INVALID_READ,
            DIVIDER_REGISTER => self.timer.read_div(),
            TIMER_COUNTER => self.timer.read_tima(),
            TIMER_MODULO => self.timer.tma,
            TIMER_CONTROL => self.timer.read_tac(),
            INTERRUPT_FLAG => self.interrupts.flags.bits() | 0xE0,
            OAM_DMA_REGISTER => INVALID_READ,
            PPU_CONTROL_START..=PPU_CONTROL_END => self.ppu.read_register(address),
            VRAM_BANK_SELECT => self.ppu.read_vbk(),
            BOOTROM_CONTROL => INVALID_READ,
            HDMA_START..=HDMA_END => self.ppu.read_hdma(address),
            CGB_PALETTE_START..=CGB_PALETTE_END => self.ppu.read_cgb_palette(address),
            HRAM_START..=HRAM_END => self.hram[(address - HRAM_START) as usize],
            INTERRUPT_ENABLE => self.interrupts.enable.bits(),
            _ => {
                log::warn!("unmapped bus read at {:#06x}", address);
                INVALID_READ
            }
        }
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        match address {
            0x0000..=0x7FFF => self.cartridge.write(address, value),
            VRAM_START..=VRAM_END => self.ppu.write_vram(address, value),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.cartridge.write(address, value),
            WRAM_START..=WRAM_END => self.wram[(address - WRAM_START) as usize] = value,
            ECHO_START..=ECHO_END => self.wram[(address - ECHO_START) as usize] = value,
            OAM_START..=OAM_END => {
                if self.oam_dma.is_none() {
                    self.ppu.write_oam(address, value)
                }
            }
            NOT_USABLE_START..=NOT_USABLE_END => {}
            JOYPAD_REGISTER => self.joypad.write_register(value),
            SERIAL_DATA => self.serial_out.push(value),
            SERIAL_CONTROL => {}
            DIVIDER_REGISTER => self.timer.write_div(),
            TIMER_COUNTER => self.timer.write_tima(value),
            TIMER_MODULO => self.timer.write_tma(value),
            TIMER_CONTROL => self.timer.write_tac(value),
            INTERRUPT_FLAG => {
                self.interrupts.flags =
                    crate::io::interrupts::InterruptFlags::from_bits_truncate(value)
            }
            OAM_DMA_REGISTER => self.start_oam_dma(value),
            PPU_CONTROL_START..=PPU_CONTROL_END => self.ppu.write_register(address, value),
            VRAM_BANK_SELECT => self.ppu.write_vbk(value),
            BOOTROM_CONTROL => {
                log::info!("boot ROM disable requested (value={:#04x})", value);
                self.bootrom.write_control(value);
            }
            HDMA_START..=HDMA_END => {
                self.ppu.write_hdma(address, value);
                if address == HDMA_END && value & 0x80 == 0 {
                    self.run_general_dma();
                }
            }
            CGB_PALETTE_START..=CGB_PALETTE_END => self.ppu.write_cgb_palette(address, value),
            HRAM_START..=HRAM_END => self.hram[(address - HRAM_START) as usize] = value,
            INTERRUPT_ENABLE => {
                self.interrupts.enable =
                    crate::io::interrupts::InterruptFlags::from_bits_truncate(value)
            }
            _ => log::warn!("unmapped bus write at {:#06x} (value={:#04x})", address, value),
        }
    }

    fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}

impl Bus {
    /// Press a button, raising the Joypad interrupt on a fresh selected edge.
    pub fn press_key(&mut self, key: crate::io::joypad::InputKey) {
        let raised = self.joypad.press_key(key);
        if let Some(interrupt) = interrupt_for_press(raised) {
            self.interrupts.request(interrupt);
        }
    }

    pub fn release_key(&mut self, key: crate::io::joypad::InputKey) {
        self.joypad.release_key(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cartridge() -> Cartridge {
        let mut rom = vec![0u8; 0x8000];
        let checksum = rom[0x134..=0x14C]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        rom[0x14D] = checksum;
        Cartridge::load(rom).unwrap()
    }

    #[test]
    fn test_wram_round_trip() {
        let mut bus = Bus::new(test_cartridge(), BootRom::disabled());
        bus.write_byte(0xC010, 0x42);
        assert_eq!(bus.read_byte(0xC010), 0x42);
    }

    #[test]
    fn test_echo_mirrors_wram() {
        let mut bus = Bus::new(test_cartridge(), BootRom::disabled());
        bus.write_byte(0xC010, 0x55);
        assert_eq!(bus.read_byte(0xE010), 0x55);
    }

    #[test]
    fn test_unmapped_read_returns_ff() {
        let bus = Bus::new(test_cartridge(), BootRom::disabled());
        assert_eq!(bus.read_byte(0xFEA0), 0xFF);
    }

    #[test]
    fn test_bootrom_overlay_then_disable() {
        let mut rom = vec![0u8; 0x100];
        rom[0] = 0xAB;
        let mut bus = Bus::new(test_cartridge(), BootRom::new(rom).unwrap());
        assert_eq!(bus.read_byte(0x0000), 0xAB);
        bus.write_byte(BOOTROM_CONTROL, 1);
        assert_eq!(bus.read_byte(0x0000), 0x00);
    }
}
