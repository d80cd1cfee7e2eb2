//! `GameBoy` is the top-level clock: it owns the CPU (which in turn owns the bus)
//! and advances every subsystem by exactly one M-cycle per `tick()` call, in the
//! fixed order the hardware itself runs them: timer, then PPU, then CPU.

use crate::error::CoreError;
use crate::hardware::bus::Bus;
use crate::hardware::cartridge::Cartridge;
use crate::hardware::cpu::CPU;
use crate::io::bootrom::BootRom;
use crate::io::joypad::InputKey;

/// What the caller should do after a `tick()`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// The PPU just wrapped back to line 0; the frame buffer is ready to present.
    pub frame_complete: bool,
}

pub struct GameBoy {
    cpu: CPU<Bus>,
}

impl GameBoy {
    /// Load `rom` and start emulation. If `boot_rom` is `None` the CPU's registers
    /// are initialised directly to their post-boot state instead of running one.
    pub fn new(rom: Vec<u8>, boot_rom: Option<BootRom>, color_mode: bool) -> Result<Self, CoreError> {
        let cartridge = Cartridge::load(rom)?;
        let had_boot_rom = boot_rom.is_some();
        let bus = Bus::new(cartridge, boot_rom.unwrap_or_else(BootRom::disabled));
        let mut cpu = CPU::new(bus);
        cpu.mmu.ppu.set_color_mode(color_mode);

        if !had_boot_rom {
            cpu.skip_boot_rom();
        }

        Ok(GameBoy { cpu })
    }

    /// Advance by one machine cycle: timer, then PPU, then the CPU.
    pub fn tick(&mut self) -> Result<TickOutcome, CoreError> {
        if let Some(interrupt) = self.cpu.mmu.timer.tick() {
            self.cpu.mmu.interrupts.request(interrupt);
        }

        let ppu_tick = self.cpu.mmu.ppu.tick();
        for interrupt in ppu_tick.interrupts {
            self.cpu.mmu.interrupts.request(interrupt);
        }
        if ppu_tick.entered_hblank {
            self.cpu.mmu.run_hblank_dma_chunk();
        }
        self.cpu.mmu.tick_dma();

        self.cpu.execute_cycle()?;

        Ok(TickOutcome {
            frame_complete: ppu_tick.frame_complete,
        })
    }

    /// Advance until the next frame is complete, returning its frame buffer.
    pub fn tick_frame(&mut self) -> Result<&[u8], CoreError> {
        loop {
            if self.tick()?.frame_complete {
                return Ok(self.frame_buffer());
            }
        }
    }

    pub fn frame_buffer(&self) -> &[u8] {
        self.cpu.mmu.ppu.frame_buffer()
    }

    pub fn press_key(&mut self, key: InputKey) {
        self.cpu.mmu.press_key(key);
    }

    pub fn release_key(&mut self, key: InputKey) {
        self.cpu.mmu.release_key(key);
    }

    pub fn cycles_performed(&self) -> u128 {
        self.cpu.cycles_performed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_rom() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        let checksum = rom[0x134..=0x14C]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));
        rom[0x14D] = checksum;
        rom
    }

    #[test]
    fn test_new_without_boot_rom_skips_straight_to_cartridge_code() {
        let gb = GameBoy::new(minimal_rom(), None, false).unwrap();
        assert_eq!(gb.cycles_performed(), 0);
    }

    #[test]
    fn test_tick_advances_cycle_counter_by_one_m_cycle() {
        let mut gb = GameBoy::new(minimal_rom(), None, false).unwrap();
        gb.tick().unwrap();
        assert_eq!(gb.cycles_performed(), 4);
    }

    #[test]
    fn test_illegal_opcode_surfaces_as_error() {
        let mut rom = minimal_rom();
        rom[0x100] = 0xD3; // illegal opcode
        let mut gb = GameBoy::new(rom, None, false).unwrap();
        let result = gb.tick();
        assert!(matches!(result, Err(CoreError::IllegalOpcode(0xD3))));
    }

    #[test]
    fn test_frame_completes_after_one_full_frame_of_ticks() {
        let mut gb = GameBoy::new(minimal_rom(), None, false).unwrap();
        let mut frame_complete = false;
        for _ in 0..17556 {
            if gb.tick().unwrap().frame_complete {
                frame_complete = true;
            }
        }
        assert!(frame_complete);
    }
}
