//! Boot ROM overlay, modeled as an active-flag gated window rather than as a patch
//! applied to the cartridge image: disabling it is a single flag flip (0xFF50 write).

/// Monochrome boot ROMs are exactly this size and cover only 0x0000-0x00FF.
pub const MONO_BOOTROM_SIZE: usize = 0x100;
/// Color boot ROMs are a single contiguous image covering 0x0000-0x00FF and, after a
/// gap reserved for the cartridge header, 0x0200-0x08FF.
pub const COLOR_BOOTROM_SIZE: usize = 0x900;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BootRomKind {
    Monochrome,
    Color,
}

#[derive(Debug, Clone)]
pub struct BootRom {
    active: bool,
    kind: BootRomKind,
    data: Vec<u8>,
}

impl BootRom {
    /// `data` must be exactly [`MONO_BOOTROM_SIZE`] or [`COLOR_BOOTROM_SIZE`] bytes;
    /// the kind is inferred from its length.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        let kind = match data.len() {
            MONO_BOOTROM_SIZE => BootRomKind::Monochrome,
            COLOR_BOOTROM_SIZE => BootRomKind::Color,
            _ => return None,
        };
        Some(Self {
            active: true,
            kind,
            data,
        })
    }

    /// An already-disabled overlay with no backing image, used when no boot ROM was
    /// supplied: every address falls straight through to the cartridge.
    pub fn disabled() -> Self {
        Self {
            active: false,
            kind: BootRomKind::Monochrome,
            data: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Write to 0xFF50: any non-zero value disables the overlay permanently.
    pub fn write_control(&mut self, value: u8) {
        if value != 0 {
            self.active = false;
        }
    }

    /// Whether `address` falls within the overlay's window for its kind.
    pub fn contains(&self, address: u16) -> bool {
        match self.kind {
            BootRomKind::Monochrome => address < MONO_BOOTROM_SIZE as u16,
            BootRomKind::Color => {
                address < MONO_BOOTROM_SIZE as u16 || (0x0200..=0x08FF).contains(&address)
            }
        }
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        self.data[address as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_window_excludes_header_gap() {
        let rom = BootRom::new(vec![0; MONO_BOOTROM_SIZE]).unwrap();
        assert!(rom.contains(0x00FF));
        assert!(!rom.contains(0x0200));
    }

    #[test]
    fn test_color_window_includes_second_range() {
        let rom = BootRom::new(vec![0; COLOR_BOOTROM_SIZE]).unwrap();
        assert!(rom.contains(0x0050));
        assert!(rom.contains(0x0300));
        assert!(!rom.contains(0x0150));
    }

    #[test]
    fn test_nonzero_write_disables() {
        let mut rom = BootRom::new(vec![0; MONO_BOOTROM_SIZE]).unwrap();
        assert!(rom.is_active());
        rom.write_control(0);
        assert!(rom.is_active());
        rom.write_control(1);
        assert!(!rom.is_active());
    }

    #[test]
    fn test_disabled_has_no_window() {
        let rom = BootRom::disabled();
        assert!(!rom.is_active());
        // `contains` alone is just window membership; callers (the bus) gate on
        // `is_active()` too, which is what actually keeps a disabled overlay inert.
        assert!(!(rom.is_active() && rom.contains(0x0000)));
    }
}
