//! The interrupt controller: pending/enable bitmasks and priority resolution.

use bitflags::*;

/// The five interrupt sources, in priority order (lowest variant wins when more than
/// one is pending).
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum Interrupt {
    VBlank = 0b0000_0001,
    LcdStat = 0b0000_0010,
    Timer = 0b0000_0100,
    Serial = 0b0000_1000,
    Joypad = 0b0001_0000,
}

impl Interrupt {
    pub fn iter() -> impl Iterator<Item = Interrupt> {
        use Interrupt::*;
        [VBlank, LcdStat, Timer, Serial, Joypad].iter().copied()
    }

    /// The ISR entry point this interrupt dispatches to.
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::LcdStat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Serial => 0x0058,
            Interrupt::Joypad => 0x0060,
        }
    }
}

bitflags! {
    #[derive(Default)]
    pub struct InterruptFlags: u8 {
        const VBLANK  = 0b0000_0001;
        const LCD     = 0b0000_0010;
        const TIMER   = 0b0000_0100;
        const SERIAL  = 0b0000_1000;
        const JOYPAD  = 0b0001_0000;
        const UNUSED  = 0b1110_0000;
    }
}

impl InterruptFlags {
    pub fn from_interrupt(interrupt: Interrupt) -> Self {
        InterruptFlags::from_bits_truncate(interrupt as u8)
    }
}

/// `ime`, `flags` (IF, 0xFF0F) and `enable` (IE, 0xFFFF).
#[derive(Debug, Default, Clone)]
pub struct InterruptController {
    pub ime: bool,
    pub flags: InterruptFlags,
    pub enable: InterruptFlags,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, interrupt: Interrupt) {
        self.flags.insert(InterruptFlags::from_interrupt(interrupt));
    }

    /// `flags & enable & 0x1F`, i.e. the set of interrupts that are both requested
    /// and enabled, regardless of `ime`.
    pub fn pending(&self) -> InterruptFlags {
        self.flags & self.enable & InterruptFlags::from_bits_truncate(0x1F)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending().is_empty()
    }

    /// The highest-priority pending interrupt, if any.
    ///
    /// The source's ISR dispatch used an implicit enum cast that could silently select
    /// nothing when no bit was set; callers must check `has_pending` (or handle this
    /// `Option`) before entering the ISR instead of asserting blindly here.
    pub fn highest_priority_pending(&self) -> Option<Interrupt> {
        let pending = self.pending();
        Interrupt::iter().find(|i| pending.contains(InterruptFlags::from_interrupt(*i)))
    }

    pub fn acknowledge(&mut self, interrupt: Interrupt) {
        self.flags.remove(InterruptFlags::from_interrupt(interrupt));
    }
}
