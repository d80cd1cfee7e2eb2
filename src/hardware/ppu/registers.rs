use bitflags::*;

bitflags! {
    /// FF40. Unlike VRAM, LCDC is never locked by the PPU and may be written mid-scanline.
    #[derive(Default)]
    pub struct LcdControl: u8 {
        /// DMG: BG/window display enable. CGB: BG/window master priority.
        const BG_WINDOW_PRIORITY    = 0b0000_0001;
        const SPRITE_DISPLAY_ENABLE = 0b0000_0010;
        /// 0 = 8x8 sprites, 1 = 8x16.
        const SPRITE_SIZE           = 0b0000_0100;
        /// 0 -> tile map at 0x9800, 1 -> 0x9C00.
        const BG_TILE_MAP_SELECT    = 0b0000_1000;
        /// 0 -> 0x8800 signed addressing, 1 -> 0x8000 unsigned addressing.
        const BG_WINDOW_TILE_SELECT = 0b0001_0000;
        const WINDOW_DISPLAY        = 0b0010_0000;
        /// 0 -> tile map at 0x9800, 1 -> 0x9C00.
        const WINDOW_MAP_SELECT     = 0b0100_0000;
        const LCD_DISPLAY           = 0b1000_0000;
    }
}

bitflags! {
    /// FF41.
    #[derive(Default)]
    pub struct LcdStatus: u8 {
        const MODE_FLAG_0           = 0b0000_0001;
        const MODE_FLAG_1           = 0b0000_0010;
        const COINCIDENCE_FLAG      = 0b0000_0100;
        const MODE_0_H_INTERRUPT    = 0b0000_1000;
        const MODE_1_V_INTERRUPT    = 0b0001_0000;
        const MODE_2_OAM_INTERRUPT  = 0b0010_0000;
        const COINCIDENCE_INTERRUPT = 0b0100_0000;
        const UNUSED                = 0b1000_0000;
    }
}

bitflags! {
    /// Sprite OAM attribute byte, and (in color mode) the per-tile BG/window attribute
    /// byte stored in VRAM bank 1.
    #[derive(Default)]
    pub struct AttributeFlags: u8 {
        /// CGB mode only: palette index (OBP0-7 / BGP0-7).
        const PALETTE_NUMBER_CGB = 0b0000_0111;
        /// CGB mode only: 0 = bank 0, 1 = bank 1.
        const TILE_VRAM_BANK     = 0b0000_1000;
        /// Non-CGB mode only: 0 = OBP0, 1 = OBP1.
        const PALETTE_NUMBER     = 0b0001_0000;
        const X_FLIP             = 0b0010_0000;
        const Y_FLIP             = 0b0100_0000;
        /// 0 = sprite above BG, 1 = sprite behind BG colors 1-3.
        const BG_PRIORITY        = 0b1000_0000;
    }
}

impl AttributeFlags {
    pub fn cgb_palette_index(self) -> usize {
        (self.bits & 0x07) as usize
    }
}
