//! Joypad implementation: tracks button state and the 0xFF00 register's
//! active-low, group-selected encoding.

use bitflags::*;

use crate::io::interrupts::Interrupt;

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum InputKey {
    Start,
    Select,
    A,
    B,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Joypad {
    pressed_buttons: JoypadFlags,
    pressed_directions: JoypadFlags,
    selected_mode: JoypadFlags,
}

impl Joypad {
    pub fn new() -> Self {
        Joypad {
            pressed_buttons: JoypadFlags::empty(),
            pressed_directions: JoypadFlags::empty(),
            selected_mode: JoypadFlags::empty(),
        }
    }

    /// Get the current register value (active-low) for the selected group(s).
    pub fn read_register(&self) -> u8 {
        !self.selected_mode.bits
    }

    /// Set the selected group(s) (bits 4/5). Writes to the lower nibble are discarded,
    /// matching hardware: that nibble is read-only from the bus's perspective.
    pub fn write_register(&mut self, value: u8) {
        self.selected_mode = JoypadFlags::from_bits_truncate(!value);
        self.update_selected();
    }

    /// Register a key as pressed down. Returns `true` if this is a new press that
    /// should raise the Joypad interrupt (a 0->1 transition on a selected, active-low line).
    pub fn press_key(&mut self, input: InputKey) -> bool {
        let flag = input.flag_value();
        let group = input.group();
        let was_pressed = self.group_mut(group).contains(flag);
        self.group_mut(group).insert(flag);
        self.update_selected();

        !was_pressed && self.selected_mode.contains(group)
    }

    /// Release a key that was pressed down before.
    pub fn release_key(&mut self, input: InputKey) {
        let flag = input.flag_value();
        let group = input.group();
        self.group_mut(group).remove(flag);
        self.update_selected();
    }

    fn group_mut(&mut self, group: JoypadFlags) -> &mut JoypadFlags {
        if group == JoypadFlags::BUTTON_KEYS {
            &mut self.pressed_buttons
        } else {
            &mut self.pressed_directions
        }
    }

    fn update_selected(&mut self) {
        // Discard any writes that may have been made to the lower nibble.
        self.selected_mode = JoypadFlags::from_bits_truncate(self.selected_mode.bits() & 0b0011_0000);
        if self.selected_mode.contains(JoypadFlags::BUTTON_KEYS) {
            self.selected_mode.insert(self.pressed_buttons);
        }
        if self.selected_mode.contains(JoypadFlags::DIRECTION_KEYS) {
            self.selected_mode.insert(self.pressed_directions);
        }
    }
}

impl InputKey {
    fn flag_value(&self) -> JoypadFlags {
        match self {
            InputKey::Start | InputKey::Down => JoypadFlags::DOWN_START,
            InputKey::Select | InputKey::Up => JoypadFlags::UP_SELECT,
            InputKey::B | InputKey::Left => JoypadFlags::LEFT_B,
            InputKey::A | InputKey::Right => JoypadFlags::RIGHT_A,
        }
    }

    fn group(&self) -> JoypadFlags {
        match self {
            InputKey::Up | InputKey::Down | InputKey::Left | InputKey::Right => JoypadFlags::DIRECTION_KEYS,
            InputKey::A | InputKey::B | InputKey::Start | InputKey::Select => JoypadFlags::BUTTON_KEYS,
        }
    }
}

bitflags! {
    #[derive(Default)]
    struct JoypadFlags: u8 {
        /// Right or A
        const RIGHT_A         = 0b0000_0001;
        /// Left or B
        const LEFT_B          = 0b0000_0010;
        /// Input Up or Select
        const UP_SELECT       = 0b0000_0100;
        /// Input Down or Start
        const DOWN_START      = 0b0000_1000;
        /// Select Direction Keys
        const DIRECTION_KEYS  = 0b0001_0000;
        /// Select Button Keys
        const BUTTON_KEYS     = 0b0010_0000;
        const UNUSED_0        = 0b0100_0000;
        const UNUSED_1        = 0b1000_0000;
    }
}

/// Whether pressing `input` on a `Joypad` in the given group-selection state should
/// raise the Joypad interrupt; exposed as a free helper the bus uses after routing the
/// press through `Joypad::press_key`.
pub fn interrupt_for_press(raised: bool) -> Option<Interrupt> {
    if raised {
        Some(Interrupt::Joypad)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_active_low() {
        let pad = Joypad::new();
        assert_eq!(pad.read_register(), 0xFF);
    }

    #[test]
    fn test_press_reflected_in_selected_group() {
        let mut pad = Joypad::new();
        pad.write_register(0b0010_0000); // select direction keys (bit 4 low = selected)
        pad.press_key(InputKey::Up);

        assert_eq!(pad.read_register() & 0b0000_0100, 0);
    }

    #[test]
    fn test_press_raises_interrupt_only_when_selected() {
        let mut pad = Joypad::new();
        pad.write_register(0b0001_0000); // select button keys only (bit 5 low)
        assert!(!pad.press_key(InputKey::Up)); // direction group not selected
        pad.write_register(0b0010_0000); // now select directions (bit 4 low)
        assert!(pad.press_key(InputKey::Down)); // fresh press on selected group
        assert!(!pad.press_key(InputKey::Down)); // already pressed, no new edge
    }
}
