//! Runtime-mutable controller options.

use crate::types::Buttons;

/// Host protocol the controller presents as.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// Generic HID gamepad (PS3-style report).
    #[default]
    Hid,
    /// Nintendo Switch wired controller.
    Switch,
    /// Xbox 360 controller.
    XInput,
    /// USB keyboard.
    Keyboard,
    /// PlayStation 4 controller.
    Ps4,
}

impl InputMode {
    /// Buttons that select a mode when held at power-up, in priority order.
    pub const BOOT_BUTTONS: [(Buttons, InputMode); 5] = [
        (Buttons::B1, InputMode::Switch),
        (Buttons::B2, InputMode::XInput),
        (Buttons::B3, InputMode::Hid),
        (Buttons::B4, InputMode::Ps4),
        (Buttons::R2, InputMode::Keyboard),
    ];

    /// Mode requested by the buttons held at power-up, if any.
    #[must_use]
    pub fn from_boot_buttons(buttons: Buttons) -> Option<InputMode> {
        Self::BOOT_BUTTONS
            .iter()
            .find(|(mask, _)| buttons.contains(*mask))
            .map(|&(_, mode)| mode)
    }
}

/// Policy for simultaneous opposing cardinal directions.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocdMode {
    /// Opposing directions cancel.
    #[default]
    Neutral,
    /// Up wins over down; left+right cancel.
    UpPriority,
    /// The direction held first stays active.
    FirstInputPriority,
    /// The direction pressed last wins, reverting on release.
    SecondInputPriority,
    /// No cleaning at all.
    Bypass,
}

/// How the d-pad is reported to the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpadMode {
    #[default]
    Digital,
    /// Emulate the left analog stick.
    LeftAnalog,
    /// Emulate the right analog stick.
    RightAnalog,
}

/// Options read by the pipeline on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadOptions {
    pub input_mode: InputMode,
    pub socd_mode: SocdMode,
    pub dpad_mode: DpadMode,
    /// Swap left and right before SOCD.
    pub invert_x_axis: bool,
    /// Swap up and down before SOCD.
    pub invert_y_axis: bool,
    /// Only one direction at a time; diagonals resolve to the newest press.
    pub four_way_mode: bool,
    /// Ignore hotkey chords.
    pub lock_hotkeys: bool,
    /// Active pin profile, 1-based.
    pub profile_number: u8,
}

impl GamepadOptions {
    /// Factory defaults.
    pub const DEFAULT: Self = Self {
        input_mode: InputMode::Hid,
        socd_mode: SocdMode::Neutral,
        dpad_mode: DpadMode::Digital,
        invert_x_axis: false,
        invert_y_axis: false,
        four_way_mode: false,
        lock_hotkeys: false,
        profile_number: 1,
    };
}

impl Default for GamepadOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_buttons() {
        assert_eq!(InputMode::from_boot_buttons(Buttons::NONE), None);
        assert_eq!(InputMode::from_boot_buttons(Buttons::B2), Some(InputMode::XInput));
        assert_eq!(InputMode::from_boot_buttons(Buttons::R2), Some(InputMode::Keyboard));
        // B1 outranks B4.
        assert_eq!(
            InputMode::from_boot_buttons(Buttons::B4 | Buttons::B1),
            Some(InputMode::Switch)
        );
        assert_eq!(InputMode::from_boot_buttons(Buttons::S1), None);
    }

    #[test]
    fn test_defaults() {
        let options = GamepadOptions::default();
        assert_eq!(options.input_mode, InputMode::Hid);
        assert_eq!(options.socd_mode, SocdMode::Neutral);
        assert_eq!(options.dpad_mode, DpadMode::Digital);
        assert_eq!(options.profile_number, 1);
        assert!(!options.lock_hotkeys);
    }
}
