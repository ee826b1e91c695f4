//! Core controller types: bit masks, logical actions, pin levels, GamepadState.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of user GPIOs on the target (RP2040 bank 0).
///
/// Any pin index at or above this value is treated as unassigned.
pub const NUM_GPIOS: u8 = 30;

/// Analog axis minimum (full left / full up).
pub const JOYSTICK_MIN: u16 = 0x0000;
/// Analog axis centre.
pub const JOYSTICK_MID: u16 = 0x7FFF;
/// Analog axis maximum (full right / full down).
pub const JOYSTICK_MAX: u16 = 0xFFFF;

/// Defines a bitfield newtype with the set of operators the engine uses.
macro_rules! mask_type {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(pub $repr);

        impl $name {
            /// No bits set.
            pub const NONE: Self = Self(0);

            /// Check that every bit of `mask` is set.
            #[inline]
            #[must_use]
            pub const fn contains(self, mask: $name) -> bool {
                (self.0 & mask.0) == mask.0
            }

            /// Check that at least one bit of `mask` is set.
            #[inline]
            #[must_use]
            pub const fn intersects(self, mask: $name) -> bool {
                (self.0 & mask.0) != 0
            }

            /// Set or clear the bits of `mask`.
            #[inline]
            pub fn set(&mut self, mask: $name, on: bool) {
                if on {
                    self.0 |= mask.0;
                } else {
                    self.0 &= !mask.0;
                }
            }

            /// Clear the bits of `mask`.
            #[inline]
            pub fn remove(&mut self, mask: $name) {
                self.0 &= !mask.0;
            }

            /// Get the raw value.
            #[inline]
            #[must_use]
            pub const fn raw(self) -> $repr {
                self.0
            }

            /// Check if no bits are set.
            #[inline]
            #[must_use]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline]
            fn bitor(self, rhs: Self) -> Self::Output {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline]
            fn bitand(self, rhs: Self) -> Self::Output {
                Self(self.0 & rhs.0)
            }
        }

        impl BitAndAssign for $name {
            #[inline]
            fn bitand_assign(&mut self, rhs: Self) {
                self.0 &= rhs.0;
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self::Output {
                Self(!self.0)
            }
        }
    };
}

mask_type! {
    /// Directional pad bits.
    ///
    /// ```
    /// use stickbox_core::Dpad;
    ///
    /// let dpad = Dpad::UP | Dpad::LEFT;
    /// assert!(dpad.contains(Dpad::UP));
    /// assert!(!dpad.contains(Dpad::UP | Dpad::DOWN));
    /// ```
    Dpad(u8)
}

impl Dpad {
    pub const UP: Self = Self(1 << 0);
    pub const DOWN: Self = Self(1 << 1);
    pub const LEFT: Self = Self(1 << 2);
    pub const RIGHT: Self = Self(1 << 3);

    /// Both vertical directions.
    pub const VERTICAL: Self = Self(Self::UP.0 | Self::DOWN.0);
    /// Both horizontal directions.
    pub const HORIZONTAL: Self = Self(Self::LEFT.0 | Self::RIGHT.0);
    /// All four directions.
    pub const ALL: Self = Self(Self::VERTICAL.0 | Self::HORIZONTAL.0);
}

mask_type! {
    /// Action button bits, in the generic B1..A2 layout.
    ///
    /// Host adapters translate these to their own labels (B1 is Cross on
    /// PlayStation, B on Switch, A on XInput).
    Buttons(u16)
}

impl Buttons {
    pub const B1: Self = Self(1 << 0);
    pub const B2: Self = Self(1 << 1);
    pub const B3: Self = Self(1 << 2);
    pub const B4: Self = Self(1 << 3);
    pub const L1: Self = Self(1 << 4);
    pub const R1: Self = Self(1 << 5);
    pub const L2: Self = Self(1 << 6);
    pub const R2: Self = Self(1 << 7);
    pub const S1: Self = Self(1 << 8); // Select / Share / Back
    pub const S2: Self = Self(1 << 9); // Start / Options
    pub const L3: Self = Self(1 << 10);
    pub const R3: Self = Self(1 << 11);
    pub const A1: Self = Self(1 << 12); // Home / Guide / PS
    pub const A2: Self = Self(1 << 13); // Capture / Touchpad
}

mask_type! {
    /// Auxiliary bits supplied by the pin provider (function keys, add-ons).
    ///
    /// These never reach a host report; they exist for hotkey chords.
    Aux(u16)
}

impl Aux {
    /// Dedicated function button.
    pub const FN: Self = Self(1 << 0);
}

/// Snapshot of pin levels, one bit per GPIO. A set bit means "active"
/// (the provider has already handled pull-up inversion).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinLevels(pub u32);

impl PinLevels {
    /// All pins inactive.
    pub const NONE: Self = Self(0);

    /// Level of a single pin. Out-of-range pins read inactive.
    #[inline]
    #[must_use]
    pub const fn is_active(self, pin: u8) -> bool {
        pin < NUM_GPIOS && (self.0 >> pin) & 1 == 1
    }

    /// Return a copy with `pin` set to `active`. Out-of-range pins are ignored.
    #[inline]
    #[must_use]
    pub const fn with(self, pin: u8, active: bool) -> Self {
        if pin >= NUM_GPIOS {
            return self;
        }
        if active {
            Self(self.0 | (1 << pin))
        } else {
            Self(self.0 & !(1 << pin))
        }
    }

    /// Build a snapshot with the given pins active.
    #[must_use]
    pub fn from_pins(pins: &[u8]) -> Self {
        pins.iter().fold(Self::NONE, |levels, &pin| levels.with(pin, true))
    }
}

/// Where a logical action lands in the canonical state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionMask {
    Dpad(Dpad),
    Button(Buttons),
}

/// The eighteen logical inputs a pin can be mapped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    B1,
    B2,
    B3,
    B4,
    L1,
    R1,
    L2,
    R2,
    S1,
    S2,
    L3,
    R3,
    A1,
    A2,
}

impl Action {
    /// Number of logical actions.
    pub const COUNT: usize = 18;

    /// Every action, in table order.
    pub const ALL: [Action; Self::COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::B1,
        Action::B2,
        Action::B3,
        Action::B4,
        Action::L1,
        Action::R1,
        Action::L2,
        Action::R2,
        Action::S1,
        Action::S2,
        Action::L3,
        Action::R3,
        Action::A1,
        Action::A2,
    ];

    /// Position of this action in mapping tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single bit this action contributes.
    #[must_use]
    pub const fn mask(self) -> ActionMask {
        match self {
            Action::Up => ActionMask::Dpad(Dpad::UP),
            Action::Down => ActionMask::Dpad(Dpad::DOWN),
            Action::Left => ActionMask::Dpad(Dpad::LEFT),
            Action::Right => ActionMask::Dpad(Dpad::RIGHT),
            Action::B1 => ActionMask::Button(Buttons::B1),
            Action::B2 => ActionMask::Button(Buttons::B2),
            Action::B3 => ActionMask::Button(Buttons::B3),
            Action::B4 => ActionMask::Button(Buttons::B4),
            Action::L1 => ActionMask::Button(Buttons::L1),
            Action::R1 => ActionMask::Button(Buttons::R1),
            Action::L2 => ActionMask::Button(Buttons::L2),
            Action::R2 => ActionMask::Button(Buttons::R2),
            Action::S1 => ActionMask::Button(Buttons::S1),
            Action::S2 => ActionMask::Button(Buttons::S2),
            Action::L3 => ActionMask::Button(Buttons::L3),
            Action::R3 => ActionMask::Button(Buttons::R3),
            Action::A1 => ActionMask::Button(Buttons::A1),
            Action::A2 => ActionMask::Button(Buttons::A2),
        }
    }
}

/// Canonical controller state for one tick.
///
/// `dpad`, `buttons` and `aux` carry the profile view and are rewritten by
/// SOCD, hotkeys and the d-pad mode. `wired_dpad` and `wired_buttons` are
/// the as-wired shadows and are never touched after composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadState {
    pub dpad: Dpad,
    pub buttons: Buttons,
    pub aux: Aux,
    pub lx: u16,
    pub ly: u16,
    pub rx: u16,
    pub ry: u16,
    pub lt: u8,
    pub rt: u8,
    pub wired_dpad: Dpad,
    pub wired_buttons: Buttons,
}

impl GamepadState {
    /// Nothing pressed, sticks centred, triggers released.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            dpad: Dpad::NONE,
            buttons: Buttons::NONE,
            aux: Aux::NONE,
            lx: JOYSTICK_MID,
            ly: JOYSTICK_MID,
            rx: JOYSTICK_MID,
            ry: JOYSTICK_MID,
            lt: 0,
            rt: 0,
            wired_dpad: Dpad::NONE,
            wired_buttons: Buttons::NONE,
        }
    }

    /// Whether `action` is pressed in the profile view.
    #[inline]
    #[must_use]
    pub const fn pressed(&self, action: Action) -> bool {
        match action.mask() {
            ActionMask::Dpad(mask) => self.dpad.contains(mask),
            ActionMask::Button(mask) => self.buttons.contains(mask),
        }
    }

    /// Whether `action` is active in the as-wired view.
    #[inline]
    #[must_use]
    pub const fn active_wire(&self, action: Action) -> bool {
        match action.mask() {
            ActionMask::Dpad(mask) => self.wired_dpad.contains(mask),
            ActionMask::Button(mask) => self.wired_buttons.contains(mask),
        }
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bitwise_or() {
        let buttons = Buttons::B1 | Buttons::B2;
        assert!(buttons.contains(Buttons::B1));
        assert!(buttons.contains(Buttons::B2));
        assert!(!buttons.contains(Buttons::B3));
        assert!(buttons.intersects(Buttons::B2 | Buttons::R3));
    }

    #[test]
    fn test_mask_set_clear() {
        let mut dpad = Dpad::NONE;
        dpad.set(Dpad::LEFT, true);
        assert!(dpad.contains(Dpad::LEFT));
        dpad.set(Dpad::LEFT, false);
        assert!(dpad.is_empty());
    }

    #[test]
    fn test_empty_mask_is_always_contained() {
        assert!(Buttons::NONE.contains(Buttons::NONE));
        assert!(Dpad::UP.contains(Dpad::NONE));
    }

    #[test]
    fn test_action_masks_are_single_bits() {
        for action in Action::ALL {
            let bits = match action.mask() {
                ActionMask::Dpad(mask) => mask.raw() as u32,
                ActionMask::Button(mask) => mask.raw() as u32,
            };
            assert_eq!(bits.count_ones(), 1, "{:?}", action);
        }
    }

    #[test]
    fn test_action_index_matches_table_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_pin_levels_out_of_range() {
        let levels = PinLevels::from_pins(&[0, 29, 30, 200]);
        assert!(levels.is_active(0));
        assert!(levels.is_active(29));
        assert!(!levels.is_active(30));
        assert!(!levels.is_active(200));
        assert_eq!(levels.0, (1 << 0) | (1 << 29));
    }

    #[test]
    fn test_state_accessors() {
        let mut state = GamepadState::neutral();
        state.dpad = Dpad::UP;
        state.wired_buttons = Buttons::A2;
        assert!(state.pressed(Action::Up));
        assert!(!state.pressed(Action::A2));
        assert!(state.active_wire(Action::A2));
        assert!(!state.active_wire(Action::Up));
    }
}
