//! USB keyboard report and held-key tracking.
//!
//! Unlike the gamepad adapters, keyboard mode keeps state between ticks: the
//! set of currently held key codes. Each tick the new set is diffed against
//! the previous one to produce key-down and key-up deltas.

use crate::types::{Action, GamepadState};

/// Keyboard report id.
pub const REPORT_ID: u8 = 0x01;
/// Number of key slots in the report.
pub const KEY_SLOTS: usize = 6;
/// Slot value sent when more than [`KEY_SLOTS`] keys are held.
pub const KEY_ERROR_ROLLOVER: u8 = 0x01;

/// HID usage codes used by the default mapping.
pub mod key {
    pub const NONE: u8 = 0x00;
    pub const C: u8 = 0x06;
    pub const V: u8 = 0x19;
    pub const X: u8 = 0x1B;
    pub const Z: u8 = 0x1D;
    pub const NUM_1: u8 = 0x1E;
    pub const NUM_5: u8 = 0x22;
    pub const NUM_9: u8 = 0x26;
    pub const SPACE: u8 = 0x2C;
    pub const MINUS: u8 = 0x2D;
    pub const EQUAL: u8 = 0x2E;
    pub const F2: u8 = 0x3B;
    pub const RIGHT_ARROW: u8 = 0x4F;
    pub const LEFT_ARROW: u8 = 0x50;
    pub const DOWN_ARROW: u8 = 0x51;
    pub const UP_ARROW: u8 = 0x52;

    pub const LEFT_CONTROL: u8 = 0xE0;
    pub const LEFT_SHIFT: u8 = 0xE1;
    pub const LEFT_ALT: u8 = 0xE2;
    pub const LEFT_GUI: u8 = 0xE3;
    pub const RIGHT_CONTROL: u8 = 0xE4;
    pub const RIGHT_SHIFT: u8 = 0xE5;
    pub const RIGHT_ALT: u8 = 0xE6;
    pub const RIGHT_GUI: u8 = 0xE7;

    pub const MEDIA_NEXT: u8 = 0xE8;
    pub const MEDIA_PREVIOUS: u8 = 0xE9;
    pub const MEDIA_STOP: u8 = 0xEA;
    pub const MEDIA_PLAY_PAUSE: u8 = 0xEB;
    pub const MEDIA_MUTE: u8 = 0xEC;
    pub const MEDIA_VOLUME_UP: u8 = 0xED;
    pub const MEDIA_VOLUME_DOWN: u8 = 0xEE;
}

/// Modifier byte bit for `code`, if it is a modifier key.
#[inline]
#[must_use]
pub const fn modifier_bit(code: u8) -> Option<u8> {
    match code {
        key::LEFT_CONTROL..=key::RIGHT_GUI => Some(1 << (code - key::LEFT_CONTROL)),
        _ => None,
    }
}

/// Multimedia byte bit for `code`, if it is a media key.
#[inline]
#[must_use]
pub const fn multimedia_bit(code: u8) -> Option<u8> {
    match code {
        key::MEDIA_NEXT..=key::MEDIA_VOLUME_DOWN => Some(1 << (code - key::MEDIA_NEXT)),
        _ => None,
    }
}

/// Key code per [`Action`]; `0` means no key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardMapping {
    keys: [u8; Action::COUNT],
}

impl KeyboardMapping {
    /// Arrows for the d-pad, modifiers and letters for the buttons.
    pub const DEFAULT: Self = Self {
        keys: [
            key::UP_ARROW,
            key::DOWN_ARROW,
            key::LEFT_ARROW,
            key::RIGHT_ARROW,
            key::LEFT_SHIFT,   // B1
            key::Z,            // B2
            key::LEFT_CONTROL, // B3
            key::LEFT_ALT,     // B4
            key::X,            // L1
            key::SPACE,        // R1
            key::V,            // L2
            key::C,            // R2
            key::NUM_5,        // S1
            key::NUM_1,        // S2
            key::EQUAL,        // L3
            key::MINUS,        // R3
            key::NUM_9,        // A1
            key::F2,           // A2
        ],
    };

    /// Mapping with no keys assigned.
    pub const EMPTY: Self = Self {
        keys: [key::NONE; Action::COUNT],
    };

    #[must_use]
    pub const fn with(mut self, action: Action, code: u8) -> Self {
        self.keys[action.index()] = code;
        self
    }

    #[inline]
    #[must_use]
    pub const fn key(&self, action: Action) -> u8 {
        self.keys[action.index()]
    }
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of HID key codes, one bit per code.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet([u32; 8]);

impl KeySet {
    pub const EMPTY: Self = Self([0; 8]);

    #[inline]
    pub fn insert(&mut self, code: u8) {
        self.0[usize::from(code >> 5)] |= 1 << (code & 31);
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, code: u8) -> bool {
        self.0[(code >> 5) as usize] & (1 << (code & 31)) != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&word| word == 0)
    }

    /// Codes in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &KeySet) -> KeySet {
        let mut out = KeySet::EMPTY;
        for (i, word) in out.0.iter_mut().enumerate() {
            *word = self.0[i] & !other.0[i];
        }
        out
    }

    /// Codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&code| self.contains(code))
    }
}

/// Keyboard report.
///
/// Layout (10 bytes): report id, modifier bits, reserved, six key slots,
/// multimedia bits.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub keys: [u8; KEY_SLOTS],
    pub multimedia: u8,
}

impl KeyboardReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 10;

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = REPORT_ID;
        out[1] = self.modifier;
        out[3..9].copy_from_slice(&self.keys);
        out[9] = self.multimedia;
        out
    }
}

impl From<&KeySet> for KeyboardReport {
    fn from(held: &KeySet) -> Self {
        let mut report = KeyboardReport::default();
        let mut slot = 0;
        for code in held.iter() {
            if let Some(bit) = modifier_bit(code) {
                report.modifier |= bit;
            } else if let Some(bit) = multimedia_bit(code) {
                report.multimedia |= bit;
            } else if slot < KEY_SLOTS {
                report.keys[slot] = code;
                slot += 1;
            } else {
                report.keys = [KEY_ERROR_ROLLOVER; KEY_SLOTS];
            }
        }
        report
    }
}

/// Held-key tracker for keyboard mode.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardAdapter {
    held: KeySet,
    pressed: KeySet,
    released: KeySet,
}

impl KeyboardAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: KeySet::EMPTY,
            pressed: KeySet::EMPTY,
            released: KeySet::EMPTY,
        }
    }

    /// Replace the held set with the keys `state` maps to and record the
    /// deltas against the previous tick.
    pub fn update(&mut self, state: &GamepadState, mapping: &KeyboardMapping) {
        let mut next = KeySet::EMPTY;
        for action in Action::ALL {
            let code = mapping.key(action);
            if code != key::NONE && state.pressed(action) {
                next.insert(code);
            }
        }
        self.pressed = next.difference(&self.held);
        self.released = self.held.difference(&next);
        self.held = next;
    }

    /// Release every held key. The released keys show up in
    /// [`released`](Self::released) until the next update.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            debug!("keyboard: releasing held keys");
        }
        self.released = self.held;
        self.pressed = KeySet::EMPTY;
        self.held = KeySet::EMPTY;
    }

    #[must_use]
    pub const fn held(&self) -> &KeySet {
        &self.held
    }

    /// Keys that went down on the last update.
    #[must_use]
    pub const fn pressed(&self) -> &KeySet {
        &self.pressed
    }

    /// Keys that went up on the last update.
    #[must_use]
    pub const fn released(&self) -> &KeySet {
        &self.released
    }

    #[must_use]
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport::from(&self.held)
    }
}
