//! Pin-to-action mapping tables.
//!
//! A [`MappingTable`] holds one optional GPIO per logical [`Action`]. The
//! engine keeps two of them: the as-wired table, fixed at boot, and the
//! profile table, replaced whenever a different profile is selected. Both
//! are folded over the same debounced pin levels every tick.

use crate::types::{Action, ActionMask, Buttons, Dpad, PinLevels, NUM_GPIOS};

/// Pin assignment for a single action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMapping {
    /// Assigned GPIO, or `None` when unassigned.
    pub pin: Option<u8>,
    /// The action this entry drives.
    pub action: Action,
}

impl PinMapping {
    /// Create an entry, coercing out-of-range pins to unassigned.
    #[must_use]
    pub const fn new(pin: u8, action: Action) -> Self {
        Self {
            pin: checked_pin(pin),
            action,
        }
    }

    /// Whether this entry has a pin.
    #[inline]
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.pin.is_some()
    }
}

#[inline]
const fn checked_pin(pin: u8) -> Option<u8> {
    if pin < NUM_GPIOS {
        Some(pin)
    } else {
        None
    }
}

/// D-pad and button masks produced by folding pin levels through a table.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComposedInput {
    pub dpad: Dpad,
    pub buttons: Buttons,
}

/// Fixed-size table mapping every [`Action`] to an optional GPIO.
///
/// # Example
///
/// ```
/// use stickbox_core::{Action, Buttons, Dpad, MappingTable, PinLevels};
///
/// let table = MappingTable::unassigned()
///     .with(Action::Up, 2)
///     .with(Action::B1, 6);
///
/// let composed = table.compose(PinLevels::from_pins(&[2, 6]));
/// assert_eq!(composed.dpad, Dpad::UP);
/// assert_eq!(composed.buttons, Buttons::B1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingTable {
    pins: [Option<u8>; Action::COUNT],
}

impl MappingTable {
    /// A table with every action unassigned.
    #[must_use]
    pub const fn unassigned() -> Self {
        Self {
            pins: [None; Action::COUNT],
        }
    }

    /// Build a table from a per-action pin array in [`Action::ALL`] order.
    ///
    /// Out-of-range pins become unassigned.
    #[must_use]
    pub const fn from_pins(pins: [u8; Action::COUNT]) -> Self {
        let mut table = Self::unassigned();
        let mut i = 0;
        while i < Action::COUNT {
            table.pins[i] = checked_pin(pins[i]);
            i += 1;
        }
        table
    }

    /// Builder-style assignment.
    #[must_use]
    pub const fn with(mut self, action: Action, pin: u8) -> Self {
        self.pins[action.index()] = checked_pin(pin);
        self
    }

    /// Assign `pin` to `action`, or unassign it when out of range.
    pub fn assign(&mut self, action: Action, pin: u8) {
        self.pins[action.index()] = checked_pin(pin);
    }

    /// Remove the pin from `action`.
    pub fn unassign(&mut self, action: Action) {
        self.pins[action.index()] = None;
    }

    /// Pin currently assigned to `action`.
    #[inline]
    #[must_use]
    pub const fn pin(&self, action: Action) -> Option<u8> {
        self.pins[action.index()]
    }

    /// Iterate over all entries in [`Action::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = PinMapping> + '_ {
        Action::ALL
            .iter()
            .zip(self.pins.iter())
            .map(|(&action, &pin)| PinMapping { pin, action })
    }

    /// Bit set of every assigned pin.
    #[must_use]
    pub fn pin_mask(&self) -> u32 {
        self.pins
            .iter()
            .flatten()
            .fold(0u32, |mask, &pin| mask | (1 << pin))
    }

    /// OR together the masks of every entry whose pin is active.
    #[must_use]
    pub fn compose(&self, levels: PinLevels) -> ComposedInput {
        let mut out = ComposedInput::default();
        for entry in self.iter() {
            let Some(pin) = entry.pin else { continue };
            if !levels.is_active(pin) {
                continue;
            }
            match entry.action.mask() {
                ActionMask::Dpad(mask) => out.dpad |= mask,
                ActionMask::Button(mask) => out.buttons |= mask,
            }
        }
        out
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::unassigned()
    }
}
