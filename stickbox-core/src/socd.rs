//! Direction cleaning: SOCD policies, axis inversion and the 4-way filter.
//!
//! # Policies
//!
//! | Mode                  | Up + Down                | Left + Right             |
//! |-----------------------|--------------------------|--------------------------|
//! | Neutral               | neither                  | neither                  |
//! | UpPriority            | up                       | neither                  |
//! | FirstInputPriority    | the one held first       | the one held first       |
//! | SecondInputPriority   | the one pressed last     | the one pressed last     |
//! | Bypass                | both                     | both                     |
//!
//! First/Second input priority need to know which direction of an axis was
//! pressed earlier, so [`SocdCleaner`] remembers the last direction seen
//! alone on each axis. When both directions appear in the same tick with no
//! history, the axis resolves to neutral.

use crate::options::{InputMode, SocdMode};
use crate::types::Dpad;

/// Effective SOCD mode for a host.
///
/// HID-derived hosts (generic HID, Switch, PS4) encode the d-pad as a hat
/// switch that cannot express opposing directions, so Bypass is coerced to
/// Neutral for them.
///
/// ```
/// use stickbox_core::{resolve_socd_mode, InputMode, SocdMode};
///
/// assert_eq!(resolve_socd_mode(SocdMode::Bypass, InputMode::Switch), SocdMode::Neutral);
/// assert_eq!(resolve_socd_mode(SocdMode::Bypass, InputMode::XInput), SocdMode::Bypass);
/// ```
#[must_use]
pub const fn resolve_socd_mode(socd: SocdMode, input: InputMode) -> SocdMode {
    match (socd, input) {
        (SocdMode::Bypass, InputMode::Hid | InputMode::Switch | InputMode::Ps4) => {
            SocdMode::Neutral
        }
        (mode, _) => mode,
    }
}

/// Whether a host accepts opposing directions in its report.
#[must_use]
pub const fn supports_bypass(input: InputMode) -> bool {
    matches!(input, InputMode::XInput | InputMode::Keyboard)
}

/// Press-order memory for one axis.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct AxisHistory {
    /// Direction most recently seen pressed on its own.
    last: Option<Dpad>,
}

impl AxisHistory {
    /// Resolve the bits of one axis. `favoured` is the direction that wins
    /// under [`SocdMode::UpPriority`], if this axis has one.
    fn resolve(&mut self, mode: SocdMode, bits: Dpad, axis: Dpad, favoured: Option<Dpad>) -> Dpad {
        if bits.is_empty() {
            self.last = None;
            return Dpad::NONE;
        }
        if bits != axis {
            self.last = Some(bits);
            return bits;
        }
        match (mode, favoured, self.last) {
            (SocdMode::UpPriority, Some(winner), _) => {
                self.last = Some(winner);
                winner
            }
            (SocdMode::SecondInputPriority, _, Some(last)) => axis & !last,
            (SocdMode::FirstInputPriority, _, Some(last)) => last,
            _ => {
                self.last = None;
                Dpad::NONE
            }
        }
    }
}

/// Stateful SOCD cleaner.
///
/// # Example
///
/// ```
/// use stickbox_core::{Dpad, SocdCleaner, SocdMode};
///
/// let mut socd = SocdCleaner::new();
/// let mode = SocdMode::SecondInputPriority;
///
/// assert_eq!(socd.clean(mode, Dpad::LEFT), Dpad::LEFT);
/// // Right pressed while left is held: right wins.
/// assert_eq!(socd.clean(mode, Dpad::LEFT | Dpad::RIGHT), Dpad::RIGHT);
/// // Right released: back to left.
/// assert_eq!(socd.clean(mode, Dpad::LEFT), Dpad::LEFT);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SocdCleaner {
    vertical: AxisHistory,
    horizontal: AxisHistory,
}

impl SocdCleaner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertical: AxisHistory { last: None },
            horizontal: AxisHistory { last: None },
        }
    }

    /// Clean `dpad` under `mode`. The result has at most one bit per axis
    /// unless `mode` is Bypass.
    pub fn clean(&mut self, mode: SocdMode, dpad: Dpad) -> Dpad {
        if mode == SocdMode::Bypass {
            return dpad;
        }
        let vertical = self.vertical.resolve(
            mode,
            dpad & Dpad::VERTICAL,
            Dpad::VERTICAL,
            Some(Dpad::UP),
        );
        let horizontal =
            self.horizontal
                .resolve(mode, dpad & Dpad::HORIZONTAL, Dpad::HORIZONTAL, None);
        vertical | horizontal
    }

    /// Forget press order on both axes.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Swap opposing directions on the requested axes.
#[must_use]
pub fn invert_axes(dpad: Dpad, invert_x: bool, invert_y: bool) -> Dpad {
    let mut out = dpad;
    if invert_y {
        out.set(Dpad::UP, dpad.contains(Dpad::DOWN));
        out.set(Dpad::DOWN, dpad.contains(Dpad::UP));
    }
    if invert_x {
        out.set(Dpad::LEFT, dpad.contains(Dpad::RIGHT));
        out.set(Dpad::RIGHT, dpad.contains(Dpad::LEFT));
    }
    out
}

/// Restricts the d-pad to a single direction.
///
/// On a diagonal the direction pressed most recently wins; when it is
/// released the filter falls back to whatever is still held.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FourWayFilter {
    previous: Dpad,
    current: Dpad,
}

impl FourWayFilter {
    const ORDER: [Dpad; 4] = [Dpad::UP, Dpad::DOWN, Dpad::LEFT, Dpad::RIGHT];

    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: Dpad::NONE,
            current: Dpad::NONE,
        }
    }

    pub fn filter(&mut self, dpad: Dpad) -> Dpad {
        let fresh = dpad & !self.previous;
        self.previous = dpad;

        if let Some(&newest) = Self::ORDER.iter().find(|&&d| fresh.contains(d)) {
            self.current = newest;
        } else if !dpad.contains(self.current) || self.current.is_empty() {
            self.current = Self::ORDER
                .iter()
                .copied()
                .find(|&d| dpad.contains(d))
                .unwrap_or(Dpad::NONE);
        }
        self.current
    }
}
