//! Hotkey chord detection.
//!
//! A chord is a set of button, d-pad and aux bits that must all be held at
//! once. The engine is a two-state machine:
//!
//! - **Idle**: scan the entries in order; the first fully pressed chord wins.
//!   Its bits are removed from the state and its action is emitted once.
//! - **Holding**: while the same chord stays fully pressed, its bits keep
//!   being removed and nothing is emitted. Releasing any bit returns to Idle.

use heapless::Vec;

use crate::types::{Aux, Buttons, Dpad, GamepadState};

/// Maximum number of configured hotkeys.
pub const MAX_HOTKEYS: usize = 16;

/// Ordered hotkey configuration.
pub type HotkeyList = Vec<HotkeyEntry, MAX_HOTKEYS>;

/// What a hotkey does when triggered.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HotkeyAction {
    /// Placeholder entry, never matches.
    #[default]
    None,
    DpadDigital,
    DpadLeftAnalog,
    DpadRightAnalog,
    HomeButton,
    CaptureButton,
    SocdUpPriority,
    SocdNeutral,
    SocdLastInput,
    SocdFirstInput,
    SocdBypass,
    InvertXAxis,
    InvertYAxis,
    ToggleFourWayMode,
    /// Switch to a 1-based pin profile.
    LoadProfile(u8),
    L3Button,
    R3Button,
    TouchpadButton,
    /// Reboot into the default mode (handled by the platform).
    RebootDefault,
}

impl HotkeyAction {
    /// Button injected on every tick the chord is held, for button actions.
    #[must_use]
    pub const fn held_buttons(self) -> Buttons {
        match self {
            HotkeyAction::HomeButton => Buttons::A1,
            HotkeyAction::CaptureButton | HotkeyAction::TouchpadButton => Buttons::A2,
            HotkeyAction::L3Button => Buttons::L3,
            HotkeyAction::R3Button => Buttons::R3,
            _ => Buttons::NONE,
        }
    }
}

/// One chord definition.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HotkeyEntry {
    pub buttons: Buttons,
    pub dpad: Dpad,
    pub aux: Aux,
    pub action: HotkeyAction,
}

impl HotkeyEntry {
    #[must_use]
    pub const fn new(buttons: Buttons, dpad: Dpad, aux: Aux, action: HotkeyAction) -> Self {
        Self {
            buttons,
            dpad,
            aux,
            action,
        }
    }

    /// Whether this chord is active in `state`.
    ///
    /// Entries with [`HotkeyAction::None`] never match.
    #[inline]
    #[must_use]
    pub fn matches(&self, state: &GamepadState) -> bool {
        self.action != HotkeyAction::None
            && state.buttons.contains(self.buttons)
            && state.dpad.contains(self.dpad)
            && state.aux.contains(self.aux)
    }

    /// Remove this chord's bits from `state`.
    #[inline]
    pub fn consume(&self, state: &mut GamepadState) {
        state.buttons.remove(self.buttons);
        state.dpad.remove(self.dpad);
        state.aux.remove(self.aux);
    }
}

/// Engine state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HotkeyState {
    #[default]
    Idle,
    /// Chord at `index` is held; `action` was already emitted.
    Holding { index: usize, action: HotkeyAction },
}

/// Matches chords against the canonical state once per tick.
///
/// # Example
///
/// ```
/// use stickbox_core::{Aux, Buttons, Dpad, GamepadState, HotkeyAction, HotkeyEngine, HotkeyEntry};
///
/// let mut engine = HotkeyEngine::new(&[HotkeyEntry::new(
///     Buttons::S1 | Buttons::S2,
///     Dpad::UP,
///     Aux::NONE,
///     HotkeyAction::SocdUpPriority,
/// )]);
///
/// let mut state = GamepadState::neutral();
/// state.buttons = Buttons::S1 | Buttons::S2 | Buttons::B1;
/// state.dpad = Dpad::UP;
///
/// assert_eq!(engine.scan(&mut state), Some(HotkeyAction::SocdUpPriority));
/// assert_eq!(state.buttons, Buttons::B1);
/// assert!(state.dpad.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct HotkeyEngine {
    entries: HotkeyList,
    state: HotkeyState,
}

impl HotkeyEngine {
    /// Create an engine from an ordered list. Entries beyond
    /// [`MAX_HOTKEYS`] are dropped.
    #[must_use]
    pub fn new(entries: &[HotkeyEntry]) -> Self {
        let mut list = HotkeyList::new();
        for entry in entries {
            if list.push(*entry).is_err() {
                warn!("hotkey list full, dropping remaining entries");
                break;
            }
        }
        Self {
            entries: list,
            state: HotkeyState::Idle,
        }
    }

    /// Configured entries.
    #[must_use]
    pub fn entries(&self) -> &[HotkeyEntry] {
        &self.entries
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> HotkeyState {
        self.state
    }

    /// Action of the chord currently held, if any.
    #[must_use]
    pub const fn held(&self) -> Option<HotkeyAction> {
        match self.state {
            HotkeyState::Idle => None,
            HotkeyState::Holding { action, .. } => Some(action),
        }
    }

    /// Drop back to Idle without touching any state.
    pub fn reset(&mut self) {
        self.state = HotkeyState::Idle;
    }

    /// Run one tick. Consumes matched bits from `state` and returns the
    /// action only on the tick its chord becomes active.
    ///
    /// When the held chord breaks, the list is scanned again on the same
    /// tick, so a chord that is now fully pressed never leaks to the host.
    pub fn scan(&mut self, state: &mut GamepadState) -> Option<HotkeyAction> {
        if let HotkeyState::Holding { index, .. } = self.state {
            match self.entries.get(index) {
                Some(entry) if entry.matches(state) => {
                    entry.consume(state);
                    return None;
                }
                _ => {
                    trace!("hotkey {} released", index);
                    self.state = HotkeyState::Idle;
                }
            }
        }

        let (index, entry) = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.matches(state))?;
        entry.consume(state);
        self.state = HotkeyState::Holding {
            index,
            action: entry.action,
        };
        debug!("hotkey {} fired: {:?}", index, entry.action);
        Some(entry.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(buttons: Buttons, action: HotkeyAction) -> HotkeyEntry {
        HotkeyEntry::new(buttons, Dpad::NONE, Aux::NONE, action)
    }

    fn pressed(buttons: Buttons) -> GamepadState {
        GamepadState {
            buttons,
            ..GamepadState::neutral()
        }
    }

    #[test]
    fn test_fires_once_while_held() {
        let mut engine = HotkeyEngine::new(&[chord(Buttons::B1 | Buttons::B2, HotkeyAction::HomeButton)]);

        let mut fired = 0;
        for _ in 0..3 {
            let mut state = pressed(Buttons::B1 | Buttons::B2 | Buttons::R1);
            if engine.scan(&mut state).is_some() {
                fired += 1;
            }
            assert_eq!(state.buttons, Buttons::R1);
        }
        assert_eq!(fired, 1);
        assert_eq!(engine.held(), Some(HotkeyAction::HomeButton));
    }

    #[test]
    fn test_partial_release_returns_to_idle() {
        let mut engine = HotkeyEngine::new(&[chord(Buttons::B1 | Buttons::B2, HotkeyAction::SocdNeutral)]);

        let mut state = pressed(Buttons::B1 | Buttons::B2);
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::SocdNeutral));

        let mut state = pressed(Buttons::B1);
        assert_eq!(engine.scan(&mut state), None);
        assert_eq!(state.buttons, Buttons::B1);
        assert_eq!(engine.state(), HotkeyState::Idle);

        // Pressing the chord again fires again.
        let mut state = pressed(Buttons::B1 | Buttons::B2);
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::SocdNeutral));
    }

    #[test]
    fn test_sliding_chord_consumed_on_release_tick() {
        let mut engine = HotkeyEngine::new(&[
            HotkeyEntry::new(
                Buttons::S1 | Buttons::S2,
                Dpad::DOWN,
                Aux::NONE,
                HotkeyAction::DpadDigital,
            ),
            HotkeyEntry::new(
                Buttons::S1 | Buttons::S2,
                Dpad::LEFT,
                Aux::NONE,
                HotkeyAction::DpadLeftAnalog,
            ),
        ]);

        let mut state = GamepadState {
            buttons: Buttons::S1 | Buttons::S2,
            dpad: Dpad::DOWN,
            ..GamepadState::neutral()
        };
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::DpadDigital));

        // Down slides to left while S1+S2 stay held.
        let mut state = GamepadState {
            buttons: Buttons::S1 | Buttons::S2,
            dpad: Dpad::LEFT,
            ..GamepadState::neutral()
        };
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::DpadLeftAnalog));
        assert!(state.buttons.is_empty());
        assert!(state.dpad.is_empty());

        let mut state = GamepadState {
            buttons: Buttons::S1 | Buttons::S2,
            dpad: Dpad::LEFT,
            ..GamepadState::neutral()
        };
        assert_eq!(engine.scan(&mut state), None);
        assert!(state.buttons.is_empty());
        assert_eq!(engine.held(), Some(HotkeyAction::DpadLeftAnalog));
    }

    #[test]
    fn test_released_chord_does_not_refire() {
        let mut engine = HotkeyEngine::new(&[
            chord(Buttons::B1 | Buttons::B2, HotkeyAction::InvertXAxis),
            chord(Buttons::B1, HotkeyAction::InvertYAxis),
        ]);

        let mut state = pressed(Buttons::B1 | Buttons::B2);
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::InvertXAxis));

        // B2 released: the smaller chord takes over on the same tick.
        let mut state = pressed(Buttons::B1);
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::InvertYAxis));
        assert!(state.buttons.is_empty());

        let mut state = pressed(Buttons::B1);
        assert_eq!(engine.scan(&mut state), None);
        assert!(state.buttons.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let mut engine = HotkeyEngine::new(&[
            chord(Buttons::S1, HotkeyAction::DpadDigital),
            chord(Buttons::S1 | Buttons::S2, HotkeyAction::DpadLeftAnalog),
        ]);

        let mut state = pressed(Buttons::S1 | Buttons::S2);
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::DpadDigital));
        assert_eq!(state.buttons, Buttons::S2);
    }

    #[test]
    fn test_inert_entries_never_match() {
        let mut engine = HotkeyEngine::new(&[
            chord(Buttons::B1, HotkeyAction::None),
            chord(Buttons::NONE, HotkeyAction::None),
        ]);

        let mut state = pressed(Buttons::B1);
        assert_eq!(engine.scan(&mut state), None);
        assert_eq!(state.buttons, Buttons::B1);
        assert_eq!(engine.state(), HotkeyState::Idle);
    }

    #[test]
    fn test_dpad_and_aux_must_match() {
        let entry = HotkeyEntry::new(Buttons::S2, Dpad::DOWN, Aux::FN, HotkeyAction::R3Button);
        let mut engine = HotkeyEngine::new(&[entry]);

        let mut state = pressed(Buttons::S2);
        state.dpad = Dpad::DOWN;
        assert_eq!(engine.scan(&mut state), None);

        state.aux = Aux::FN;
        assert_eq!(engine.scan(&mut state), Some(HotkeyAction::R3Button));
        assert!(state.dpad.is_empty());
        assert!(state.aux.is_empty());
        assert!(state.buttons.is_empty());
    }

    #[test]
    fn test_list_capacity() {
        let entries = [chord(Buttons::B1, HotkeyAction::HomeButton); MAX_HOTKEYS + 4];
        let engine = HotkeyEngine::new(&entries);
        assert_eq!(engine.entries().len(), MAX_HOTKEYS);
    }

    #[test]
    fn test_held_buttons() {
        assert_eq!(HotkeyAction::HomeButton.held_buttons(), Buttons::A1);
        assert_eq!(HotkeyAction::TouchpadButton.held_buttons(), Buttons::A2);
        assert_eq!(HotkeyAction::SocdBypass.held_buttons(), Buttons::NONE);
    }
}
