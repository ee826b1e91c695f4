//! Settings provider: pin tables, hotkeys, keyboard map and persisted options.

use heapless::Vec;

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::hotkey::{HotkeyAction, HotkeyEntry, HotkeyList};
use crate::mapping::MappingTable;
use crate::options::GamepadOptions;
use crate::report::keyboard::KeyboardMapping;
use crate::types::{Action, Aux, Buttons, Dpad};

/// Maximum number of pin profiles, including the base profile.
pub const MAX_PROFILES: usize = 4;

/// Error type for settings persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Storage is not present or not initialized.
    Unavailable,
    /// Write to the backing storage failed.
    Io,
}

/// Read/write access to the controller settings.
///
/// Everything except [`save`](ConfigStore::save) is read during setup or
/// when switching profiles; nothing here is touched on the hot path.
pub trait ConfigStore {
    /// As-wired pin table. Fixed for the lifetime of the engine.
    fn wiring(&self) -> MappingTable;

    /// Pin table for 1-based profile `number`, or `None` if it does not exist.
    fn profile(&self, number: u8) -> Option<MappingTable>;

    /// Ordered hotkey list.
    fn hotkeys(&self) -> &[HotkeyEntry];

    /// Persisted options.
    fn options(&self) -> GamepadOptions;

    /// Key codes emitted in keyboard mode.
    fn keyboard_mapping(&self) -> KeyboardMapping;

    /// Debounce window in milliseconds.
    fn debounce_ms(&self) -> u8 {
        DEFAULT_DEBOUNCE_MS
    }

    /// Persist `options`.
    fn save(&mut self, options: &GamepadOptions) -> Result<(), StoreError>;
}

/// Default pin assignment, in [`Action::ALL`] order.
pub const DEFAULT_PINS: [u8; Action::COUNT] = [
    2,  // Up
    3,  // Down
    5,  // Left
    4,  // Right
    6,  // B1
    7,  // B2
    10, // B3
    11, // B4
    13, // L1
    12, // R1
    9,  // L2
    8,  // R2
    16, // S1
    17, // S2
    18, // L3
    19, // R3
    20, // A1
    21, // A2
];

/// Default as-wired table.
pub const DEFAULT_WIRING: MappingTable = MappingTable::from_pins(DEFAULT_PINS);

const FN_DPAD: Buttons = Buttons(Buttons::S1.0 | Buttons::S2.0);
const FN_SOCD: Buttons = Buttons(Buttons::S2.0 | Buttons::A1.0);

/// Default hotkey chords.
///
/// Select+Start with a direction changes the d-pad mode; Start+Home with a
/// direction changes the SOCD mode.
pub const DEFAULT_HOTKEYS: [HotkeyEntry; 8] = [
    HotkeyEntry::new(FN_DPAD, Dpad::DOWN, Aux::NONE, HotkeyAction::DpadDigital),
    HotkeyEntry::new(FN_DPAD, Dpad::LEFT, Aux::NONE, HotkeyAction::DpadLeftAnalog),
    HotkeyEntry::new(FN_DPAD, Dpad::RIGHT, Aux::NONE, HotkeyAction::DpadRightAnalog),
    HotkeyEntry::new(FN_DPAD, Dpad::UP, Aux::NONE, HotkeyAction::HomeButton),
    HotkeyEntry::new(FN_SOCD, Dpad::UP, Aux::NONE, HotkeyAction::SocdUpPriority),
    HotkeyEntry::new(FN_SOCD, Dpad::DOWN, Aux::NONE, HotkeyAction::SocdNeutral),
    HotkeyEntry::new(FN_SOCD, Dpad::LEFT, Aux::NONE, HotkeyAction::SocdLastInput),
    HotkeyEntry::new(FN_SOCD, Dpad::RIGHT, Aux::NONE, HotkeyAction::SocdFirstInput),
];

/// Settings held in RAM, seeded from compile-time defaults.
///
/// Profile 1 is always the wiring table; profiles 2 and up are added with
/// [`with_profile`](StaticConfig::with_profile). `save` keeps the options in
/// memory, so they survive until reset.
#[derive(Clone, Debug)]
pub struct StaticConfig {
    wiring: MappingTable,
    profiles: Vec<MappingTable, { MAX_PROFILES - 1 }>,
    hotkeys: HotkeyList,
    options: GamepadOptions,
    keyboard: KeyboardMapping,
    debounce_ms: u8,
}

impl StaticConfig {
    /// Factory defaults.
    #[must_use]
    pub fn new() -> Self {
        let mut hotkeys = HotkeyList::new();
        for entry in DEFAULT_HOTKEYS {
            // DEFAULT_HOTKEYS is shorter than MAX_HOTKEYS.
            let _ = hotkeys.push(entry);
        }
        Self {
            wiring: DEFAULT_WIRING,
            profiles: Vec::new(),
            hotkeys,
            options: GamepadOptions::DEFAULT,
            keyboard: KeyboardMapping::DEFAULT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Replace the wiring table.
    #[must_use]
    pub fn with_wiring(mut self, wiring: MappingTable) -> Self {
        self.wiring = wiring;
        self
    }

    /// Append an alternate profile. Returns `self` unchanged when all
    /// profile slots are used.
    #[must_use]
    pub fn with_profile(mut self, table: MappingTable) -> Self {
        if self.profiles.push(table).is_err() {
            warn!("profile slots full");
        }
        self
    }

    /// Replace the hotkey list. Entries beyond capacity are dropped.
    #[must_use]
    pub fn with_hotkeys(mut self, entries: &[HotkeyEntry]) -> Self {
        self.hotkeys.clear();
        for entry in entries {
            if self.hotkeys.push(*entry).is_err() {
                break;
            }
        }
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: GamepadOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_keyboard_mapping(mut self, keyboard: KeyboardMapping) -> Self {
        self.keyboard = keyboard;
        self
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u8) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for StaticConfig {
    fn wiring(&self) -> MappingTable {
        self.wiring
    }

    fn profile(&self, number: u8) -> Option<MappingTable> {
        match number {
            0 => None,
            1 => Some(self.wiring),
            n => self.profiles.get(usize::from(n) - 2).copied(),
        }
    }

    fn hotkeys(&self) -> &[HotkeyEntry] {
        &self.hotkeys
    }

    fn options(&self) -> GamepadOptions {
        self.options
    }

    fn keyboard_mapping(&self) -> KeyboardMapping {
        self.keyboard
    }

    fn debounce_ms(&self) -> u8 {
        self.debounce_ms
    }

    fn save(&mut self, options: &GamepadOptions) -> Result<(), StoreError> {
        self.options = *options;
        Ok(())
    }
}
