//! The polling engine.
//!
//! [`Gamepad`] owns every piece of per-tick state and runs the pipeline:
//!
//! ```text
//! read -> debounce -> compose(wired, profile) -> invert -> 4-way -> SOCD
//!      -> hotkeys -> held-hotkey buttons -> d-pad mode -> report
//! ```
//!
//! Options and the active profile live in the engine and only change through
//! `&mut self` methods, so a tick always sees one consistent configuration.

use crate::config::{ConfigStore, StoreError};
use crate::debounce::Debouncer;
use crate::hotkey::{HotkeyAction, HotkeyEngine};
use crate::input::{Clock, PinInput};
use crate::mapping::MappingTable;
use crate::options::{DpadMode, GamepadOptions, InputMode, SocdMode};
use crate::report::keyboard::KeyboardMapping;
use crate::report::Reports;
use crate::socd::{invert_axes, resolve_socd_mode, FourWayFilter, SocdCleaner};
use crate::types::{
    Action, Aux, Buttons, Dpad, GamepadState, PinLevels, JOYSTICK_MAX, JOYSTICK_MID, JOYSTICK_MIN,
};

/// Input engine for one controller.
///
/// # Example
///
/// ```
/// use stickbox_core::{Action, Clock, Gamepad, PinInput, PinLevels, StaticConfig};
///
/// struct Pins(PinLevels);
/// impl PinInput for Pins {
///     fn read_levels(&mut self) -> PinLevels {
///         self.0
///     }
/// }
///
/// struct Uptime(u64);
/// impl Clock for Uptime {
///     fn now_us(&self) -> u64 {
///         self.0
///     }
/// }
///
/// let config = StaticConfig::new().with_debounce_ms(0);
/// // Pin 6 is B1 in the default wiring.
/// let mut gamepad = Gamepad::new(Pins(PinLevels::from_pins(&[6])), Uptime(0), config);
///
/// gamepad.process();
/// assert!(gamepad.pressed(Action::B1));
/// assert_eq!(gamepad.report().len(), 19);
/// ```
pub struct Gamepad<P, C, S> {
    pins: P,
    clock: C,
    store: S,
    options: GamepadOptions,
    wiring: MappingTable,
    profile: MappingTable,
    keyboard: KeyboardMapping,
    debouncer: Debouncer,
    levels: PinLevels,
    aux: Aux,
    socd: SocdCleaner,
    four_way: FourWayFilter,
    hotkeys: HotkeyEngine,
    raw: GamepadState,
    state: GamepadState,
    reports: Reports,
}

impl<P, C, S> Gamepad<P, C, S>
where
    P: PinInput,
    C: Clock,
    S: ConfigStore,
{
    /// Load settings from `store` and build the engine.
    ///
    /// The profile named by the stored options is applied immediately;
    /// an unknown profile falls back to the wiring table.
    pub fn new(pins: P, clock: C, store: S) -> Self {
        let options = store.options();
        let wiring = store.wiring();
        let profile = store.profile(options.profile_number).unwrap_or(wiring);

        info!(
            "gamepad: mode {:?}, socd {:?}, profile {}",
            options.input_mode,
            options.socd_mode,
            options.profile_number
        );

        Self {
            debouncer: Debouncer::new(store.debounce_ms(), wiring.pin_mask() | profile.pin_mask()),
            hotkeys: HotkeyEngine::new(store.hotkeys()),
            keyboard: store.keyboard_mapping(),
            pins,
            clock,
            store,
            options,
            wiring,
            profile,
            levels: PinLevels::NONE,
            aux: Aux::NONE,
            socd: SocdCleaner::new(),
            four_way: FourWayFilter::new(),
            raw: GamepadState::neutral(),
            state: GamepadState::neutral(),
            reports: Reports::new(),
        }
    }

    /// Run one full tick.
    ///
    /// Returns the hotkey action emitted on this tick, if any. Actions the
    /// engine cannot carry out itself ([`HotkeyAction::RebootDefault`]) are
    /// left to the caller.
    pub fn process(&mut self) -> Option<HotkeyAction> {
        self.read();
        self.debounce();
        let action = self.resolve();
        self.reports
            .generate(self.options.input_mode, &self.state, &self.keyboard);
        action
    }

    /// Take a fresh pin snapshot.
    pub fn read(&mut self) {
        self.levels = self.pins.read_levels();
        self.aux = self.pins.read_aux();
    }

    /// Advance the debounce filters with the last snapshot and recompose the
    /// raw state from the stable levels.
    pub fn debounce(&mut self) {
        let stable = self.debouncer.debounce(self.levels, self.clock.now_us());
        let wired = self.wiring.compose(stable);
        let mapped = self.profile.compose(stable);

        self.raw = GamepadState {
            dpad: mapped.dpad,
            buttons: mapped.buttons,
            aux: self.aux,
            wired_dpad: wired.dpad,
            wired_buttons: wired.buttons,
            ..GamepadState::neutral()
        };
    }

    /// Derive the final state from the raw state and the current options.
    fn resolve(&mut self) -> Option<HotkeyAction> {
        let mut state = self.raw;

        state.dpad = invert_axes(
            state.dpad,
            self.options.invert_x_axis,
            self.options.invert_y_axis,
        );
        if self.options.four_way_mode {
            state.dpad = self.four_way.filter(state.dpad);
        }
        let socd = resolve_socd_mode(self.options.socd_mode, self.options.input_mode);
        state.dpad = self.socd.clean(socd, state.dpad);

        let action = if self.options.lock_hotkeys {
            self.hotkeys.reset();
            None
        } else {
            self.hotkeys.scan(&mut state)
        };
        if let Some(action) = action {
            self.apply_hotkey(action);
        }
        if let Some(held) = self.hotkeys.held() {
            state.buttons |= held.held_buttons();
        }

        match self.options.dpad_mode {
            DpadMode::Digital => {}
            DpadMode::LeftAnalog => {
                (state.lx, state.ly) = stick_from_dpad(state.dpad);
                state.dpad = Dpad::NONE;
            }
            DpadMode::RightAnalog => {
                (state.rx, state.ry) = stick_from_dpad(state.dpad);
                state.dpad = Dpad::NONE;
            }
        }
        state.lt = if state.buttons.contains(Buttons::L2) { 0xFF } else { 0 };
        state.rt = if state.buttons.contains(Buttons::R2) { 0xFF } else { 0 };

        self.state = state;
        action
    }

    fn apply_hotkey(&mut self, action: HotkeyAction) {
        let options = &mut self.options;
        match action {
            HotkeyAction::DpadDigital => options.dpad_mode = DpadMode::Digital,
            HotkeyAction::DpadLeftAnalog => options.dpad_mode = DpadMode::LeftAnalog,
            HotkeyAction::DpadRightAnalog => options.dpad_mode = DpadMode::RightAnalog,
            HotkeyAction::SocdUpPriority => options.socd_mode = SocdMode::UpPriority,
            HotkeyAction::SocdNeutral => options.socd_mode = SocdMode::Neutral,
            HotkeyAction::SocdLastInput => options.socd_mode = SocdMode::SecondInputPriority,
            HotkeyAction::SocdFirstInput => options.socd_mode = SocdMode::FirstInputPriority,
            HotkeyAction::SocdBypass => options.socd_mode = SocdMode::Bypass,
            HotkeyAction::InvertXAxis => options.invert_x_axis = !options.invert_x_axis,
            HotkeyAction::InvertYAxis => options.invert_y_axis = !options.invert_y_axis,
            HotkeyAction::ToggleFourWayMode => options.four_way_mode = !options.four_way_mode,
            HotkeyAction::LoadProfile(number) => {
                options.profile_number = number;
                self.reassign_pins_for_profile(number);
            }
            // Button actions are injected while held; reboot belongs to the caller.
            HotkeyAction::None
            | HotkeyAction::HomeButton
            | HotkeyAction::CaptureButton
            | HotkeyAction::L3Button
            | HotkeyAction::R3Button
            | HotkeyAction::TouchpadButton
            | HotkeyAction::RebootDefault => return,
        }
        if let Err(err) = self.save() {
            warn!("gamepad: failed to save options: {:?}", err);
        }
    }

    /// Persist the current options.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.options)
    }

    /// Replace the profile table with profile `number` from the store.
    ///
    /// The wiring table, and with it every `active_wire` accessor, is not
    /// affected. An unknown profile falls back to the wiring table.
    pub fn reassign_pins_for_profile(&mut self, number: u8) {
        self.profile = match self.store.profile(number) {
            Some(table) => table,
            None => {
                warn!("gamepad: profile {} not found, using wiring", number);
                self.wiring
            }
        };
        self.debouncer
            .watch(self.wiring.pin_mask() | self.profile.pin_mask());
        info!("gamepad: profile {} active", number);
    }

    /// Current options.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &GamepadOptions {
        &self.options
    }

    /// Change the host mode. Leaving keyboard mode releases every held key.
    ///
    /// The report buffer is regenerated from the last final state, so
    /// [`report`](Self::report) is in the new format straight away.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.options.input_mode == InputMode::Keyboard && mode != InputMode::Keyboard {
            self.reports.release_keys();
        }
        self.options.input_mode = mode;
        self.reports.generate(mode, &self.state, &self.keyboard);
    }

    pub fn set_socd_mode(&mut self, mode: SocdMode) {
        self.options.socd_mode = mode;
    }

    pub fn set_dpad_mode(&mut self, mode: DpadMode) {
        self.options.dpad_mode = mode;
    }

    /// Whether `action` is pressed in the final state.
    #[inline]
    #[must_use]
    pub fn pressed(&self, action: Action) -> bool {
        self.state.pressed(action)
    }

    /// Whether `action` is active according to the wiring table.
    #[inline]
    #[must_use]
    pub fn active_wire(&self, action: Action) -> bool {
        self.state.active_wire(action)
    }

    /// Whether every bit of `mask` is set in the final aux bits.
    #[inline]
    #[must_use]
    pub fn pressed_aux(&self, mask: Aux) -> bool {
        self.state.aux.contains(mask)
    }

    /// State after debounce and composition, before any cleaning.
    #[inline]
    #[must_use]
    pub const fn raw_state(&self) -> &GamepadState {
        &self.raw
    }

    /// Final state of the last tick.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> &GamepadState {
        &self.state
    }

    /// Report bytes of the last tick, for the active mode.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &[u8] {
        self.reports.report()
    }

    /// Keyboard deltas and held keys.
    #[must_use]
    pub const fn reports(&self) -> &Reports {
        &self.reports
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }
}

/// Stick position for a d-pad mask.
const fn stick_from_dpad(dpad: Dpad) -> (u16, u16) {
    (
        axis_from_pair(dpad.contains(Dpad::LEFT), dpad.contains(Dpad::RIGHT)),
        axis_from_pair(dpad.contains(Dpad::UP), dpad.contains(Dpad::DOWN)),
    )
}

/// Both directions held (SOCD bypass) read as centre.
const fn axis_from_pair(low: bool, high: bool) -> u16 {
    match (low, high) {
        (true, false) => JOYSTICK_MIN,
        (false, true) => JOYSTICK_MAX,
        _ => JOYSTICK_MID,
    }
}

macro_rules! action_accessors {
    ($($action:ident => $pressed:ident, $wire:ident;)*) => {
        impl<P, C, S> Gamepad<P, C, S>
        where
            P: PinInput,
            C: Clock,
            S: ConfigStore,
        {
            $(
                #[inline]
                #[must_use]
                pub fn $pressed(&self) -> bool {
                    self.pressed(Action::$action)
                }

                #[inline]
                #[must_use]
                pub fn $wire(&self) -> bool {
                    self.active_wire(Action::$action)
                }
            )*
        }
    };
}

action_accessors! {
    Up => pressed_up, active_wire_up;
    Down => pressed_down, active_wire_down;
    Left => pressed_left, active_wire_left;
    Right => pressed_right, active_wire_right;
    B1 => pressed_b1, active_wire_b1;
    B2 => pressed_b2, active_wire_b2;
    B3 => pressed_b3, active_wire_b3;
    B4 => pressed_b4, active_wire_b4;
    L1 => pressed_l1, active_wire_l1;
    R1 => pressed_r1, active_wire_r1;
    L2 => pressed_l2, active_wire_l2;
    R2 => pressed_r2, active_wire_r2;
    S1 => pressed_s1, active_wire_s1;
    S2 => pressed_s2, active_wire_s2;
    L3 => pressed_l3, active_wire_l3;
    R3 => pressed_r3, active_wire_r3;
    A1 => pressed_a1, active_wire_a1;
    A2 => pressed_a2, active_wire_a2;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::cell::Cell;
    use std::vec::Vec;

    use super::*;
    use crate::config::{StaticConfig, DEFAULT_WIRING};
    use crate::hotkey::HotkeyEntry;
    use crate::report::keyboard::key;
    use crate::report::{HAT_CENTER, HAT_UP};

    // Default wiring pins.
    const UP: u8 = 2;
    const DOWN: u8 = 3;
    const RIGHT: u8 = 4;
    const LEFT: u8 = 5;
    const B1: u8 = 6;
    const B2: u8 = 7;
    const L2: u8 = 9;
    const S1: u8 = 16;
    const S2: u8 = 17;

    #[derive(Default)]
    struct FakePins {
        levels: PinLevels,
        aux: Aux,
    }

    impl FakePins {
        fn press(&mut self, pins: &[u8]) {
            self.levels = PinLevels::from_pins(pins);
        }
    }

    impl PinInput for FakePins {
        fn read_levels(&mut self) -> PinLevels {
            self.levels
        }

        fn read_aux(&mut self) -> Aux {
            self.aux
        }
    }

    impl Clock for Cell<u64> {
        fn now_us(&self) -> u64 {
            self.get()
        }
    }

    struct FailingStore(StaticConfig);

    impl ConfigStore for FailingStore {
        fn wiring(&self) -> MappingTable {
            self.0.wiring()
        }
        fn profile(&self, number: u8) -> Option<MappingTable> {
            self.0.profile(number)
        }
        fn hotkeys(&self) -> &[HotkeyEntry] {
            self.0.hotkeys()
        }
        fn options(&self) -> GamepadOptions {
            self.0.options()
        }
        fn keyboard_mapping(&self) -> KeyboardMapping {
            self.0.keyboard_mapping()
        }
        fn debounce_ms(&self) -> u8 {
            0
        }
        fn save(&mut self, _options: &GamepadOptions) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn gamepad(config: StaticConfig) -> Gamepad<FakePins, Cell<u64>, StaticConfig> {
        Gamepad::new(FakePins::default(), Cell::new(0), config.with_debounce_ms(0))
    }

    fn tick(gamepad: &mut Gamepad<FakePins, Cell<u64>, StaticConfig>, pins: &[u8]) -> Option<HotkeyAction> {
        gamepad.pins_mut().press(pins);
        gamepad.process()
    }

    #[test]
    fn test_opposing_directions_neutral_on_hid() {
        let mut pad = gamepad(StaticConfig::new());
        tick(&mut pad, &[UP, DOWN]);

        assert!(!pad.pressed_up());
        assert!(!pad.pressed_down());
        assert!(pad.raw_state().dpad.contains(Dpad::UP | Dpad::DOWN));
        assert_eq!(pad.report()[2], HAT_CENTER);
    }

    #[test]
    fn test_profile_switch_keeps_wired_view() {
        // Profile 2 swaps B1 and B2.
        let swapped = DEFAULT_WIRING.with(Action::B1, B2).with(Action::B2, B1);
        let mut pad = gamepad(StaticConfig::new().with_profile(swapped));

        tick(&mut pad, &[B1]);
        assert!(pad.pressed_b1());
        assert!(pad.active_wire_b1());

        pad.reassign_pins_for_profile(2);
        tick(&mut pad, &[B1]);
        assert!(!pad.pressed_b1());
        assert!(pad.pressed_b2());
        assert!(pad.active_wire_b1());
        assert!(!pad.active_wire_b2());
    }

    #[test]
    fn test_unknown_profile_falls_back_to_wiring() {
        let mut pad = gamepad(StaticConfig::new());
        pad.reassign_pins_for_profile(9);
        tick(&mut pad, &[B1]);
        assert!(pad.pressed_b1());
    }

    #[test]
    fn test_hotkey_emits_once_and_consumes_buttons() {
        let config = StaticConfig::new().with_hotkeys(&[HotkeyEntry::new(
            Buttons::B1 | Buttons::B2,
            Dpad::NONE,
            Aux::NONE,
            HotkeyAction::InvertXAxis,
        )]);
        let mut pad = gamepad(config);

        let emitted: Vec<_> = (0..3).map(|_| tick(&mut pad, &[B1, B2])).collect();
        assert_eq!(emitted, [Some(HotkeyAction::InvertXAxis), None, None]);
        assert!(!pad.pressed_b1());
        assert!(!pad.pressed_b2());
        assert!(pad.active_wire_b1());
        assert!(pad.options().invert_x_axis);
        assert!(pad.store().options().invert_x_axis);
    }

    #[test]
    fn test_same_input_gives_same_state() {
        let mut pad = gamepad(StaticConfig::new());
        pad.set_socd_mode(SocdMode::SecondInputPriority);
        tick(&mut pad, &[LEFT, B1, L2]);
        let first = *pad.state();
        let report: Vec<u8> = pad.report().to_vec();

        for _ in 0..10 {
            tick(&mut pad, &[LEFT, B1, L2]);
            assert_eq!(*pad.state(), first);
            assert_eq!(pad.report(), &report[..]);
        }
        assert_eq!(first.lt, 0xFF);
        assert_eq!(first.rt, 0);
    }

    #[test]
    fn test_debounce_delays_press() {
        let mut pad = Gamepad::new(FakePins::default(), Cell::new(0), StaticConfig::new());
        pad.pins_mut().press(&[B1]);

        pad.process();
        assert!(!pad.pressed_b1());

        pad.clock.set(4_000);
        pad.process();
        assert!(!pad.pressed_b1());

        pad.clock.set(5_000);
        pad.process();
        assert!(pad.pressed_b1());
    }

    #[test]
    fn test_bypass_coerced_for_switch_but_not_xinput() {
        let mut pad = gamepad(StaticConfig::new());
        pad.set_socd_mode(SocdMode::Bypass);

        pad.set_input_mode(InputMode::Switch);
        tick(&mut pad, &[UP, DOWN]);
        assert!(pad.state().dpad.is_empty());

        pad.set_input_mode(InputMode::XInput);
        tick(&mut pad, &[UP, DOWN]);
        assert_eq!(pad.state().dpad, Dpad::UP | Dpad::DOWN);
    }

    #[test]
    fn test_dpad_hotkey_switches_to_left_stick() {
        let mut pad = gamepad(StaticConfig::new());

        // Select + Start + Left: left-analog mode.
        assert_eq!(
            tick(&mut pad, &[S1, S2, LEFT]),
            Some(HotkeyAction::DpadLeftAnalog)
        );
        assert_eq!(pad.options().dpad_mode, DpadMode::LeftAnalog);
        tick(&mut pad, &[]);

        tick(&mut pad, &[UP]);
        assert!(pad.state().dpad.is_empty());
        assert_eq!(pad.state().ly, JOYSTICK_MIN);
        assert_eq!(pad.state().lx, JOYSTICK_MID);
        assert_eq!(pad.report()[2], HAT_CENTER);
    }

    #[test]
    fn test_sliding_hotkey_chord_never_reaches_host() {
        let mut pad = gamepad(StaticConfig::new());

        assert_eq!(
            tick(&mut pad, &[S1, S2, DOWN]),
            Some(HotkeyAction::DpadDigital)
        );
        assert_eq!(
            tick(&mut pad, &[S1, S2, LEFT]),
            Some(HotkeyAction::DpadLeftAnalog)
        );
        assert!(!pad.pressed_s1());
        assert!(!pad.pressed_s2());
        assert!(!pad.pressed_left());
        assert_eq!(pad.state().lx, JOYSTICK_MID);

        assert_eq!(tick(&mut pad, &[S1, S2, LEFT]), None);
        assert!(!pad.pressed_s1());
    }

    #[test]
    fn test_bypass_opposing_directions_centre_stick() {
        let mut pad = gamepad(StaticConfig::new());
        pad.set_input_mode(InputMode::XInput);
        pad.set_socd_mode(SocdMode::Bypass);
        pad.set_dpad_mode(DpadMode::LeftAnalog);

        tick(&mut pad, &[LEFT, RIGHT, UP]);
        assert_eq!(pad.state().lx, JOYSTICK_MID);
        assert_eq!(pad.state().ly, JOYSTICK_MIN);

        tick(&mut pad, &[UP, DOWN]);
        assert_eq!(pad.state().lx, JOYSTICK_MID);
        assert_eq!(pad.state().ly, JOYSTICK_MID);
    }

    #[test]
    fn test_home_hotkey_held_injects_button() {
        let mut pad = gamepad(StaticConfig::new());
        for _ in 0..3 {
            tick(&mut pad, &[S1, S2, UP]);
            assert!(pad.pressed_a1());
            assert!(!pad.pressed_up());
            assert!(!pad.pressed_s1());
        }
        tick(&mut pad, &[S1, S2]);
        assert!(!pad.pressed_a1());
        assert!(pad.pressed_s1());
    }

    #[test]
    fn test_lock_hotkeys() {
        let options = GamepadOptions {
            lock_hotkeys: true,
            ..GamepadOptions::DEFAULT
        };
        let mut pad = gamepad(StaticConfig::new().with_options(options));
        assert_eq!(tick(&mut pad, &[S1, S2, UP]), None);
        assert!(pad.pressed_up());
        assert!(pad.pressed_s1());
    }

    #[test]
    fn test_load_profile_hotkey() {
        let swapped = DEFAULT_WIRING.with(Action::B1, B2).with(Action::B2, B1);
        let config = StaticConfig::new()
            .with_profile(swapped)
            .with_hotkeys(&[HotkeyEntry::new(
                Buttons::S1 | Buttons::S2,
                Dpad::DOWN,
                Aux::NONE,
                HotkeyAction::LoadProfile(2),
            )]);
        let mut pad = gamepad(config);

        assert_eq!(
            tick(&mut pad, &[S1, S2, DOWN]),
            Some(HotkeyAction::LoadProfile(2))
        );
        assert_eq!(pad.options().profile_number, 2);
        assert_eq!(pad.store().options().profile_number, 2);

        tick(&mut pad, &[B2]);
        assert!(pad.pressed_b1());
    }

    #[test]
    fn test_failed_save_is_ignored() {
        let mut pad = Gamepad::new(
            FakePins::default(),
            Cell::new(0),
            FailingStore(StaticConfig::new()),
        );
        pad.pins_mut().press(&[S1, S2, LEFT]);
        assert_eq!(pad.process(), Some(HotkeyAction::DpadLeftAnalog));
        assert_eq!(pad.options().dpad_mode, DpadMode::LeftAnalog);
        assert_eq!(pad.save(), Err(StoreError::Unavailable));
    }

    #[test]
    fn test_reboot_returned_to_caller() {
        let config = StaticConfig::new().with_hotkeys(&[HotkeyEntry::new(
            Buttons::NONE,
            Dpad::NONE,
            Aux::FN,
            HotkeyAction::RebootDefault,
        )]);
        let mut pad = gamepad(config);
        pad.pins_mut().aux = Aux::FN;
        assert_eq!(pad.process(), Some(HotkeyAction::RebootDefault));
        assert!(!pad.pressed_aux(Aux::FN));
    }

    #[test]
    fn test_keyboard_mode_and_release() {
        let mut pad = gamepad(StaticConfig::new());
        pad.set_input_mode(InputMode::Keyboard);
        tick(&mut pad, &[UP]);
        assert_eq!(pad.report().len(), 10);
        assert_eq!(pad.report()[3], key::UP_ARROW);

        pad.set_input_mode(InputMode::Hid);
        assert!(pad.reports().keyboard().held().is_empty());
        assert!(pad.reports().keyboard().released().contains(key::UP_ARROW));
        assert_eq!(pad.report().len(), 19);

        tick(&mut pad, &[UP]);
        assert_eq!(pad.report()[2], HAT_UP);
    }

    #[test]
    fn test_invert_and_four_way() {
        let options = GamepadOptions {
            invert_y_axis: true,
            four_way_mode: true,
            ..GamepadOptions::DEFAULT
        };
        let mut pad = gamepad(StaticConfig::new().with_options(options));

        tick(&mut pad, &[UP]);
        assert_eq!(pad.state().dpad, Dpad::DOWN);

        tick(&mut pad, &[UP, LEFT]);
        assert_eq!(pad.state().dpad, Dpad::LEFT);
    }
}
