//! Property-based tests for the input pipeline.
//! Verifies invariants hold for ALL input sequences, not just fixed examples.

use proptest::prelude::*;
use stickbox_core::debounce::PinFilter;
use stickbox_core::{
    resolve_socd_mode, Aux, Buttons, Clock, Dpad, Gamepad, GamepadState, HotkeyAction,
    HotkeyEngine, HotkeyEntry, InputMode, PinInput, PinLevels, SocdCleaner, SocdMode,
    StaticConfig,
};

const WINDOW_US: u64 = 5_000;

fn socd_mode() -> impl Strategy<Value = SocdMode> {
    prop_oneof![
        Just(SocdMode::Neutral),
        Just(SocdMode::UpPriority),
        Just(SocdMode::FirstInputPriority),
        Just(SocdMode::SecondInputPriority),
        Just(SocdMode::Bypass),
    ]
}

fn input_mode() -> impl Strategy<Value = InputMode> {
    prop_oneof![
        Just(InputMode::Hid),
        Just(InputMode::Switch),
        Just(InputMode::XInput),
        Just(InputMode::Keyboard),
        Just(InputMode::Ps4),
    ]
}

fn dpad_sequence() -> impl Strategy<Value = Vec<Dpad>> {
    prop::collection::vec((0u8..16).prop_map(Dpad), 1..64)
}

struct Pins(PinLevels);

impl PinInput for Pins {
    fn read_levels(&mut self) -> PinLevels {
        self.0
    }
}

struct Frozen;

impl Clock for Frozen {
    fn now_us(&self) -> u64 {
        0
    }
}

proptest::proptest! {
    /// Toggling faster than the window never changes the stable level.
    #[test]
    fn debounce_rejects_short_glitches(gaps in prop::collection::vec(1u64..WINDOW_US, 1..100)) {
        let mut filter = PinFilter::default();
        let mut now = 0u64;
        let mut level = false;
        for gap in gaps {
            level = !level;
            assert!(!filter.update(level, now, WINDOW_US), "accepted glitch at {}us", now);
            now += gap;
        }
    }

    /// A level held for the whole window is always accepted.
    #[test]
    fn debounce_accepts_after_window(
        start in 0u64..1_000_000,
        hold in WINDOW_US..10 * WINDOW_US,
        samples in 1usize..20,
    ) {
        let mut filter = PinFilter::default();
        filter.update(true, start, WINDOW_US);
        for i in 0..samples {
            let t = start + (hold * i as u64) / samples as u64;
            filter.update(true, t, WINDOW_US);
        }
        assert!(filter.update(true, start + hold, WINDOW_US));
    }

    /// Every mode except Bypass leaves at most one direction per axis.
    #[test]
    fn socd_never_opposes(mode in socd_mode(), seq in dpad_sequence()) {
        prop_assume!(mode != SocdMode::Bypass);
        let mut socd = SocdCleaner::new();
        for dpad in seq {
            let out = socd.clean(mode, dpad);
            assert!(!out.contains(Dpad::VERTICAL), "{:?} -> {:?}", dpad, out);
            assert!(!out.contains(Dpad::HORIZONTAL), "{:?} -> {:?}", dpad, out);
            // Cleaning never invents a direction.
            assert!(dpad.contains(out));
        }
    }

    /// Up-priority resolves up+down to up, whatever came before.
    #[test]
    fn socd_up_priority_prefers_up(seq in dpad_sequence()) {
        let mut socd = SocdCleaner::new();
        for dpad in seq {
            let out = socd.clean(SocdMode::UpPriority, dpad);
            if dpad.contains(Dpad::VERTICAL) {
                assert!(out.contains(Dpad::UP));
                assert!(!out.contains(Dpad::DOWN));
            }
        }
    }

    /// Bypass requested on an HID-derived host behaves exactly like Neutral.
    #[test]
    fn socd_bypass_on_hid_hosts_is_neutral(
        input in prop_oneof![Just(InputMode::Hid), Just(InputMode::Switch), Just(InputMode::Ps4)],
        seq in dpad_sequence(),
    ) {
        let mode = resolve_socd_mode(SocdMode::Bypass, input);
        let mut coerced = SocdCleaner::new();
        let mut neutral = SocdCleaner::new();
        for dpad in seq {
            assert_eq!(coerced.clean(mode, dpad), neutral.clean(SocdMode::Neutral, dpad));
        }
    }

    /// A held chord fires once and its bits stay consumed on every tick.
    #[test]
    fn hotkey_fires_once_while_held(
        chord in 1u16..0x3FFF,
        extra in 0u16..0x3FFF,
        ticks in 1usize..10,
    ) {
        let chord = Buttons(chord);
        let mut engine = HotkeyEngine::new(&[HotkeyEntry::new(
            chord,
            Dpad::NONE,
            Aux::NONE,
            HotkeyAction::ToggleFourWayMode,
        )]);

        let mut fired = 0;
        for _ in 0..ticks {
            let mut state = GamepadState {
                buttons: chord | Buttons(extra),
                ..GamepadState::neutral()
            };
            if engine.scan(&mut state).is_some() {
                fired += 1;
            }
            assert!(!state.buttons.intersects(chord));
            assert_eq!(state.buttons, Buttons(extra) & !chord);
        }
        assert_eq!(fired, 1);
    }

    /// The same stable snapshot and options always give the same final state.
    #[test]
    fn pipeline_is_deterministic(
        levels in 0u32..(1 << 30),
        socd in socd_mode(),
        input in input_mode(),
        ticks in 2usize..10,
    ) {
        let config = StaticConfig::new().with_debounce_ms(0).with_hotkeys(&[]);
        let mut gamepad = Gamepad::new(Pins(PinLevels(levels)), Frozen, config);
        gamepad.set_socd_mode(socd);
        gamepad.set_input_mode(input);

        gamepad.process();
        let first = *gamepad.state();
        let report = gamepad.report().to_vec();
        for _ in 1..ticks {
            gamepad.process();
            assert_eq!(*gamepad.state(), first);
            assert_eq!(gamepad.report(), &report[..]);
        }
    }
}
