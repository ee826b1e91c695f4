//! Host report adapters.
//!
//! One adapter per [`InputMode`]. Each gamepad adapter is a pure
//! `From<&GamepadState>` translation; the keyboard adapter additionally keeps
//! the held-key set between ticks. [`Reports`] owns the output buffer and
//! dispatches on the active mode.

pub mod hid;
pub mod keyboard;
pub mod ps4;
pub mod switch;
pub mod xinput;

use crate::options::InputMode;
use crate::types::{Dpad, GamepadState};

use self::hid::HidReport;
use self::keyboard::{KeyboardAdapter, KeyboardMapping};
use self::ps4::Ps4Report;
use self::switch::SwitchReport;
use self::xinput::XInputReport;

/// Largest report any adapter produces.
pub const MAX_REPORT_SIZE: usize = 64;

pub const HAT_UP: u8 = 0;
pub const HAT_UP_RIGHT: u8 = 1;
pub const HAT_RIGHT: u8 = 2;
pub const HAT_DOWN_RIGHT: u8 = 3;
pub const HAT_DOWN: u8 = 4;
pub const HAT_DOWN_LEFT: u8 = 5;
pub const HAT_LEFT: u8 = 6;
pub const HAT_UP_LEFT: u8 = 7;
pub const HAT_CENTER: u8 = 8;

/// Hat switch value for a d-pad mask.
///
/// Any combination containing both directions of an axis reads as centre.
#[must_use]
pub const fn hat_from_dpad(dpad: Dpad) -> u8 {
    const UP: u8 = Dpad::UP.0;
    const DOWN: u8 = Dpad::DOWN.0;
    const LEFT: u8 = Dpad::LEFT.0;
    const RIGHT: u8 = Dpad::RIGHT.0;

    match dpad.0 & Dpad::ALL.0 {
        UP => HAT_UP,
        x if x == UP | RIGHT => HAT_UP_RIGHT,
        RIGHT => HAT_RIGHT,
        x if x == DOWN | RIGHT => HAT_DOWN_RIGHT,
        DOWN => HAT_DOWN,
        x if x == DOWN | LEFT => HAT_DOWN_LEFT,
        LEFT => HAT_LEFT,
        x if x == UP | LEFT => HAT_UP_LEFT,
        _ => HAT_CENTER,
    }
}

/// 16-bit axis to its high byte.
#[inline]
#[must_use]
pub const fn axis_u8(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Report buffer plus the keyboard adapter's held keys.
///
/// The bytes returned by [`report`](Reports::report) stay valid until the
/// next [`generate`](Reports::generate).
#[derive(Clone, Debug)]
pub struct Reports {
    buf: [u8; MAX_REPORT_SIZE],
    len: usize,
    keyboard: KeyboardAdapter,
}

impl Reports {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_REPORT_SIZE],
            len: 0,
            keyboard: KeyboardAdapter::new(),
        }
    }

    /// Translate `state` for `mode` into the buffer.
    pub fn generate(
        &mut self,
        mode: InputMode,
        state: &GamepadState,
        keyboard: &KeyboardMapping,
    ) -> &[u8] {
        match mode {
            InputMode::Hid => self.store(&HidReport::from(state).as_bytes()),
            InputMode::Switch => self.store(&SwitchReport::from(state).as_bytes()),
            InputMode::XInput => self.store(&XInputReport::from(state).as_bytes()),
            InputMode::Ps4 => self.store(&Ps4Report::from(state).as_bytes()),
            InputMode::Keyboard => {
                self.keyboard.update(state, keyboard);
                let bytes = self.keyboard.report().as_bytes();
                self.store(&bytes);
            }
        }
        self.report()
    }

    /// Bytes of the last generated report.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Keyboard adapter state.
    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardAdapter {
        &self.keyboard
    }

    /// Release all keyboard keys.
    pub fn release_keys(&mut self) {
        self.keyboard.release_all();
    }

    fn store(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(MAX_REPORT_SIZE);
        self.buf[..len].copy_from_slice(&bytes[..len]);
        self.len = len;
    }
}

impl Default for Reports {
    fn default() -> Self {
        Self::new()
    }
}

/// Report size for `mode`.
#[must_use]
pub const fn report_size(mode: InputMode) -> usize {
    match mode {
        InputMode::Hid => HidReport::SIZE,
        InputMode::Switch => SwitchReport::SIZE,
        InputMode::XInput => XInputReport::SIZE,
        InputMode::Keyboard => keyboard::KeyboardReport::SIZE,
        InputMode::Ps4 => Ps4Report::SIZE,
    }
}
