//! Generic HID gamepad report (PS3-style layout).

use crate::report::{axis_u8, hat_from_dpad};
use crate::types::{Buttons, Dpad, GamepadState};

/// Generic HID report.
///
/// Layout (19 bytes):
/// - byte 0: square, cross, circle, triangle, L1, R1, L2, R2 (bit 0..7)
/// - byte 1: select, start, L3, R3, PS, touchpad (bit 0..5)
/// - byte 2: hat
/// - bytes 3..7: LX, LY, RX, RY
/// - bytes 7..19: pressure for right, left, up, down, triangle, circle,
///   cross, square, L1, R1, L2, R2 (`0xFF` when pressed)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidReport {
    pub buttons: [u8; 2],
    pub hat: u8,
    pub axes: [u8; 4],
    pub pressure: [u8; 12],
}

const SQUARE: u8 = 1 << 0;
const CROSS: u8 = 1 << 1;
const CIRCLE: u8 = 1 << 2;
const TRIANGLE: u8 = 1 << 3;
const L1: u8 = 1 << 4;
const R1: u8 = 1 << 5;
const L2: u8 = 1 << 6;
const R2: u8 = 1 << 7;

const SELECT: u8 = 1 << 0;
const START: u8 = 1 << 1;
const L3: u8 = 1 << 2;
const R3: u8 = 1 << 3;
const PS: u8 = 1 << 4;
const TOUCHPAD: u8 = 1 << 5;

impl HidReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 19;

    /// Released buttons, centred hat and sticks.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: [0; 2],
            hat: crate::report::HAT_CENTER,
            axes: [0x7F; 4],
            pressure: [0; 12],
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.buttons);
        out[2] = self.hat;
        out[3..7].copy_from_slice(&self.axes);
        out[7..19].copy_from_slice(&self.pressure);
        out
    }
}

impl Default for HidReport {
    fn default() -> Self {
        Self::neutral()
    }
}

impl From<&GamepadState> for HidReport {
    fn from(state: &GamepadState) -> Self {
        let b = state.buttons;
        let bit = |mask: Buttons, flag: u8| if b.contains(mask) { flag } else { 0 };
        let dir = |mask: Dpad| if state.dpad.contains(mask) { 0xFF } else { 0 };
        let full = |mask: Buttons| if b.contains(mask) { 0xFF } else { 0 };

        Self {
            buttons: [
                bit(Buttons::B3, SQUARE)
                    | bit(Buttons::B1, CROSS)
                    | bit(Buttons::B2, CIRCLE)
                    | bit(Buttons::B4, TRIANGLE)
                    | bit(Buttons::L1, L1)
                    | bit(Buttons::R1, R1)
                    | bit(Buttons::L2, L2)
                    | bit(Buttons::R2, R2),
                bit(Buttons::S1, SELECT)
                    | bit(Buttons::S2, START)
                    | bit(Buttons::L3, L3)
                    | bit(Buttons::R3, R3)
                    | bit(Buttons::A1, PS)
                    | bit(Buttons::A2, TOUCHPAD),
            ],
            hat: hat_from_dpad(state.dpad),
            axes: [
                axis_u8(state.lx),
                axis_u8(state.ly),
                axis_u8(state.rx),
                axis_u8(state.ry),
            ],
            pressure: [
                dir(Dpad::RIGHT),
                dir(Dpad::LEFT),
                dir(Dpad::UP),
                dir(Dpad::DOWN),
                full(Buttons::B4),
                full(Buttons::B2),
                full(Buttons::B1),
                full(Buttons::B3),
                full(Buttons::L1),
                full(Buttons::R1),
                full(Buttons::L2),
                full(Buttons::R2),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{HAT_CENTER, HAT_UP_RIGHT};

    #[test]
    fn test_neutral_state_matches_neutral_report() {
        let report = HidReport::from(&GamepadState::neutral());
        assert_eq!(report, HidReport::neutral());
        assert_eq!(report.as_bytes()[2], HAT_CENTER);
    }

    #[test]
    fn test_face_buttons_use_playstation_positions() {
        let state = GamepadState {
            buttons: Buttons::B1 | Buttons::B3 | Buttons::A1,
            ..GamepadState::neutral()
        };
        let bytes = HidReport::from(&state).as_bytes();
        assert_eq!(bytes[0], CROSS | SQUARE);
        assert_eq!(bytes[1], PS);
        // Cross and square pressure.
        assert_eq!(bytes[7 + 6], 0xFF);
        assert_eq!(bytes[7 + 7], 0xFF);
        assert_eq!(bytes[7 + 4], 0);
    }

    #[test]
    fn test_dpad_sets_hat_and_pressure() {
        let state = GamepadState {
            dpad: Dpad::UP | Dpad::RIGHT,
            ..GamepadState::neutral()
        };
        let bytes = HidReport::from(&state).as_bytes();
        assert_eq!(bytes[2], HAT_UP_RIGHT);
        assert_eq!(&bytes[7..11], &[0xFF, 0, 0xFF, 0]);
    }

    #[test]
    fn test_axes_scaled_to_high_byte() {
        let state = GamepadState {
            lx: 0,
            ly: 0xFFFF,
            ..GamepadState::neutral()
        };
        let bytes = HidReport::from(&state).as_bytes();
        assert_eq!(&bytes[3..7], &[0x00, 0xFF, 0x7F, 0x7F]);
    }
}
