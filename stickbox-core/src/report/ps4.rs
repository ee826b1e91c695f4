//! PlayStation 4 controller report.

use crate::report::{axis_u8, hat_from_dpad};
use crate::types::{Buttons, GamepadState};

/// PS4 input report id.
pub const REPORT_ID: u8 = 0x01;

const SQUARE: u8 = 1 << 4;
const CROSS: u8 = 1 << 5;
const CIRCLE: u8 = 1 << 6;
const TRIANGLE: u8 = 1 << 7;

const L1: u8 = 1 << 0;
const R1: u8 = 1 << 1;
const L2: u8 = 1 << 2;
const R2: u8 = 1 << 3;
const SHARE: u8 = 1 << 4;
const OPTIONS: u8 = 1 << 5;
const L3: u8 = 1 << 6;
const R3: u8 = 1 << 7;

const PS: u8 = 1 << 0;
const TOUCHPAD: u8 = 1 << 1;

/// PS4 report.
///
/// Layout (64 bytes): report id, LX, LY, RX, RY, hat (low nibble) with face
/// buttons (high nibble), shoulder and system buttons, PS/touchpad, LT, RT,
/// then zero padding. Gyro, touch and battery fields are left zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ps4Report {
    pub axes: [u8; 4],
    pub hat_face: u8,
    pub shoulder: u8,
    pub system: u8,
    pub lt: u8,
    pub rt: u8,
}

impl Ps4Report {
    /// Size of the report in bytes.
    pub const SIZE: usize = 64;

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = REPORT_ID;
        out[1..5].copy_from_slice(&self.axes);
        out[5] = self.hat_face;
        out[6] = self.shoulder;
        out[7] = self.system;
        out[8] = self.lt;
        out[9] = self.rt;
        out
    }
}

impl From<&GamepadState> for Ps4Report {
    fn from(state: &GamepadState) -> Self {
        let b = state.buttons;
        let bit = |mask: Buttons, flag: u8| if b.contains(mask) { flag } else { 0 };

        Self {
            axes: [
                axis_u8(state.lx),
                axis_u8(state.ly),
                axis_u8(state.rx),
                axis_u8(state.ry),
            ],
            hat_face: hat_from_dpad(state.dpad)
                | bit(Buttons::B3, SQUARE)
                | bit(Buttons::B1, CROSS)
                | bit(Buttons::B2, CIRCLE)
                | bit(Buttons::B4, TRIANGLE),
            shoulder: bit(Buttons::L1, L1)
                | bit(Buttons::R1, R1)
                | bit(Buttons::L2, L2)
                | bit(Buttons::R2, R2)
                | bit(Buttons::S1, SHARE)
                | bit(Buttons::S2, OPTIONS)
                | bit(Buttons::L3, L3)
                | bit(Buttons::R3, R3),
            system: bit(Buttons::A1, PS) | bit(Buttons::A2, TOUCHPAD),
            lt: state.lt,
            rt: state.rt,
        }
    }
}
