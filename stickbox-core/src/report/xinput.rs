//! Xbox 360 (XInput) report.

use crate::types::{Buttons, Dpad, GamepadState};

const UP: u8 = 1 << 0;
const DOWN: u8 = 1 << 1;
const LEFT: u8 = 1 << 2;
const RIGHT: u8 = 1 << 3;
const START: u8 = 1 << 4;
const BACK: u8 = 1 << 5;
const LS: u8 = 1 << 6;
const RS: u8 = 1 << 7;

const LB: u8 = 1 << 0;
const RB: u8 = 1 << 1;
const GUIDE: u8 = 1 << 2;
const A: u8 = 1 << 4;
const B: u8 = 1 << 5;
const X: u8 = 1 << 6;
const Y: u8 = 1 << 7;

/// XInput report.
///
/// Layout (20 bytes): `0x00`, `0x14`, buttons1, buttons2, LT, RT, then four
/// little-endian `i16` axes and six reserved bytes. The Y axes are inverted
/// (XInput treats positive as up).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XInputReport {
    pub buttons1: u8,
    pub buttons2: u8,
    pub lt: u8,
    pub rt: u8,
    pub lx: i16,
    pub ly: i16,
    pub rx: i16,
    pub ry: i16,
}

impl XInputReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 20;

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = 0x00;
        out[1] = Self::SIZE as u8;
        out[2] = self.buttons1;
        out[3] = self.buttons2;
        out[4] = self.lt;
        out[5] = self.rt;
        out[6..8].copy_from_slice(&self.lx.to_le_bytes());
        out[8..10].copy_from_slice(&self.ly.to_le_bytes());
        out[10..12].copy_from_slice(&self.rx.to_le_bytes());
        out[12..14].copy_from_slice(&self.ry.to_le_bytes());
        out
    }
}

/// Unsigned axis to signed, min maps to `i16::MIN`.
#[inline]
const fn axis_x(value: u16) -> i16 {
    (value ^ 0x8000) as i16
}

/// Unsigned axis to signed with the direction flipped.
#[inline]
const fn axis_y(value: u16) -> i16 {
    (!value ^ 0x8000) as i16
}

impl From<&GamepadState> for XInputReport {
    fn from(state: &GamepadState) -> Self {
        let b = state.buttons;
        let bit = |mask: Buttons, flag: u8| if b.contains(mask) { flag } else { 0 };
        let dir = |mask: Dpad, flag: u8| if state.dpad.contains(mask) { flag } else { 0 };

        Self {
            buttons1: dir(Dpad::UP, UP)
                | dir(Dpad::DOWN, DOWN)
                | dir(Dpad::LEFT, LEFT)
                | dir(Dpad::RIGHT, RIGHT)
                | bit(Buttons::S2, START)
                | bit(Buttons::S1, BACK)
                | bit(Buttons::L3, LS)
                | bit(Buttons::R3, RS),
            buttons2: bit(Buttons::L1, LB)
                | bit(Buttons::R1, RB)
                | bit(Buttons::A1, GUIDE)
                | bit(Buttons::B1, A)
                | bit(Buttons::B2, B)
                | bit(Buttons::B3, X)
                | bit(Buttons::B4, Y),
            lt: state.lt,
            rt: state.rt,
            lx: axis_x(state.lx),
            ly: axis_y(state.ly),
            rx: axis_x(state.rx),
            ry: axis_y(state.ry),
        }
    }
}
