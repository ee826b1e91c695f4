//! Nintendo Switch wired controller report.

use crate::report::{axis_u8, hat_from_dpad, HAT_CENTER};
use crate::types::{Buttons, GamepadState};

/// Switch button bits.
pub mod button {
    pub const Y: u16 = 1 << 0;
    pub const B: u16 = 1 << 1;
    pub const A: u16 = 1 << 2;
    pub const X: u16 = 1 << 3;
    pub const L: u16 = 1 << 4;
    pub const R: u16 = 1 << 5;
    pub const ZL: u16 = 1 << 6;
    pub const ZR: u16 = 1 << 7;
    pub const MINUS: u16 = 1 << 8;
    pub const PLUS: u16 = 1 << 9;
    pub const LSTICK: u16 = 1 << 10;
    pub const RSTICK: u16 = 1 << 11;
    pub const HOME: u16 = 1 << 12;
    pub const CAPTURE: u16 = 1 << 13;
}

/// B1..A2 to Switch bits. B1 sits on the bottom face button (B).
const BUTTON_MAP: [(Buttons, u16); 14] = [
    (Buttons::B1, button::B),
    (Buttons::B2, button::A),
    (Buttons::B3, button::Y),
    (Buttons::B4, button::X),
    (Buttons::L1, button::L),
    (Buttons::R1, button::R),
    (Buttons::L2, button::ZL),
    (Buttons::R2, button::ZR),
    (Buttons::S1, button::MINUS),
    (Buttons::S2, button::PLUS),
    (Buttons::L3, button::LSTICK),
    (Buttons::R3, button::RSTICK),
    (Buttons::A1, button::HOME),
    (Buttons::A2, button::CAPTURE),
];

/// Switch report.
///
/// Layout (8 bytes): buttons (u16 LE), hat, LX, LY, RX, RY, vendor byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchReport {
    pub buttons: u16,
    pub hat: u8,
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
    pub vendor: u8,
}

impl SwitchReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            hat: HAT_CENTER,
            lx: 0x7F,
            ly: 0x7F,
            rx: 0x7F,
            ry: 0x7F,
            vendor: 0,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        [
            buttons[0],
            buttons[1],
            self.hat,
            self.lx,
            self.ly,
            self.rx,
            self.ry,
            self.vendor,
        ]
    }
}

impl Default for SwitchReport {
    fn default() -> Self {
        Self::neutral()
    }
}

impl From<&GamepadState> for SwitchReport {
    fn from(state: &GamepadState) -> Self {
        let buttons = BUTTON_MAP
            .iter()
            .filter(|(mask, _)| state.buttons.contains(*mask))
            .fold(0u16, |acc, (_, bit)| acc | bit);

        Self {
            buttons,
            hat: hat_from_dpad(state.dpad),
            lx: axis_u8(state.lx),
            ly: axis_u8(state.ly),
            rx: axis_u8(state.rx),
            ry: axis_u8(state.ry),
            vendor: 0,
        }
    }
}
