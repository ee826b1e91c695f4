//! Platform-agnostic input engine for GPIO arcade controllers.
//!
//! The crate turns raw pin levels into host reports, one poll tick at a time,
//! without any platform-specific dependencies. It runs on the controller in
//! `no_std` and on the host for testing.
//!
//! # Overview
//!
//! - [`types`]: bit masks ([`Dpad`], [`Buttons`], [`Aux`]), [`Action`],
//!   [`PinLevels`] and the canonical [`GamepadState`]
//! - [`mapping`]: pin-to-action tables ([`MappingTable`])
//! - [`debounce`]: per-pin debounce filter ([`Debouncer`])
//! - [`socd`]: opposing-direction policies ([`SocdCleaner`],
//!   [`resolve_socd_mode`]), axis inversion and the 4-way filter
//! - [`hotkey`]: chord detection ([`HotkeyEngine`])
//! - [`report`]: host report adapters (HID, Switch, XInput, PS4, keyboard)
//! - [`config`]: settings provider trait ([`ConfigStore`]) and defaults
//! - [`input`]: platform seams ([`PinInput`], [`Clock`])
//! - [`gamepad`]: the engine tying it together ([`Gamepad`])
//!
//! # Example
//!
//! ```rust
//! use stickbox_core::{Dpad, SocdCleaner, SocdMode};
//!
//! let mut socd = SocdCleaner::new();
//! assert_eq!(socd.clean(SocdMode::UpPriority, Dpad::UP | Dpad::DOWN), Dpad::UP);
//! assert_eq!(socd.clean(SocdMode::Neutral, Dpad::LEFT | Dpad::RIGHT), Dpad::NONE);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route engine logs through the `log` facade
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod debounce;
pub mod gamepad;
pub mod hotkey;
pub mod input;
pub mod mapping;
pub mod options;
pub mod report;
pub mod socd;
pub mod types;

// Re-export main types at crate root
pub use config::{ConfigStore, StaticConfig, StoreError};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use gamepad::Gamepad;
pub use hotkey::{HotkeyAction, HotkeyEngine, HotkeyEntry, HotkeyList, MAX_HOTKEYS};
pub use input::{Clock, PinInput};
pub use mapping::{MappingTable, PinMapping};
pub use options::{DpadMode, GamepadOptions, InputMode, SocdMode};
pub use report::keyboard::KeyboardMapping;
pub use report::{hat_from_dpad, Reports};
pub use socd::{resolve_socd_mode, FourWayFilter, SocdCleaner};
pub use types::{Action, Aux, Buttons, Dpad, GamepadState, PinLevels, NUM_GPIOS};
