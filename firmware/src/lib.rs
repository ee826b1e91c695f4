//! GPIO arcade controller firmware for RP2040.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples the button GPIOs once per poll tick
//! 2. Runs the [`stickbox_core::Gamepad`] pipeline (debounce, profiles,
//!    SOCD, hotkeys)
//! 3. Sends the report for the active host mode over USB
//!
//! # Hardware Configuration
//!
//! Buttons connect a GPIO to ground; inputs use the internal pull-ups.
//!
//! | Function | GPIO | Function | GPIO |
//! |----------|------|----------|------|
//! | Up       | 2    | L1       | 13   |
//! | Down     | 3    | R1       | 12   |
//! | Right    | 4    | L2       | 9    |
//! | Left     | 5    | R2       | 8    |
//! | B1       | 6    | S1       | 16   |
//! | B2       | 7    | S2       | 17   |
//! | B3       | 10   | L3       | 18   |
//! | B4       | 11   | R3       | 19   |
//! | A1       | 20   | A2       | 21   |
//! | LED      | 25   |          |      |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Poll Task**: Runs one engine tick per [`POLL_INTERVAL_US`] and signals the report
//! - **Output Task**: Receives report signals and writes them to the HID endpoint
//!
//! Communication between tasks uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, so the host always gets the most recent report.
//!
//! # Modules
//!
//! - [`gpio_input`]: pin snapshot provider ([`GpioInput`]) and clock ([`EmbassyClock`])
//! - [`usb_output`]: per-mode HID descriptors and output ([`UsbReportOutput`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`fast-poll`**: Poll every 100 us instead of every 1 ms

#![no_std]

pub use stickbox_core::{
    Action, Clock, ConfigStore, Gamepad, GamepadOptions, HotkeyAction, InputMode, PinInput,
    PinLevels, StaticConfig, StoreError,
};

pub mod gpio_input;
pub mod usb_output;

pub use gpio_input::{EmbassyClock, GpioInput};
pub use usb_output::{
    configure_usb_hid, report_descriptor, usb_ids, OutputError, Report, ReportRequestHandler,
    UsbReportOutput,
};

/// Default poll period.
pub const POLL_INTERVAL_US: u64 = 1_000;
/// Poll period with the `fast-poll` feature.
pub const POLL_INTERVAL_US_FAST: u64 = 100;

/// Poll period selected at build time.
#[must_use]
pub const fn poll_interval_us() -> u64 {
    if cfg!(feature = "fast-poll") {
        POLL_INTERVAL_US_FAST
    } else {
        POLL_INTERVAL_US
    }
}
