//! GPIO pin snapshot provider and Embassy-backed clock.
//!
//! Buttons short a pulled-up GPIO to ground, so a low level reads as active.
//! Pins are sampled back-to-back in one call; the engine never sees a
//! partially updated snapshot.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use stickbox_core::{Clock, PinInput, PinLevels, NUM_GPIOS};

/// Error returned by [`GpioInput::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum GpioError {
    /// GPIO number is outside bank 0.
    InvalidPin,
    /// Every slot is taken.
    Full,
}

/// Reads a set of active-low input pins into a [`PinLevels`] snapshot.
pub struct GpioInput<P> {
    pins: Vec<(u8, P), { NUM_GPIOS as usize }>,
}

impl<P: InputPin> GpioInput<P> {
    /// Create an empty provider.
    #[must_use]
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Register `pin` as GPIO number `gpio`.
    pub fn add(&mut self, gpio: u8, pin: P) -> Result<(), GpioError> {
        if gpio >= NUM_GPIOS {
            return Err(GpioError::InvalidPin);
        }
        self.pins.push((gpio, pin)).map_err(|_| GpioError::Full)
    }

    /// Number of registered pins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<P: InputPin> Default for GpioInput<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> PinInput for GpioInput<P> {
    fn read_levels(&mut self) -> PinLevels {
        self.pins
            .iter_mut()
            .fold(PinLevels::NONE, |levels, (gpio, pin)| {
                // A read error counts as released.
                levels.with(*gpio, pin.is_low().unwrap_or(false))
            })
    }
}

/// [`Clock`] backed by the Embassy time driver.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }

    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
