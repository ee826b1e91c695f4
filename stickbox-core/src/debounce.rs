//! Per-pin debounce filter.
//!
//! A level change is only accepted once it has been observed continuously
//! for the whole debounce window. Contact bounce shorter than the window
//! never reaches the stable output.

use crate::types::{PinLevels, NUM_GPIOS};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u8 = 5;

/// Filter state for one pin.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinFilter {
    stable: bool,
    pending: bool,
    since_us: u64,
}

impl PinFilter {
    /// Feed one sample and return the stable level.
    #[inline]
    pub fn update(&mut self, level: bool, now_us: u64, window_us: u64) -> bool {
        if level == self.stable {
            self.pending = level;
            return self.stable;
        }
        if level != self.pending {
            self.pending = level;
            self.since_us = now_us;
        }
        if now_us.wrapping_sub(self.since_us) >= window_us {
            self.stable = level;
        }
        self.stable
    }

    /// Last accepted level.
    #[inline]
    #[must_use]
    pub const fn stable(&self) -> bool {
        self.stable
    }
}

/// Debounce filters for every GPIO.
///
/// Only pins in the watched set are filtered; everything else reads low.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window_us: u64,
    watched: u32,
    filters: [PinFilter; NUM_GPIOS as usize],
}

impl Debouncer {
    /// Create a debouncer with the given window, watching the pins in `watched`.
    #[must_use]
    pub fn new(window_ms: u8, watched: u32) -> Self {
        Self {
            window_us: u64::from(window_ms) * 1_000,
            watched,
            filters: [PinFilter::default(); NUM_GPIOS as usize],
        }
    }

    /// Debounce window in microseconds.
    #[inline]
    #[must_use]
    pub const fn window_us(&self) -> u64 {
        self.window_us
    }

    /// Replace the watched pin set. Filters of pins leaving the set are reset.
    pub fn watch(&mut self, watched: u32) {
        for (pin, filter) in self.filters.iter_mut().enumerate() {
            if watched & (1 << pin) == 0 {
                *filter = PinFilter::default();
            }
        }
        self.watched = watched;
    }

    /// Advance every watched filter with a raw snapshot taken at `now_us`.
    pub fn debounce(&mut self, raw: PinLevels, now_us: u64) -> PinLevels {
        let mut stable = PinLevels::NONE;
        for (pin, filter) in self.filters.iter_mut().enumerate() {
            let pin = pin as u8;
            if self.watched & (1 << pin) == 0 {
                continue;
            }
            if filter.update(raw.is_active(pin), now_us, self.window_us) {
                stable = stable.with(pin, true);
            }
        }
        stable
    }

    /// Current stable levels without advancing the filters.
    #[must_use]
    pub fn stable(&self) -> PinLevels {
        self.filters
            .iter()
            .enumerate()
            .filter(|(pin, filter)| self.watched & (1 << pin) != 0 && filter.stable())
            .fold(PinLevels::NONE, |levels, (pin, _)| levels.with(pin as u8, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000;

    #[test]
    fn test_press_accepted_after_window() {
        let mut filter = PinFilter::default();
        let window = 5 * MS;

        assert!(!filter.update(true, 0, window));
        assert!(!filter.update(true, 4 * MS, window));
        assert!(filter.update(true, 5 * MS, window));
        assert!(filter.update(true, 6 * MS, window));
    }

    #[test]
    fn test_glitch_shorter_than_window_rejected() {
        let mut filter = PinFilter::default();
        let window = 5 * MS;

        for t in 0..20 {
            // Toggles every 2 ms, never stable for 5 ms.
            let level = (t / 2) % 2 == 0;
            assert!(!filter.update(level, t * MS, window), "tick {}", t);
        }
    }

    #[test]
    fn test_release_also_debounced() {
        let mut filter = PinFilter::default();
        let window = 5 * MS;
        filter.update(true, 0, window);
        assert!(filter.update(true, 5 * MS, window));

        assert!(filter.update(false, 6 * MS, window));
        assert!(filter.update(true, 7 * MS, window));
        assert!(filter.update(false, 8 * MS, window));
        assert!(filter.update(false, 12 * MS, window));
        assert!(!filter.update(false, 13 * MS, window));
    }

    #[test]
    fn test_zero_window_accepts_immediately() {
        let mut filter = PinFilter::default();
        assert!(filter.update(true, 100, 0));
        assert!(!filter.update(false, 101, 0));
    }

    #[test]
    fn test_unwatched_pins_read_low() {
        let mut debouncer = Debouncer::new(0, 1 << 3);
        let stable = debouncer.debounce(PinLevels::from_pins(&[3, 4]), 0);
        assert!(stable.is_active(3));
        assert!(!stable.is_active(4));
        assert_eq!(debouncer.stable(), stable);
    }

    #[test]
    fn test_watch_resets_dropped_pins() {
        let mut debouncer = Debouncer::new(0, (1 << 3) | (1 << 4));
        debouncer.debounce(PinLevels::from_pins(&[3, 4]), 0);
        debouncer.watch(1 << 3);
        debouncer.watch((1 << 3) | (1 << 4));
        assert_eq!(debouncer.stable(), PinLevels::from_pins(&[3]));
    }

    #[test]
    fn test_default_window() {
        let debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS, 0);
        assert_eq!(debouncer.window_us(), 5 * MS);
    }
}
