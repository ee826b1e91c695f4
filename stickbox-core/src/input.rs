//! Platform seams: pin snapshots and time.

use crate::types::{Aux, PinLevels};

/// Source of raw pin levels.
///
/// Implementations take one snapshot of every GPIO per call and report a set
/// bit for an active (pressed) pin, after any pull-up inversion.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait PinInput {
    /// Sample every pin once.
    fn read_levels(&mut self) -> PinLevels;

    /// Auxiliary bits (function buttons, add-on inputs). None by default.
    fn read_aux(&mut self) -> Aux {
        Aux::NONE
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Microseconds since boot.
    fn now_us(&self) -> u64;

    /// Milliseconds since boot, truncated to 32 bits.
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1_000) as u32
    }
}

impl<T: PinInput + ?Sized> PinInput for &mut T {
    fn read_levels(&mut self) -> PinLevels {
        (**self).read_levels()
    }

    fn read_aux(&mut self) -> Aux {
        (**self).read_aux()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_us(&self) -> u64 {
            self.0
        }
    }

    struct Pins(PinLevels);

    impl PinInput for Pins {
        fn read_levels(&mut self) -> PinLevels {
            self.0
        }
    }

    #[test]
    fn test_now_ms_derived_from_us() {
        let clock = FixedClock(12_345_678);
        assert_eq!(clock.now_ms(), 12_345);
        assert_eq!((&clock).now_us(), 12_345_678);
    }

    #[test]
    fn test_read_aux_defaults_to_none() {
        let mut pins = Pins(PinLevels::from_pins(&[1]));
        fn sample<P: PinInput>(mut input: P) -> (PinLevels, Aux) {
            (input.read_levels(), input.read_aux())
        }

        let (levels, aux) = sample(&mut pins);
        assert!(levels.is_active(1));
        assert_eq!(aux, Aux::NONE);
    }
}
