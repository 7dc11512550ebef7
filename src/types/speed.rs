// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type.
//!
//! Gree tower fans expose twelve discrete speed steps. [`FanSpeed`] validates
//! the step and converts to and from a 0-100 percentage the way home
//! automation front-ends present fan speed.

use std::fmt;

use crate::error::ValueError;

/// Fan speed step (1-12).
///
/// # Examples
///
/// ```
/// use gree_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(6).unwrap();
/// assert_eq!(speed.value(), 6);
/// assert_eq!(speed.percentage(), 50);
///
/// assert_eq!(FanSpeed::from_percentage(100).unwrap(), FanSpeed::MAX_SPEED);
/// assert!(FanSpeed::new(13).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Minimum speed step.
    pub const MIN: u8 = 1;

    /// Maximum speed step.
    pub const MAX: u8 = 12;

    /// Number of distinct speed steps.
    pub const COUNT: u8 = Self::MAX - Self::MIN + 1;

    /// Slowest speed.
    pub const MIN_SPEED: Self = Self(Self::MIN);

    /// Fastest speed.
    pub const MAX_SPEED: Self = Self(Self::MAX);

    /// Creates a new fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 12].
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: u16::from(Self::MIN),
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a fan speed, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Converts a percentage into the speed step that covers it.
    ///
    /// The step is the ceiling of `percentage * 12 / 100`; `0` maps to the
    /// slowest step because the fan cannot run at speed zero.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if percentage is above 100.
    pub fn from_percentage(percentage: u8) -> Result<Self, ValueError> {
        if percentage > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(percentage),
            });
        }
        let scaled = u16::from(percentage) * u16::from(Self::COUNT);
        let step = scaled.div_ceil(100);
        // Safe: step is at most COUNT (12)
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self::clamped(step as u8))
    }

    /// Returns the speed as a percentage of the fastest step.
    #[must_use]
    pub const fn percentage(&self) -> u8 {
        // Safe: at most 12 * 100 / 12 = 100
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.0 as u16 * 100 / Self::COUNT as u16) as u8;
        pct
    }

    /// Returns the speed step.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for FanSpeed {
    fn default() -> Self {
        Self::MIN_SPEED
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FanSpeed> for u8 {
    fn from(speed: FanSpeed) -> Self {
        speed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        assert!(FanSpeed::new(0).is_err());
        assert!(FanSpeed::new(1).is_ok());
        assert!(FanSpeed::new(12).is_ok());
        assert!(FanSpeed::new(13).is_err());
    }

    #[test]
    fn clamped_values() {
        assert_eq!(FanSpeed::clamped(0).value(), 1);
        assert_eq!(FanSpeed::clamped(7).value(), 7);
        assert_eq!(FanSpeed::clamped(40).value(), 12);
    }

    #[test]
    fn percentage_of_each_step() {
        assert_eq!(FanSpeed::MIN_SPEED.percentage(), 8);
        assert_eq!(FanSpeed::new(3).unwrap().percentage(), 25);
        assert_eq!(FanSpeed::new(6).unwrap().percentage(), 50);
        assert_eq!(FanSpeed::MAX_SPEED.percentage(), 100);
    }

    #[test]
    fn from_percentage_rounds_up() {
        assert_eq!(FanSpeed::from_percentage(1).unwrap().value(), 1);
        assert_eq!(FanSpeed::from_percentage(9).unwrap().value(), 2);
        assert_eq!(FanSpeed::from_percentage(50).unwrap().value(), 6);
        assert_eq!(FanSpeed::from_percentage(51).unwrap().value(), 7);
        assert_eq!(FanSpeed::from_percentage(100).unwrap().value(), 12);
    }

    #[test]
    fn zero_percent_is_slowest_step() {
        assert_eq!(FanSpeed::from_percentage(0).unwrap(), FanSpeed::MIN_SPEED);
    }

    #[test]
    fn percentage_above_hundred_is_rejected() {
        assert_eq!(
            FanSpeed::from_percentage(101),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn percentage_round_trips_through_step() {
        for step in FanSpeed::MIN..=FanSpeed::MAX {
            let speed = FanSpeed::new(step).unwrap();
            assert_eq!(FanSpeed::from_percentage(speed.percentage()).unwrap(), speed);
        }
    }
}
