// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheduled on/off timer.

use std::fmt;

use crate::error::ValueError;

/// What the device does when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimerAction {
    /// Switch the device off.
    Off,
    /// Switch the device on.
    On,
}

impl TimerAction {
    /// Returns the wire value.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Decodes a wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCode` for values other than 0 and 1.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            _ => Err(ValueError::InvalidCode {
                kind: "timer action",
                code,
            }),
        }
    }
}

/// An armed timer: an action and the delay after which it runs.
///
/// # Examples
///
/// ```
/// use gree_lib::types::{Timer, TimerAction};
///
/// let timer = Timer::new(TimerAction::Off, 1, 30).unwrap();
/// assert_eq!(timer.hour(), 1);
/// assert_eq!(timer.minute(), 30);
///
/// assert!(Timer::new(TimerAction::On, 24, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Timer {
    action: TimerAction,
    hour: u8,
    minute: u8,
}

impl Timer {
    /// Maximum hour value.
    pub const MAX_HOUR: u8 = 23;

    /// Maximum minute value.
    pub const MAX_MINUTE: u8 = 59;

    /// Creates a new timer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if hour exceeds 23 or minute exceeds 59.
    pub fn new(action: TimerAction, hour: u8, minute: u8) -> Result<Self, ValueError> {
        if hour > Self::MAX_HOUR {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX_HOUR),
                actual: u16::from(hour),
            });
        }
        if minute > Self::MAX_MINUTE {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX_MINUTE),
                actual: u16::from(minute),
            });
        }
        Ok(Self {
            action,
            hour,
            minute,
        })
    }

    /// Returns the action.
    #[must_use]
    pub const fn action(&self) -> TimerAction {
        self.action
    }

    /// Returns the hours component of the delay.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minutes component of the delay.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            TimerAction::Off => "off",
            TimerAction::On => "on",
        };
        write!(f, "{action} in {}h{:02}", self.hour, self.minute)
    }
}
