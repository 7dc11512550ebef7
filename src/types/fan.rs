// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan mode and oscillation types.

use std::fmt;

use crate::error::ValueError;

/// Wind mode of a Gree fan.
///
/// # Examples
///
/// ```
/// use gree_lib::types::FanMode;
///
/// assert_eq!(FanMode::Sleep.code(), 2);
/// assert_eq!(FanMode::from_code(0).unwrap(), FanMode::Normal);
/// assert!(FanMode::from_code(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum FanMode {
    /// Normal wind.
    #[default]
    Normal,
    /// Sleep wind.
    Sleep,
}

impl FanMode {
    /// Returns the wire value.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::Sleep => 2,
        }
    }

    /// Decodes a wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCode` for values other than 0 and 2.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Normal),
            2 => Ok(Self::Sleep),
            _ => Err(ValueError::InvalidCode {
                kind: "fan mode",
                code,
            }),
        }
    }

    /// Returns the direction label used by fan front-ends.
    #[must_use]
    pub const fn direction(&self) -> &'static str {
        match self {
            Self::Normal => "forward",
            Self::Sleep => "reverse",
        }
    }

    /// Maps a direction label onto a mode; anything but `forward` selects sleep.
    #[must_use]
    pub fn from_direction(direction: &str) -> Self {
        if direction == "forward" {
            Self::Normal
        } else {
            Self::Sleep
        }
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("Normal"),
            Self::Sleep => f.write_str("Sleep"),
        }
    }
}

/// Oscillation switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Rotate {
    /// Fixed direction.
    #[default]
    Normal,
    /// Oscillating.
    Rotate,
}

impl Rotate {
    /// Returns the wire value.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::Rotate => 1,
        }
    }

    /// Decodes a wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCode` for values other than 0 and 1.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Rotate),
            _ => Err(ValueError::InvalidCode {
                kind: "rotate",
                code,
            }),
        }
    }
}

impl From<bool> for Rotate {
    fn from(value: bool) -> Self {
        if value { Self::Rotate } else { Self::Normal }
    }
}

/// Horizontal oscillation angle.
///
/// The wire codes are not degrees: `12` means 60°, `20` means 100° and `72`
/// means a full turn.
///
/// # Examples
///
/// ```
/// use gree_lib::types::LrAngle;
///
/// assert_eq!(LrAngle::Rotate100.code(), 20);
/// assert_eq!(LrAngle::Rotate360.degrees(), 360);
/// assert!(!LrAngle::Normal.is_oscillating());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum LrAngle {
    /// Oscillation off.
    #[default]
    Normal,
    /// 60° sweep.
    Rotate60,
    /// 100° sweep.
    Rotate100,
    /// Full 360° turn.
    Rotate360,
}

impl LrAngle {
    /// Every angle, in the order front-ends list them.
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::Rotate60,
        Self::Rotate100,
        Self::Rotate360,
    ];

    /// Returns the wire value.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::Rotate60 => 12,
            Self::Rotate100 => 20,
            Self::Rotate360 => 72,
        }
    }

    /// Decodes a wire value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCode` for unknown angle codes.
    pub const fn from_code(code: i64) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Normal),
            12 => Ok(Self::Rotate60),
            20 => Ok(Self::Rotate100),
            72 => Ok(Self::Rotate360),
            _ => Err(ValueError::InvalidCode {
                kind: "angle",
                code,
            }),
        }
    }

    /// Returns the sweep in degrees, `0` when oscillation is off.
    #[must_use]
    pub const fn degrees(&self) -> u16 {
        match self {
            Self::Normal => 0,
            Self::Rotate60 => 60,
            Self::Rotate100 => 100,
            Self::Rotate360 => 360,
        }
    }

    /// Returns `true` for any angle other than [`LrAngle::Normal`].
    #[must_use]
    pub const fn is_oscillating(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Returns the oscillation switch value that goes with this angle.
    #[must_use]
    pub const fn rotate(&self) -> Rotate {
        if self.is_oscillating() {
            Rotate::Rotate
        } else {
            Rotate::Normal
        }
    }
}

impl fmt::Display for LrAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("off"),
            other => write!(f, "{}°", other.degrees()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_mode_codes() {
        for mode in [FanMode::Normal, FanMode::Sleep] {
            assert_eq!(FanMode::from_code(mode.code()), Ok(mode));
        }
        assert_eq!(
            FanMode::from_code(1),
            Err(ValueError::InvalidCode {
                kind: "fan mode",
                code: 1
            })
        );
    }

    #[test]
    fn fan_mode_direction() {
        assert_eq!(FanMode::from_direction("forward"), FanMode::Normal);
        assert_eq!(FanMode::from_direction("reverse"), FanMode::Sleep);
        assert_eq!(FanMode::Sleep.direction(), "reverse");
    }

    #[test]
    fn rotate_codes() {
        assert_eq!(Rotate::from_code(1), Ok(Rotate::Rotate));
        assert_eq!(Rotate::from(false), Rotate::Normal);
        assert!(Rotate::from_code(2).is_err());
    }

    #[test]
    fn angle_codes() {
        for angle in LrAngle::ALL {
            assert_eq!(LrAngle::from_code(angle.code()), Ok(angle));
        }
        assert!(LrAngle::from_code(60).is_err());
    }

    #[test]
    fn angle_drives_rotate_switch() {
        assert_eq!(LrAngle::Normal.rotate(), Rotate::Normal);
        assert_eq!(LrAngle::Rotate60.rotate(), Rotate::Rotate);
        assert_eq!(LrAngle::Rotate360.rotate(), Rotate::Rotate);
    }

    #[test]
    fn angle_display() {
        assert_eq!(LrAngle::Normal.to_string(), "off");
        assert_eq!(LrAngle::Rotate100.to_string(), "100°");
    }
}
