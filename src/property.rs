// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic device properties and their wire codes.
//!
//! Every request and response exchanged with a Gree device names its fields
//! by a short wire code (`"Pow"`, `"WdSpd"`, ...). [`Property`] is the closed
//! table of codes this library understands. The mapping is total in both
//! directions and never changes at runtime.
//!
//! # Examples
//!
//! ```
//! use gree_lib::Property;
//!
//! assert_eq!(Property::FanSpeed.code(), "WdSpd");
//! assert_eq!(Property::from_code("LRAngle"), Ok(Property::LrAngle));
//! assert!(Property::from_code("Blow").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A property tracked on a Gree device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Power switch, `0` off and `1` on.
    Power,
    /// Device name as stored on the unit.
    Name,
    /// Device IP address as reported by the unit.
    Host,
    /// Fan speed, `1` to `12`.
    FanSpeed,
    /// Fan mode, `0` normal wind and `2` sleep wind.
    Mode,
    /// Oscillation switch, `1` oscillating and `0` fixed.
    Rotate,
    /// Horizontal oscillation angle code.
    LrAngle,
    /// Whether the timer is armed.
    TimerOn,
    /// What the timer does when it fires, `0` off and `1` on.
    TimerAction,
    /// Timer hours.
    TimerHour,
    /// Timer minutes.
    TimerMinute,
    /// Favourite scene execution state.
    Estate,
    /// Fault flags.
    JFerr,
    /// Firmware identifier, used to derive the firmware version.
    Hid,
}

impl Property {
    /// Every property in the table.
    pub const ALL: [Self; 14] = [
        Self::Power,
        Self::Name,
        Self::Host,
        Self::FanSpeed,
        Self::Mode,
        Self::Rotate,
        Self::LrAngle,
        Self::TimerOn,
        Self::TimerAction,
        Self::TimerHour,
        Self::TimerMinute,
        Self::Estate,
        Self::JFerr,
        Self::Hid,
    ];

    /// Returns the wire code used in request and response payloads.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Power => "Pow",
            Self::Name => "name",
            Self::Host => "host",
            Self::FanSpeed => "WdSpd",
            Self::Mode => "Mod",
            Self::Rotate => "Rotate",
            Self::LrAngle => "LRAngle",
            Self::TimerOn => "TmrOn",
            Self::TimerAction => "TmrAction",
            Self::TimerHour => "TmrHour",
            Self::TimerMinute => "TmrMin",
            Self::Estate => "estate",
            Self::JFerr => "JFerr",
            Self::Hid => "hid",
        }
    }

    /// Looks up the property for a wire code.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownProperty` if the code is not in the table.
    pub fn from_code(code: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| ParseError::UnknownProperty(code.to_string()))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Property {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code).map_err(serde::de::Error::custom)
    }
}
