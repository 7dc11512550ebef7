// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capability flags.
//!
//! Capabilities are the semantic half of a [`Feature`](crate::Feature): the
//! high-level controls a feature grants on top of the wire properties it
//! requires. A device's capabilities are the logical OR of the capabilities
//! of all its features, so features may overlap freely.

/// Capabilities granted by a feature or held by a device.
///
/// # Examples
///
/// ```
/// use gree_lib::Capabilities;
///
/// let rotate = Capabilities::NONE.with_rotate();
/// let angle = Capabilities::NONE.with_angle();
///
/// let combined = rotate.union(angle);
/// assert!(combined.rotate);
/// assert!(combined.angle);
/// assert!(!combined.mode);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
// Each boolean represents an independent capability flag; any combination is valid.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Supports switching between normal and sleep wind.
    pub mode: bool,

    /// Supports toggling oscillation.
    pub rotate: bool,

    /// Supports choosing the oscillation angle.
    pub angle: bool,

    /// Supports the scheduled on/off timer.
    pub timer: bool,
}

impl Capabilities {
    /// No capability beyond power and fan speed.
    pub const NONE: Self = Self {
        mode: false,
        rotate: false,
        angle: false,
        timer: false,
    };

    /// Grants mode control.
    #[must_use]
    pub const fn with_mode(mut self) -> Self {
        self.mode = true;
        self
    }

    /// Grants oscillation control.
    #[must_use]
    pub const fn with_rotate(mut self) -> Self {
        self.rotate = true;
        self
    }

    /// Grants angle control.
    #[must_use]
    pub const fn with_angle(mut self) -> Self {
        self.angle = true;
        self
    }

    /// Grants timer control.
    #[must_use]
    pub const fn with_timer(mut self) -> Self {
        self.timer = true;
        self
    }

    /// Combines two capability sets; a flag is set if either side sets it.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            mode: self.mode || other.mode,
            rotate: self.rotate || other.rotate,
            angle: self.angle || other.angle,
            timer: self.timer || other.timer,
        }
    }

    /// Returns whether mode control is supported.
    #[must_use]
    pub const fn supports_mode(&self) -> bool {
        self.mode
    }

    /// Returns whether oscillation can be toggled.
    #[must_use]
    pub const fn supports_rotate(&self) -> bool {
        self.rotate
    }

    /// Returns whether the oscillation angle can be chosen.
    #[must_use]
    pub const fn supports_angle(&self) -> bool {
        self.angle
    }

    /// Returns whether the scheduled timer is supported.
    #[must_use]
    pub const fn supports_timer(&self) -> bool {
        self.timer
    }
}

impl FromIterator<Capabilities> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capabilities>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::union)
    }
}
