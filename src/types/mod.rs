// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Gree device control.
//!
//! Each type maps onto one or more wire properties and validates its value at
//! construction time.
//!
//! # Types
//!
//! - [`FanSpeed`] - Speed step (1-12), convertible to and from a percentage
//! - [`FanMode`] - Normal or sleep wind
//! - [`Rotate`] - Oscillation switch
//! - [`LrAngle`] - Horizontal oscillation angle (off, 60°, 100°, 360°)
//! - [`Timer`] / [`TimerAction`] - Scheduled power on/off

mod fan;
mod speed;
mod timer;

pub use fan::{FanMode, LrAngle, Rotate};
pub use speed::FanSpeed;
pub use timer::{Timer, TimerAction};
