// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.
//!
//! [`PropertyCache`] holds the last-known property values of a device and the
//! set of properties changed locally but not yet pushed. It performs no I/O;
//! [`Device`](crate::Device) drives it from transport reads and writes.

mod property_cache;

pub use property_cache::PropertyCache;
