// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binding state of a device session.

/// Where a session stands in the key negotiation.
///
/// ```text
/// Unbound --bind(key)--> Bound
/// Unbound --bind()--> Binding --key--> Bound
///                     Binding --timeout / no key--> BindFailed
/// ```
///
/// A failed bind is not retried by the session; the next explicit
/// [`bind`](crate::Device::bind), or any read or push, starts a new attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BindState {
    /// No key has been obtained.
    #[default]
    Unbound,
    /// Key negotiation is in flight.
    Binding,
    /// A session key is held.
    Bound,
    /// The last negotiation timed out or returned no key.
    BindFailed,
}

impl BindState {
    /// Returns true if a session key is held.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound)
    }

    /// Returns true if the last bind attempt failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::BindFailed)
    }
}
