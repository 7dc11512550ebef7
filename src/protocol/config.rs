// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device session configuration.

use std::time::Duration;

/// Configuration for a device session.
///
/// # Examples
///
/// ```
/// use gree_lib::protocol::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::new()
///     .with_timeout(Duration::from_secs(3))
///     .with_announce(true);
///
/// assert_eq!(config.timeout(), Duration::from_secs(3));
/// assert!(config.announce());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    timeout: Duration,
    announce: bool,
}

impl SessionConfig {
    /// Default deadline for a single transport call.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            announce: false,
        }
    }

    /// Sets the deadline for each transport call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets whether bind requests are announced (broadcast).
    #[must_use]
    pub const fn with_announce(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    /// Returns the per-call deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether bind requests are announced.
    #[must_use]
    pub const fn announce(&self) -> bool {
        self.announce
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.announce());
    }

    #[test]
    fn builder_methods() {
        let config = SessionConfig::new().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert!(!config.announce());
    }
}
