// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device discovery for Gree devices.
//!
//! Gree devices answer a UDP broadcast scan with their identity. This library
//! does not implement the scan itself; it drives any [`Discovery`] that does
//! and feeds the results into a [`DeviceRegistry`].
//!
//! # Examples
//!
//! ```ignore
//! use gree_lib::DeviceRegistry;
//! use gree_lib::discovery::{DiscoveryOptions, discover_devices};
//! use std::time::Duration;
//!
//! # async fn example(scanner: MyScanner) -> gree_lib::Result<()> {
//! let registry = DeviceRegistry::default();
//! let options = DiscoveryOptions::new().with_timeout(Duration::from_secs(5));
//!
//! let found = discover_devices(&scanner, &registry, &options).await?;
//! for descriptor in &found {
//!     println!("{}", descriptor.info());
//! }
//! # Ok(())
//! # }
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::device::{DeviceDescriptor, DeviceInfo};
use crate::error::{Error, ProtocolError, Result};
use crate::registry::DeviceRegistry;

/// Default discovery timeout.
const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default broadcast address.
static DEFAULT_BROADCAST: [IpAddr; 1] = [IpAddr::V4(Ipv4Addr::BROADCAST)];

/// Trait for network scanners that find Gree devices.
#[allow(async_fn_in_trait)]
pub trait Discovery {
    /// Broadcasts a scan request and collects answers for `wait_for`.
    ///
    /// # Arguments
    ///
    /// * `wait_for` - How long to collect answers
    /// * `broadcast_addresses` - Addresses to send the scan request to
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the scan could not be sent.
    async fn scan(
        &self,
        wait_for: Duration,
        broadcast_addresses: &[IpAddr],
    ) -> std::result::Result<Vec<DeviceInfo>, ProtocolError>;
}

/// Options for device discovery.
///
/// # Examples
///
/// ```
/// use gree_lib::discovery::DiscoveryOptions;
/// use std::time::Duration;
///
/// let options = DiscoveryOptions::new()
///     .with_timeout(Duration::from_secs(3))
///     .with_broadcast_address("192.168.1.255".parse().unwrap());
///
/// assert_eq!(options.timeout(), Duration::from_secs(3));
/// assert_eq!(options.broadcast_addresses().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// How long to listen for answers.
    timeout: Option<Duration>,
    /// Where to send the scan request (default: 255.255.255.255).
    broadcast_addresses: Vec<IpAddr>,
}

impl DiscoveryOptions {
    /// Creates a new `DiscoveryOptions` with default settings.
    ///
    /// Default timeout is 10 seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the discovery timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a broadcast address, replacing the default one.
    #[must_use]
    pub fn with_broadcast_address(mut self, address: IpAddr) -> Self {
        if !self.broadcast_addresses.contains(&address) {
            self.broadcast_addresses.push(address);
        }
        self
    }

    /// Returns the discovery timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_DISCOVERY_TIMEOUT)
    }

    /// Returns the broadcast addresses to scan.
    #[must_use]
    pub fn broadcast_addresses(&self) -> &[IpAddr] {
        if self.broadcast_addresses.is_empty() {
            &DEFAULT_BROADCAST
        } else {
            &self.broadcast_addresses
        }
    }
}

/// Scans the network and registers every supported device found.
///
/// Devices whose model is not in the registry's catalog are skipped with a
/// warning.
///
/// Returns the descriptors of devices that were added or changed; devices
/// already registered as is are not returned again.
///
/// # Errors
///
/// Returns error if the scan fails.
pub async fn discover_devices<D: Discovery>(
    discovery: &D,
    registry: &DeviceRegistry,
    options: &DiscoveryOptions,
) -> Result<Vec<DeviceDescriptor>> {
    tracing::info!(timeout = ?options.timeout(), "Starting device discovery");

    let found = discovery
        .scan(options.timeout(), options.broadcast_addresses())
        .await?;

    let mut discovered = Vec::new();
    for info in found {
        let mac = info.mac().to_string();
        match registry.register(info) {
            Ok(registration) if registration.is_changed() => {
                if let Some(descriptor) = registry.get(&mac) {
                    tracing::info!(device = %descriptor.info(), "Discovered device");
                    discovered.push(descriptor);
                }
            }
            Ok(_) => tracing::debug!(mac = %mac, "Device already known"),
            Err(Error::UnknownModel(model)) => {
                tracing::warn!(mac = %mac, model = %model, "Skipping unsupported device model");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(count = discovered.len(), "Discovery complete");
    Ok(discovered)
}

/// Returns whether any device answers a scan.
///
/// # Errors
///
/// Returns error if the scan fails.
pub async fn has_devices<D: Discovery>(discovery: &D, options: &DiscoveryOptions) -> Result<bool> {
    let found = discovery
        .scan(options.timeout(), options.broadcast_addresses())
        .await?;
    Ok(!found.is_empty())
}
