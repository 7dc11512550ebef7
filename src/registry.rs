// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of known devices.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::ModelCatalog;
use crate::device::{Device, DeviceDescriptor, DeviceInfo};
use crate::error::{Error, Result};
use crate::protocol::{SessionConfig, Transport};

/// Outcome of [`DeviceRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The MAC was not known before.
    Added,
    /// The MAC was known with a different identity; the descriptor was
    /// rebuilt.
    Updated,
    /// An equal device was already registered. Its address is refreshed.
    Unchanged,
}

impl Registration {
    /// Returns true unless the device was already registered as is.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Holds the descriptors of known devices, keyed by MAC address.
///
/// The registry owns the [`ModelCatalog`] used to describe devices and is
/// passed explicitly to whatever opens sessions.
///
/// # Examples
///
/// ```
/// use gree_lib::{DeviceInfo, DeviceRegistry, ModelCatalog, Registration};
///
/// let registry = DeviceRegistry::new(ModelCatalog::builtin());
/// let info = DeviceInfo::new("192.168.1.40".parse().unwrap(), "f4911e00aa01", "828211");
///
/// assert_eq!(registry.register(info.clone()).unwrap(), Registration::Added);
/// assert_eq!(registry.register(info).unwrap(), Registration::Unchanged);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug)]
pub struct DeviceRegistry {
    catalog: ModelCatalog,
    devices: RwLock<HashMap<String, DeviceDescriptor>>,
}

impl DeviceRegistry {
    /// Creates an empty registry using the given catalog.
    #[must_use]
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            devices: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Registers a device, building its descriptor from the catalog.
    ///
    /// Devices are deduplicated by [`DeviceInfo`] equality, so a device seen
    /// again at a new address is not reported as changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownModel` if the model is not in the catalog; the
    /// registry is left unchanged.
    pub fn register(&self, info: DeviceInfo) -> Result<Registration> {
        let descriptor = self.catalog.describe(info)?;
        let mac = descriptor.info().mac().to_string();

        let mut devices = self.devices.write();
        let registration = match devices.get(&mac) {
            None => Registration::Added,
            Some(existing) if existing.info() == descriptor.info() => Registration::Unchanged,
            Some(_) => Registration::Updated,
        };

        tracing::debug!(mac = %mac, registration = ?registration, "Registered device");
        devices.insert(mac, descriptor);
        Ok(registration)
    }

    /// Returns the descriptor of a device.
    #[must_use]
    pub fn get(&self, mac: &str) -> Option<DeviceDescriptor> {
        self.devices.read().get(mac).cloned()
    }

    /// Returns whether a device is registered.
    #[must_use]
    pub fn contains(&self, mac: &str) -> bool {
        self.devices.read().contains_key(mac)
    }

    /// Returns all descriptors, ordered by MAC.
    #[must_use]
    pub fn descriptors(&self) -> Vec<DeviceDescriptor> {
        let mut descriptors: Vec<_> = self.devices.read().values().cloned().collect();
        descriptors.sort_by(|a, b| a.info().mac().cmp(b.info().mac()));
        descriptors
    }

    /// Removes a device, returning its descriptor.
    pub fn remove(&self, mac: &str) -> Option<DeviceDescriptor> {
        self.devices.write().remove(mac)
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns true if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    /// Opens an unbound session for a registered device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no device has this MAC.
    pub fn open<T: Transport>(
        &self,
        mac: &str,
        transport: Arc<T>,
        config: SessionConfig,
    ) -> Result<Device<T>> {
        let descriptor = self
            .get(mac)
            .ok_or_else(|| Error::DeviceNotFound(mac.to_string()))?;
        tracing::debug!(device = %descriptor.info(), "Opening device session");
        Ok(Device::with_config(descriptor, transport, config))
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new(ModelCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    fn info(mac: &str, model_id: &str) -> DeviceInfo {
        DeviceInfo::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 40)), mac, model_id)
    }

    #[test]
    fn register_deduplicates_by_identity() {
        let registry = DeviceRegistry::default();
        let a = info("aa01", "828211");

        assert_eq!(registry.register(a.clone()).unwrap(), Registration::Added);
        assert_eq!(registry.register(a.clone()).unwrap(), Registration::Unchanged);

        let moved = a.clone().with_ip(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 77)));
        assert_eq!(registry.register(moved).unwrap(), Registration::Unchanged);
        assert_eq!(
            registry.get("aa01").unwrap().info().ip(),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 77))
        );

        let renamed = a.with_name("Living room");
        assert_eq!(registry.register(renamed).unwrap(), Registration::Updated);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_model_is_not_registered() {
        let registry = DeviceRegistry::default();
        let err = registry.register(info("aa02", "123456")).unwrap_err();
        assert!(matches!(err, Error::UnknownModel(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn descriptors_are_sorted_and_removable() {
        let registry = DeviceRegistry::default();
        registry.register(info("bb", "828211")).unwrap();
        registry.register(info("aa", "828211")).unwrap();

        let macs: Vec<_> = registry
            .descriptors()
            .iter()
            .map(|d| d.info().mac().to_string())
            .collect();
        assert_eq!(macs, vec!["aa", "bb"]);

        assert!(registry.remove("aa").is_some());
        assert!(!registry.contains("aa"));
        assert!(registry.remove("aa").is_none());
    }

    #[test]
    fn registration_change_flag() {
        assert!(Registration::Added.is_changed());
        assert!(Registration::Updated.is_changed());
        assert!(!Registration::Unchanged.is_changed());
    }
}
