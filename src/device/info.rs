// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Network identity of a Gree device.

use std::fmt;
use std::net::IpAddr;

/// Identifies and locates a physical Gree device.
///
/// Usually produced by discovery. When the device reports no name, the name
/// defaults to the MAC address without separators.
///
/// Two infos are equal when MAC, name, brand, model, version and model id
/// match; address and port are ignored so a device that moved on the network
/// is still recognised.
///
/// # Examples
///
/// ```
/// use gree_lib::DeviceInfo;
///
/// let info = DeviceInfo::new("192.168.1.40".parse().unwrap(), "f4:91:1e:00:aa:01", "828211");
/// assert_eq!(info.name(), "f4911e00aa01");
/// assert_eq!(info.port(), DeviceInfo::DEFAULT_PORT);
///
/// let moved = info.clone().with_ip("192.168.1.41".parse().unwrap());
/// assert_eq!(info, moved);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(from = "StoredDeviceInfo")]
pub struct DeviceInfo {
    ip: IpAddr,
    port: u16,
    mac: String,
    name: String,
    model_id: String,
    brand: Option<String>,
    model: Option<String>,
    version: Option<String>,
}

impl DeviceInfo {
    /// Port Gree devices listen on.
    pub const DEFAULT_PORT: u16 = 7000;

    /// Creates a device info with the default port and a MAC-derived name.
    #[must_use]
    pub fn new(ip: IpAddr, mac: impl Into<String>, model_id: impl Into<String>) -> Self {
        let mac = mac.into();
        let name = mac.replace(':', "");
        Self {
            ip,
            port: Self::DEFAULT_PORT,
            mac,
            name,
            model_id: model_id.into(),
            brand: None,
            model: None,
            version: None,
        }
    }

    /// Sets the IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = ip;
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the device name; an empty name keeps the MAC-derived default.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
        self
    }

    /// Sets the brand string.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the model string.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the firmware version string reported at discovery.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns the IP address.
    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the MAC address as reported.
    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model identifier used for catalog lookup.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the brand, if reported.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// Returns the model string, if reported.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the firmware version reported at discovery, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Serialized form of [`DeviceInfo`]; loading it applies the same name
/// fallback as [`DeviceInfo::with_name`].
#[derive(serde::Deserialize)]
struct StoredDeviceInfo {
    ip: IpAddr,
    #[serde(default = "default_port")]
    port: u16,
    mac: String,
    #[serde(default)]
    name: String,
    model_id: String,
    brand: Option<String>,
    model: Option<String>,
    version: Option<String>,
}

const fn default_port() -> u16 {
    DeviceInfo::DEFAULT_PORT
}

impl From<StoredDeviceInfo> for DeviceInfo {
    fn from(stored: StoredDeviceInfo) -> Self {
        let mut info = Self::new(stored.ip, stored.mac, stored.model_id)
            .with_port(stored.port)
            .with_name(stored.name);
        info.brand = stored.brand;
        info.model = stored.model;
        info.version = stored.version;
        info
    }
}

impl PartialEq for DeviceInfo {
    fn eq(&self, other: &Self) -> bool {
        self.mac == other.mac
            && self.name == other.name
            && self.brand == other.brand
            && self.model == other.model
            && self.version == other.version
            && self.model_id == other.model_id
    }
}

impl Eq for DeviceInfo {}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device: {} {} @ {}:{} (mac: {})",
            self.model_id, self.name, self.ip, self.port, self.mac
        )
    }
}
