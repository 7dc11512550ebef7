// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device sessions for Gree appliances.
//!
//! A [`Device`] is the stateful client for one physical unit. It owns the
//! session key, a [`PropertyCache`] of last-known values and the set of
//! locally changed properties, and drives reads and pushes through a
//! [`Transport`].
//!
//! # Lifecycle
//!
//! 1. The session starts [`BindState::Unbound`]. Any read or push binds
//!    first; binding failures surface from those calls too.
//! 2. [`Device::update_state`] replaces the whole cache with a fresh read.
//! 3. Setters change the cache and mark properties dirty.
//! 4. [`Device::push_state_update`] sends the current values of the dirty
//!    properties. The dirty set is cleared before the send, so a failed push
//!    is not retried: delivery is at most once.
//!
//! ```ignore
//! use std::sync::Arc;
//! use gree_lib::{DeviceRegistry, ModelCatalog, SessionConfig, types::LrAngle};
//!
//! # async fn example(info: gree_lib::DeviceInfo, transport: Arc<MyTransport>) -> gree_lib::Result<()> {
//! let registry = DeviceRegistry::new(ModelCatalog::builtin());
//! registry.register(info.clone())?;
//!
//! let device = registry.open(info.mac(), transport, SessionConfig::default())?;
//! device.update_state().await?;
//!
//! device.set_percentage(50)?;
//! device.set_oscillation(LrAngle::Rotate100)?;
//! device.push_state_update().await?;
//! # Ok(())
//! # }
//! ```

mod binding;
mod descriptor;
mod firmware;
mod info;

pub use binding::BindState;
pub use descriptor::DeviceDescriptor;
pub use firmware::parse_firmware_version;
pub use info::DeviceInfo;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::capabilities::Capabilities;
use crate::error::{DeviceError, Error, Result};
use crate::property::Property;
use crate::protocol::{SessionConfig, Transport, WireState, with_deadline};
use crate::state::PropertyCache;
use crate::types::{FanMode, FanSpeed, LrAngle, Rotate, Timer, TimerAction};

/// Mutable part of a session.
#[derive(Debug, Default)]
struct Session {
    bind_state: BindState,
    key: Option<String>,
    cache: PropertyCache,
    hid: Option<String>,
    version: Option<String>,
}

/// A session with one Gree device.
///
/// A session is meant to be driven by a single owner, such as a polling
/// coordinator. Its interior state sits behind a lock so the push snapshot
/// stays consistent, but concurrent binds or reads are not coordinated.
#[derive(Debug)]
pub struct Device<T: Transport> {
    descriptor: DeviceDescriptor,
    transport: Arc<T>,
    config: SessionConfig,
    session: RwLock<Session>,
}

impl<T: Transport> Device<T> {
    /// Creates an unbound session with the default configuration.
    #[must_use]
    pub fn new(descriptor: DeviceDescriptor, transport: Arc<T>) -> Self {
        Self::with_config(descriptor, transport, SessionConfig::default())
    }

    /// Creates an unbound session.
    #[must_use]
    pub fn with_config(
        descriptor: DeviceDescriptor,
        transport: Arc<T>,
        config: SessionConfig,
    ) -> Self {
        Self {
            descriptor,
            transport,
            config,
            session: RwLock::new(Session::default()),
        }
    }

    /// Returns the device descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Returns the network identity.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        self.descriptor.info()
    }

    /// Returns the device capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.descriptor.capabilities()
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========== Binding ==========

    /// Returns the binding state.
    #[must_use]
    pub fn bind_state(&self) -> BindState {
        self.session.read().bind_state
    }

    /// Returns true if a session key is held.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.session.read().key.is_some()
    }

    /// Returns the session key, if bound.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        self.session.read().key.clone()
    }

    /// Binds the session.
    ///
    /// With a non-empty `key` the session is bound immediately without any
    /// transport call. Otherwise the key is negotiated with the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Timeout` if the negotiation exceeds the deadline and
    /// `Error::NotBound` if the device returned no key. Either way the
    /// session ends in [`BindState::BindFailed`] without a key.
    pub async fn bind(&self, key: Option<String>) -> Result<()> {
        let info = self.descriptor.info();
        tracing::info!(device = %info, "Starting device binding");

        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.set_bound(key);
            return Ok(());
        }

        self.session.write().bind_state = BindState::Binding;

        let negotiated = with_deadline(
            self.config.timeout(),
            self.transport.bind(info, self.config.announce()),
        )
        .await;

        match negotiated {
            Ok(Some(key)) if !key.is_empty() => {
                self.set_bound(key);
                Ok(())
            }
            Ok(_) => {
                tracing::warn!(mac = %info.mac(), "Device returned no session key");
                self.set_bind_failed();
                Err(Error::NotBound)
            }
            Err(e) => {
                tracing::warn!(mac = %info.mac(), error = %e, "Device binding failed");
                self.set_bind_failed();
                Err(e.into())
            }
        }
    }

    fn set_bound(&self, key: String) {
        tracing::info!(mac = %self.descriptor.info().mac(), "Bound to device");
        let mut session = self.session.write();
        session.key = Some(key);
        session.bind_state = BindState::Bound;
    }

    fn set_bind_failed(&self) {
        let mut session = self.session.write();
        session.key = None;
        session.bind_state = BindState::BindFailed;
    }

    /// Returns the session key, binding first if none is held.
    async fn session_key(&self) -> Result<String> {
        if let Some(key) = self.key() {
            return Ok(key);
        }
        self.bind(None).await?;
        self.key().ok_or(Error::NotBound)
    }

    // ========== Reading ==========

    /// Reads every supported property from the device.
    ///
    /// On success the cache is replaced by the response, discarding values
    /// not present in it, including unpushed local writes. Wire fields that
    /// are not in the property table are dropped. The first successful read
    /// also resolves the firmware version.
    ///
    /// # Errors
    ///
    /// Returns binding errors, or `Error::Timeout` if the device does not
    /// answer the property read or the firmware request in time. On any
    /// error the cache is left unchanged.
    pub async fn update_state(&self) -> Result<()> {
        let key = self.session_key().await?;
        let info = self.descriptor.info();

        tracing::debug!(device = %info, "Updating device properties");

        let codes: Vec<&str> = self
            .descriptor
            .properties()
            .iter()
            .map(Property::code)
            .collect();

        let response = with_deadline(
            self.config.timeout(),
            self.transport.request_state(&codes, info, &key),
        )
        .await?;

        let values = decode_state(response);
        tracing::debug!(mac = %info.mac(), count = values.len(), "Received device properties");

        // The cache only changes once every request of this read succeeded
        if self.hid().is_none() {
            self.request_version().await?;
        }

        self.session.write().cache.replace(values);
        Ok(())
    }

    /// Requests the firmware identifier and derives the firmware version.
    ///
    /// Returns the parsed version; an identifier without a version suffix
    /// yields `None`.
    ///
    /// # Errors
    ///
    /// Returns binding errors or `Error::Timeout`.
    pub async fn request_version(&self) -> Result<Option<String>> {
        let key = self.session_key().await?;
        let info = self.descriptor.info();

        let response = with_deadline(
            self.config.timeout(),
            self.transport
                .request_state(&[Property::Hid.code()], info, &key),
        )
        .await?;

        let Some(hid) = response
            .get(Property::Hid.code())
            .and_then(Value::as_str)
            .filter(|hid| !hid.is_empty())
        else {
            return Ok(None);
        };

        let version = parse_firmware_version(hid);
        tracing::debug!(mac = %info.mac(), hid = %hid, version = ?version, "Resolved firmware");

        let mut session = self.session.write();
        session.hid = Some(hid.to_string());
        session.version.clone_from(&version);
        Ok(version)
    }

    /// Returns the firmware identifier, once resolved.
    #[must_use]
    pub fn hid(&self) -> Option<String> {
        self.session.read().hid.clone()
    }

    /// Returns the firmware version, once resolved.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.session.read().version.clone()
    }

    // ========== Pushing ==========

    /// Pushes pending local changes to the device.
    ///
    /// Does nothing when no property is dirty. Otherwise the current cached
    /// values of the dirty properties are snapshotted, the dirty set is
    /// cleared, and the snapshot is sent. Changes made while the send is in
    /// flight are tracked for the next push. Dirty properties that a read
    /// since removed from the cache are not sent.
    ///
    /// # Errors
    ///
    /// Returns binding errors (the dirty set is then untouched) or
    /// `Error::Timeout`. A timed out push is not retried and its properties
    /// are no longer dirty; mark them again to resend.
    pub async fn push_state_update(&self) -> Result<()> {
        if !self.session.read().cache.is_dirty() {
            return Ok(());
        }

        let key = self.session_key().await?;
        let info = self.descriptor.info();

        let payload = self.session.write().cache.take_dirty();
        if payload.is_empty() {
            return Ok(());
        }

        tracing::debug!(device = %info, count = payload.len(), "Pushing state updates");
        for (code, value) in &payload {
            tracing::debug!(property = %code, value = %value, "Sending remote state update");
        }

        with_deadline(
            self.config.timeout(),
            self.transport.send_state(&payload, info, &key),
        )
        .await?;

        Ok(())
    }

    // ========== Generic Properties ==========

    /// Returns the cached value of a property, if ever read or set.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<Value> {
        self.session.read().cache.get(property).cloned()
    }

    /// Sets a property locally and marks it for the next push.
    ///
    /// Returns `false` without marking anything when the value equals the
    /// cached one.
    pub fn set(&self, property: Property, value: impl Into<Value>) -> bool {
        self.session.write().cache.set(property, value.into())
    }

    /// Returns a copy of all cached property values.
    #[must_use]
    pub fn properties(&self) -> HashMap<Property, Value> {
        self.session.read().cache.values()
    }

    /// Returns the properties awaiting a push.
    #[must_use]
    pub fn dirty(&self) -> Vec<Property> {
        self.session.read().cache.dirty().to_vec()
    }

    fn get_code(&self, property: Property) -> Option<i64> {
        self.get(property).as_ref().and_then(Value::as_i64)
    }

    // ========== Power ==========

    /// Returns whether the device is on.
    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.get_code(Property::Power).map(|v| v != 0)
    }

    /// Switches the device on or off locally.
    pub fn set_power(&self, on: bool) {
        self.set(Property::Power, i64::from(on));
    }

    /// Switches the device on, applies the optional speed and oscillation,
    /// and pushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage is invalid, oscillation is not
    /// supported, or the push fails. Validation happens before any property
    /// is changed.
    pub async fn turn_on(&self, percentage: Option<u8>, oscillation: Option<LrAngle>) -> Result<()> {
        let speed = percentage.map(FanSpeed::from_percentage).transpose()?;
        if let Some(angle) = oscillation {
            self.check_oscillation(angle)?;
        }

        self.set_power(true);
        if let Some(speed) = speed {
            self.set_fan_speed(speed);
        }
        if let Some(angle) = oscillation {
            self.set_oscillation(angle)?;
        }
        self.push_state_update().await
    }

    /// Switches the device off and pushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the push fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.set_power(false);
        self.push_state_update().await
    }

    // ========== Fan Speed ==========

    /// Number of speed steps the fan supports.
    #[must_use]
    pub const fn speed_count(&self) -> u8 {
        FanSpeed::COUNT
    }

    /// Returns the fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        self.get_code(Property::FanSpeed)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| FanSpeed::new(v).ok())
    }

    /// Sets the fan speed locally.
    pub fn set_fan_speed(&self, speed: FanSpeed) {
        self.set(Property::FanSpeed, speed.value());
    }

    /// Returns the fan speed as a percentage.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        self.fan_speed().map(|speed| speed.percentage())
    }

    /// Sets the fan speed from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if percentage is above 100.
    pub fn set_percentage(&self, percentage: u8) -> Result<()> {
        let speed = FanSpeed::from_percentage(percentage)?;
        self.set_fan_speed(speed);
        Ok(())
    }

    // ========== Mode ==========

    /// Returns the wind mode.
    #[must_use]
    pub fn mode(&self) -> Option<FanMode> {
        self.get_code(Property::Mode)
            .and_then(|v| FanMode::from_code(v).ok())
    }

    /// Sets the wind mode locally.
    ///
    /// # Errors
    ///
    /// Returns error if the device doesn't support mode control.
    pub fn set_mode(&self, mode: FanMode) -> Result<()> {
        self.check_capability("mode", self.capabilities().supports_mode())?;
        self.set(Property::Mode, mode.code());
        Ok(())
    }

    // ========== Oscillation ==========

    /// Returns the oscillation switch.
    #[must_use]
    pub fn rotate(&self) -> Option<Rotate> {
        self.get_code(Property::Rotate)
            .and_then(|v| Rotate::from_code(v).ok())
    }

    /// Switches oscillation on or off locally, keeping the angle.
    ///
    /// # Errors
    ///
    /// Returns error if the device doesn't support oscillation.
    pub fn set_rotate(&self, rotate: Rotate) -> Result<()> {
        self.check_capability("oscillation", self.capabilities().supports_rotate())?;
        self.set(Property::Rotate, rotate.code());
        Ok(())
    }

    /// Returns the oscillation angle.
    #[must_use]
    pub fn oscillation(&self) -> Option<LrAngle> {
        self.get_code(Property::LrAngle)
            .and_then(|v| LrAngle::from_code(v).ok())
    }

    /// Sets the oscillation angle locally, switching oscillation on for any
    /// angle but [`LrAngle::Normal`] and off otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the device doesn't support oscillation, or if
    /// `angle` is not [`LrAngle::Normal`] and it doesn't support angles.
    pub fn set_oscillation(&self, angle: LrAngle) -> Result<()> {
        self.check_oscillation(angle)?;
        self.set(Property::Rotate, angle.rotate().code());
        self.set(Property::LrAngle, angle.code());
        Ok(())
    }

    fn check_oscillation(&self, angle: LrAngle) -> Result<()> {
        let caps = self.capabilities();
        self.check_capability("oscillation", caps.supports_rotate())?;
        if angle.is_oscillating() {
            self.check_capability("oscillation angle", caps.supports_angle())?;
        }
        Ok(())
    }

    // ========== Timer ==========

    /// Returns the armed timer, or `None` when no timer is set.
    #[must_use]
    pub fn timer(&self) -> Option<Timer> {
        if self.get_code(Property::TimerOn)? == 0 {
            return None;
        }
        let action = TimerAction::from_code(self.get_code(Property::TimerAction)?).ok()?;
        let hour = u8::try_from(self.get_code(Property::TimerHour)?).ok()?;
        let minute = u8::try_from(self.get_code(Property::TimerMinute)?).ok()?;
        Timer::new(action, hour, minute).ok()
    }

    /// Arms the timer locally.
    ///
    /// # Errors
    ///
    /// Returns error if the device doesn't support the timer.
    pub fn set_timer(&self, timer: Timer) -> Result<()> {
        self.check_capability("timer", self.capabilities().supports_timer())?;
        self.set(Property::TimerOn, 1);
        self.set(Property::TimerAction, timer.action().code());
        self.set(Property::TimerHour, timer.hour());
        self.set(Property::TimerMinute, timer.minute());
        Ok(())
    }

    /// Disarms the timer locally.
    ///
    /// # Errors
    ///
    /// Returns error if the device doesn't support the timer.
    pub fn cancel_timer(&self) -> Result<()> {
        self.check_capability("timer", self.capabilities().supports_timer())?;
        self.set(Property::TimerOn, 0);
        Ok(())
    }

    // ========== Helpers ==========

    /// Checks if a capability is supported.
    // Uses &self for method call syntax consistency, even though it only needs the parameters.
    #[allow(clippy::unused_self)]
    fn check_capability(&self, name: &str, supported: bool) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(Error::Device(DeviceError::UnsupportedCapability {
                capability: name.to_string(),
            }))
        }
    }
}

/// Maps a wire response onto properties, dropping unknown wire codes.
fn decode_state(wire: WireState) -> HashMap<Property, Value> {
    wire.into_iter()
        .filter_map(|(code, value)| match Property::from_code(&code) {
            Ok(property) => Some((property, value)),
            Err(e) => {
                tracing::trace!(error = %e, "Ignoring unrecognized wire field");
                None
            }
        })
        .collect()
}
