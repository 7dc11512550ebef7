// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use gree_lib::discovery::Discovery;
use gree_lib::{
    Device, DeviceInfo, DeviceRegistry, ModelCatalog, ProtocolError, SessionConfig, Transport,
    WireState,
};
use parking_lot::Mutex;
use serde_json::Value;

pub const MAC: &str = "f4:91:1e:00:aa:01";
pub const MODEL: &str = "828211";

/// A transport call as seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Bind { announce: bool },
    Request(Vec<String>),
    Send(WireState),
}

#[derive(Debug, Default)]
struct Inner {
    key: Option<String>,
    state: WireState,
    hid: Option<String>,
    hang_bind: bool,
    hang_request: bool,
    hang_version: bool,
    hang_send: bool,
    calls: Vec<Call>,
}

/// Scriptable in-memory transport that records every call.
///
/// A "hanging" call never completes, so the session deadline fires. Tests
/// using it should run with paused time.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Mutex<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negotiation returns this key.
    pub fn with_key(self, key: &str) -> Self {
        self.inner.lock().key = Some(key.to_string());
        self
    }

    /// Property reads return this object.
    pub fn with_state(self, state: Value) -> Self {
        self.set_state(state);
        self
    }

    /// Version requests return this firmware identifier.
    pub fn with_hid(self, hid: &str) -> Self {
        self.inner.lock().hid = Some(hid.to_string());
        self
    }

    pub fn set_state(&self, state: Value) {
        let Value::Object(state) = state else {
            panic!("state must be a JSON object");
        };
        self.inner.lock().state = state;
    }

    pub fn hang_bind(&self, hang: bool) {
        self.inner.lock().hang_bind = hang;
    }

    pub fn hang_request(&self, hang: bool) {
        self.inner.lock().hang_request = hang;
    }

    /// Hangs only firmware identifier requests.
    pub fn hang_version(&self, hang: bool) {
        self.inner.lock().hang_version = hang;
    }

    pub fn hang_send(&self, hang: bool) {
        self.inner.lock().hang_send = hang;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    pub fn bind_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Bind { .. }))
            .count()
    }

    /// Payloads of every send, in order.
    pub fn sent(&self) -> Vec<WireState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl Transport for MockTransport {
    async fn bind(&self, _: &DeviceInfo, announce: bool) -> Result<Option<String>, ProtocolError> {
        let (hang, key) = {
            let mut inner = self.inner.lock();
            inner.calls.push(Call::Bind { announce });
            (inner.hang_bind, inner.key.clone())
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(key)
    }

    async fn request_state(
        &self,
        codes: &[&str],
        _: &DeviceInfo,
        _: &str,
    ) -> Result<WireState, ProtocolError> {
        let (hang, response) = {
            let mut inner = self.inner.lock();
            inner
                .calls
                .push(Call::Request(codes.iter().map(ToString::to_string).collect()));

            let version_request = codes == ["hid"];
            let response = if version_request {
                let mut response = WireState::new();
                if let Some(hid) = &inner.hid {
                    response.insert("hid".to_string(), Value::from(hid.as_str()));
                }
                response
            } else {
                inner.state.clone()
            };
            let hang = inner.hang_request || (version_request && inner.hang_version);
            (hang, response)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(response)
    }

    async fn send_state(
        &self,
        state: &WireState,
        _: &DeviceInfo,
        _: &str,
    ) -> Result<(), ProtocolError> {
        let hang = {
            let mut inner = self.inner.lock();
            inner.calls.push(Call::Send(state.clone()));
            inner.hang_send
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Discovery returning a fixed list of devices.
#[derive(Debug, Default)]
pub struct MockDiscovery {
    devices: Vec<DeviceInfo>,
    scans: Mutex<Vec<(Duration, Vec<IpAddr>)>>,
}

impl MockDiscovery {
    pub fn new(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices,
            scans: Mutex::new(Vec::new()),
        }
    }

    /// Arguments of every scan, in order.
    pub fn scans(&self) -> Vec<(Duration, Vec<IpAddr>)> {
        self.scans.lock().clone()
    }
}

impl Discovery for MockDiscovery {
    async fn scan(
        &self,
        wait_for: Duration,
        broadcast_addresses: &[IpAddr],
    ) -> Result<Vec<DeviceInfo>, ProtocolError> {
        self.scans
            .lock()
            .push((wait_for, broadcast_addresses.to_vec()));
        Ok(self.devices.clone())
    }
}

pub fn device_info(mac: &str, model_id: &str) -> DeviceInfo {
    DeviceInfo::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 40)), mac, model_id)
}

/// Opens a session for the built-in fan model.
pub fn open_fan(transport: &Arc<MockTransport>) -> Device<MockTransport> {
    open_fan_with(transport, SessionConfig::default())
}

pub fn open_fan_with(transport: &Arc<MockTransport>, config: SessionConfig) -> Device<MockTransport> {
    let registry = DeviceRegistry::new(ModelCatalog::builtin());
    registry
        .register(device_info(MAC, MODEL))
        .expect("built-in model");
    registry
        .open(MAC, Arc::clone(transport), config)
        .expect("registered device")
}
