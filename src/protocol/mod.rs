// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport seam for communicating with Gree devices.
//!
//! Gree devices speak an encrypted, stateless UDP request/response protocol.
//! This library does not implement the datagram framing or the cipher; it
//! drives any [`Transport`] that does. Each call is an independent request:
//! there is no connection to open or keep alive, and "binding" is only the
//! negotiation of the session key passed to later calls.
//!
//! Every call made through a [`Device`](crate::Device) is subject to the
//! per-call deadline from [`SessionConfig`]. Transports may also report
//! their own [`ProtocolError::Timeout`]; both surface as
//! [`Error::Timeout`](crate::Error::Timeout).

mod config;

pub use config::SessionConfig;

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::device::DeviceInfo;
use crate::error::ProtocolError;

/// A wire payload: wire code to value.
pub type WireState = serde_json::Map<String, Value>;

/// Trait for transports that can exchange state with Gree devices.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Negotiates a session key with the device.
    ///
    /// Returns `None` (or an empty key) when the device answered without
    /// granting a key.
    ///
    /// # Arguments
    ///
    /// * `device` - The device to bind
    /// * `announce` - Whether to broadcast the bind request
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or times out.
    async fn bind(
        &self,
        device: &DeviceInfo,
        announce: bool,
    ) -> Result<Option<String>, ProtocolError>;

    /// Requests the current values of the given wire codes.
    ///
    /// The response may omit requested codes and may contain codes that were
    /// not requested.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or times out.
    async fn request_state(
        &self,
        codes: &[&str],
        device: &DeviceInfo,
        key: &str,
    ) -> Result<WireState, ProtocolError>;

    /// Writes the given values to the device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or times out.
    async fn send_state(
        &self,
        state: &WireState,
        device: &DeviceInfo,
        key: &str,
    ) -> Result<(), ProtocolError>;
}

/// Runs a transport call under a fixed deadline.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, ProtocolError>
where
    F: Future<Output = Result<T, ProtocolError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout(millis(deadline))),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_expires() {
        let result: Result<(), _> = with_deadline(Duration::from_millis(250), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(ProtocolError::Timeout(250))));
    }

    #[tokio::test]
    async fn result_passes_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let result: Result<(), _> = with_deadline(Duration::from_secs(1), async {
            Err(ProtocolError::ConnectionFailed("unreachable".to_string()))
        })
        .await;

        assert!(matches!(result, Err(ProtocolError::ConnectionFailed(_))));
    }
}
