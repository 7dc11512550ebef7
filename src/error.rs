// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Gree library.
//!
//! This module provides the error hierarchy for binding, transport calls,
//! value validation, wire decoding and model catalog lookups.
//!
//! Binding failures ([`Error::NotBound`]) and deadlines ([`Error::Timeout`])
//! are always surfaced to the caller and never retried inside the library.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding was attempted but the device returned no session key.
    #[error("device is not bound")]
    NotBound,

    /// A transport call exceeded its deadline.
    #[error("device timed out after {millis} ms")]
    Timeout {
        /// The deadline that expired, in milliseconds.
        millis: u64,
    },

    /// The model identifier is absent from the model catalog.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// No device with this MAC address is registered.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error reported by the transport that is not a timeout.
    #[error("protocol error: {0}")]
    Protocol(ProtocolError),

    /// Error occurred while decoding a wire payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Timeout(millis) => Self::Timeout { millis },
            other => Self::Protocol(other),
        }
    }
}

impl Error {
    /// Returns `true` for a device-timeout failure.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` when binding produced no session key.
    #[must_use]
    pub const fn is_not_bound(&self) -> bool {
        matches!(self, Self::NotBound)
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A wire code does not correspond to any variant of an enumerated value.
    #[error("invalid {kind} code: {code}")]
    InvalidCode {
        /// The enumerated type being decoded.
        kind: &'static str,
        /// The offending code.
        code: i64,
    },

    /// A feature was declared without any required property.
    #[error("feature {0} declares no properties")]
    EmptyFeature(String),
}

/// Errors raised by transport and discovery collaborators.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Communication with the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Errors related to decoding wire payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The wire code is not part of the property table.
    #[error("unknown property: {0}")]
    UnknownProperty(String),
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device does not support the requested capability.
    #[error("device does not support {capability}")]
    UnsupportedCapability {
        /// The capability that is not supported.
        capability: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
