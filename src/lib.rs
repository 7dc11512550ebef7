// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `gree_lib` - A Rust library to control Gree appliances.
//!
//! This library provides the device-side session layer for Gree smart fans
//! and similar appliances: key binding, a property cache with dirty
//! tracking, and a feature model that decides per device model which wire
//! properties exist.
//!
//! The encrypted UDP transport and the broadcast scan are pluggable: implement
//! [`Transport`] and [`discovery::Discovery`] for your network stack.
//!
//! # Supported Features
//!
//! - **Binding**: Explicit or negotiated session keys, bound lazily on first use
//! - **State**: Full reads, batched at-most-once pushes of changed properties
//! - **Fan control**: Power, speed percentage, wind mode, oscillation angle, timer
//! - **Models**: A catalog mapping model identifiers to composable features
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use gree_lib::{
//!     DeviceInfo, DeviceRegistry, ModelCatalog, ProtocolError, SessionConfig, Transport,
//!     WireState,
//! };
//! use gree_lib::types::LrAngle;
//!
//! /// Transport answering from a fixed state.
//! struct Loopback;
//!
//! impl Transport for Loopback {
//!     async fn bind(&self, _: &DeviceInfo, _: bool) -> Result<Option<String>, ProtocolError> {
//!         Ok(Some("a3K8Bx5M9y2Z4".to_string()))
//!     }
//!
//!     async fn request_state(
//!         &self,
//!         _: &[&str],
//!         _: &DeviceInfo,
//!         _: &str,
//!     ) -> Result<WireState, ProtocolError> {
//!         let mut state = WireState::new();
//!         state.insert("Pow".to_string(), 0.into());
//!         state.insert("WdSpd".to_string(), 3.into());
//!         Ok(state)
//!     }
//!
//!     async fn send_state(&self, _: &WireState, _: &DeviceInfo, _: &str) -> Result<(), ProtocolError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> gree_lib::Result<()> {
//!     let registry = DeviceRegistry::new(ModelCatalog::builtin());
//!     let info = DeviceInfo::new("192.168.1.40".parse().unwrap(), "f4911e00aa01", "828211");
//!     registry.register(info)?;
//!
//!     let device = registry.open("f4911e00aa01", Arc::new(Loopback), SessionConfig::default())?;
//!
//!     // Binds on first use
//!     device.update_state().await?;
//!     assert_eq!(device.power(), Some(false));
//!
//!     // Local changes are batched into one push
//!     device.turn_on(Some(50), Some(LrAngle::Rotate100)).await?;
//!     assert!(device.dirty().is_empty());
//!
//!     Ok(())
//! }
//! ```

mod capabilities;
mod catalog;
pub mod device;
pub mod discovery;
pub mod error;
mod feature;
mod property;
pub mod protocol;
mod registry;
pub mod state;
pub mod types;

pub use capabilities::Capabilities;
pub use catalog::{ModelCatalog, ModelCatalogBuilder, ModelEntry};
pub use device::{BindState, Device, DeviceDescriptor, DeviceInfo};
pub use error::{DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
pub use feature::{Feature, FeatureBuilder, FeatureSet};
pub use property::Property;
pub use protocol::{SessionConfig, Transport, WireState};
pub use registry::{DeviceRegistry, Registration};
pub use types::{FanMode, FanSpeed, LrAngle, Rotate, Timer, TimerAction};
