// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device descriptor: identity plus composed feature set.

use crate::capabilities::Capabilities;
use crate::feature::{Feature, FeatureSet};
use crate::property::Property;

use super::DeviceInfo;

/// A device's identity together with the wire properties it supports.
///
/// Descriptors are normally created by
/// [`ModelCatalog::describe`](crate::ModelCatalog::describe) and do not change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    info: DeviceInfo,
    type_name: String,
    features: FeatureSet,
}

impl DeviceDescriptor {
    /// Creates a descriptor by composing the given features.
    #[must_use]
    pub fn new(info: DeviceInfo, type_name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            info,
            type_name: type_name.into(),
            features: FeatureSet::new(features),
        }
    }

    /// Returns the network identity.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model_id(&self) -> &str {
        self.info.model_id()
    }

    /// Returns the human readable type name, e.g. `FLZ-09X67Bg`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the composed feature set.
    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Returns the wire properties the device supports.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        self.features.properties()
    }

    /// Returns the combined capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.features.capabilities()
    }

    /// Returns whether the device supports the property.
    #[must_use]
    pub fn supports(&self, property: Property) -> bool {
        self.features.supports(property)
    }
}
