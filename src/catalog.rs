// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model catalog: model identifier to device template.
//!
//! The catalog is the only place that knows which features a model has.
//! Supporting a new model means adding a row, never branching on the model
//! identifier elsewhere.
//!
//! # Examples
//!
//! ```
//! use gree_lib::{DeviceInfo, Feature, ModelCatalog};
//!
//! let catalog = ModelCatalog::builtin()
//!     .into_builder()
//!     .model("900001", "FD-40", vec![Feature::base(), Feature::timer()])
//!     .build();
//!
//! let info = DeviceInfo::new("10.0.0.7".parse().unwrap(), "f4911e00aa02", "900001");
//! let descriptor = catalog.describe(info).unwrap();
//! assert!(descriptor.capabilities().supports_timer());
//! ```

use std::collections::BTreeMap;

use crate::device::{DeviceDescriptor, DeviceInfo};
use crate::error::{Error, Result};
use crate::feature::Feature;

/// Catalog row for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    model_id: String,
    type_name: String,
    features: Vec<Feature>,
}

impl ModelEntry {
    /// Creates a catalog row.
    #[must_use]
    pub fn new(
        model_id: impl Into<String>,
        type_name: impl Into<String>,
        features: Vec<Feature>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            type_name: type_name.into(),
            features,
        }
    }

    /// Returns the model identifier.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the display type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the declared features in catalog order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Builds a descriptor for a device of this model.
    #[must_use]
    pub fn describe(&self, info: DeviceInfo) -> DeviceDescriptor {
        DeviceDescriptor::new(info, self.type_name.clone(), self.features.clone())
    }
}

/// Lookup table from model identifier to [`ModelEntry`].
///
/// Lookups are exact matches. An unrecognized identifier is an error, never a
/// fallback to some default feature set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelCatalog {
    /// Returns the catalog of models supported out of the box.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder()
            .model(
                "828211",
                "FLZ-09X67Bg",
                vec![
                    Feature::base(),
                    Feature::mode(),
                    Feature::fan_rotate_with_angle(),
                ],
            )
            .build()
    }

    /// Creates a builder for an empty catalog.
    #[must_use]
    pub fn builder() -> ModelCatalogBuilder {
        ModelCatalogBuilder::default()
    }

    /// Turns this catalog into a builder to add or replace rows.
    #[must_use]
    pub fn into_builder(self) -> ModelCatalogBuilder {
        ModelCatalogBuilder {
            entries: self.entries,
        }
    }

    /// Looks up a model.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownModel` if the model is not in the catalog.
    pub fn lookup(&self, model_id: &str) -> Result<&ModelEntry> {
        self.entries
            .get(model_id)
            .ok_or_else(|| Error::UnknownModel(model_id.to_string()))
    }

    /// Builds the descriptor for a device from its model row.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownModel` if the device's model is not in the
    /// catalog.
    pub fn describe(&self, info: DeviceInfo) -> Result<DeviceDescriptor> {
        let entry = self.lookup(info.model_id())?;
        Ok(entry.describe(info))
    }

    /// Returns whether the model is known.
    #[must_use]
    pub fn contains(&self, model_id: &str) -> bool {
        self.entries.contains_key(model_id)
    }

    /// Returns all rows ordered by model identifier.
    pub fn entries(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.values()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`ModelCatalog`].
#[derive(Debug, Default)]
pub struct ModelCatalogBuilder {
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelCatalogBuilder {
    /// Adds a row, replacing any row for the same model.
    #[must_use]
    pub fn entry(mut self, entry: ModelEntry) -> Self {
        if let Some(previous) = self.entries.insert(entry.model_id.clone(), entry) {
            tracing::debug!(model = %previous.model_id, "Replacing catalog row");
        }
        self
    }

    /// Adds a row from its parts.
    #[must_use]
    pub fn model(
        self,
        model_id: impl Into<String>,
        type_name: impl Into<String>,
        features: Vec<Feature>,
    ) -> Self {
        self.entry(ModelEntry::new(model_id, type_name, features))
    }

    /// Builds the catalog.
    #[must_use]
    pub fn build(self) -> ModelCatalog {
        ModelCatalog {
            entries: self.entries,
        }
    }
}
