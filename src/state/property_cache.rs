// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property cache with dirty tracking.

use std::collections::HashMap;

use serde_json::Value;

use crate::property::Property;
use crate::protocol::WireState;

/// Last-known property values of a device plus the properties awaiting a push.
///
/// The cache is empty (`has_values() == false`) until the first read or the
/// first local write. A read replaces it wholesale; a local write overwrites
/// one value and marks it dirty. Properties are never removed individually.
///
/// # Examples
///
/// ```
/// use gree_lib::Property;
/// use gree_lib::state::PropertyCache;
///
/// let mut cache = PropertyCache::new();
/// assert!(cache.set(Property::Power, 1.into()));
/// assert!(cache.set(Property::FanSpeed, 4.into()));
/// assert!(cache.set(Property::Power, 0.into()));
///
/// // Repeated writes to the same property coalesce
/// assert_eq!(cache.dirty(), &[Property::Power, Property::FanSpeed]);
///
/// // Taking the dirty set sends current values only
/// let payload = cache.take_dirty();
/// assert_eq!(payload["Pow"], 0);
/// assert!(cache.dirty().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyCache {
    values: Option<HashMap<Property, Value>>,
    dirty: Vec<Property>,
}

impl PropertyCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether any value has been read or written yet.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.values.is_some()
    }

    /// Gets the cached value of a property.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<&Value> {
        self.values.as_ref()?.get(&property)
    }

    /// Sets a property value locally.
    ///
    /// Does nothing if the value equals the cached one. Otherwise overwrites
    /// the value and marks the property dirty if it is not already.
    ///
    /// Returns `true` if the cached value changed.
    pub fn set(&mut self, property: Property, value: Value) -> bool {
        let values = self.values.get_or_insert_with(HashMap::new);

        if values.get(&property) == Some(&value) {
            return false;
        }

        values.insert(property, value);
        if !self.dirty.contains(&property) {
            self.dirty.push(property);
        }
        true
    }

    /// Replaces every cached value with a fresh read.
    ///
    /// Pending dirty entries are kept; they will push whatever value the
    /// cache holds at push time.
    pub fn replace(&mut self, values: HashMap<Property, Value>) {
        self.values = Some(values);
    }

    /// Returns the properties awaiting a push, in first-modified order.
    #[must_use]
    pub fn dirty(&self) -> &[Property] {
        &self.dirty
    }

    /// Returns whether any property awaits a push.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Snapshots the current values of all dirty properties and clears the
    /// dirty set.
    ///
    /// A dirty property with no cached value, because a later read did not
    /// report it, is dropped rather than sent as `null`.
    #[must_use]
    pub fn take_dirty(&mut self) -> WireState {
        let dirty = std::mem::take(&mut self.dirty);
        dirty
            .into_iter()
            .filter_map(|property| match self.get(property) {
                Some(value) => Some((property.code().to_string(), value.clone())),
                None => {
                    tracing::debug!(property = %property, "Dropping dirty property without a value");
                    None
                }
            })
            .collect()
    }

    /// Returns a copy of all cached values.
    #[must_use]
    pub fn values(&self) -> HashMap<Property, Value> {
        self.values.clone().unwrap_or_default()
    }
}
