// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composable device features.
//!
//! A [`Feature`] declares the wire properties it needs and the
//! [`Capabilities`] it grants. Devices are described by a list of features;
//! [`FeatureSet`] folds that list into the concrete set of properties to
//! request from the device and the combined capabilities.
//!
//! Composition is a set union over properties and a logical OR over
//! capabilities, so the order of the feature list never changes the result
//! and repeating a feature has no effect.
//!
//! # Examples
//!
//! ```
//! use gree_lib::{Feature, FeatureSet, Property};
//!
//! let set = FeatureSet::new(vec![Feature::base(), Feature::mode()]);
//! assert!(set.supports(Property::Mode));
//! assert!(set.capabilities().supports_mode());
//! assert!(!set.capabilities().supports_rotate());
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::capabilities::Capabilities;
use crate::error::ValueError;
use crate::property::Property;

const BASE_PROPERTIES: &[Property] = &[
    Property::Power,
    Property::FanSpeed,
    Property::Name,
    Property::Host,
];
const MODE_PROPERTIES: &[Property] = &[Property::Mode];
const ROTATE_PROPERTIES: &[Property] = &[Property::Rotate, Property::LrAngle];
const ANGLE_PROPERTIES: &[Property] = &[Property::LrAngle];
const TIMER_PROPERTIES: &[Property] = &[
    Property::TimerOn,
    Property::TimerAction,
    Property::TimerHour,
    Property::TimerMinute,
];

/// A capability unit: required wire properties plus granted capabilities.
///
/// Built-in features are available as constructors. Custom features are
/// created with [`FeatureBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    name: Cow<'static, str>,
    properties: Cow<'static, [Property]>,
    capabilities: Capabilities,
}

impl Feature {
    const fn builtin(
        name: &'static str,
        properties: &'static [Property],
        capabilities: Capabilities,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            properties: Cow::Borrowed(properties),
            capabilities,
        }
    }

    /// Power, fan speed and the identity fields every device reports.
    #[must_use]
    pub const fn base() -> Self {
        Self::builtin("base", BASE_PROPERTIES, Capabilities::NONE)
    }

    /// Normal/sleep wind mode.
    #[must_use]
    pub const fn mode() -> Self {
        Self::builtin("mode", MODE_PROPERTIES, Capabilities::NONE.with_mode())
    }

    /// Oscillation on/off.
    ///
    /// The angle property is requested too since the device reports both
    /// together, but only the rotate capability is granted.
    #[must_use]
    pub const fn fan_rotate() -> Self {
        Self::builtin(
            "fan_rotate",
            ROTATE_PROPERTIES,
            Capabilities::NONE.with_rotate(),
        )
    }

    /// Oscillation angle selection.
    #[must_use]
    pub const fn angle() -> Self {
        Self::builtin("angle", ANGLE_PROPERTIES, Capabilities::NONE.with_angle())
    }

    /// Oscillation on/off together with angle selection.
    #[must_use]
    pub const fn fan_rotate_with_angle() -> Self {
        Self::builtin(
            "fan_rotate_with_angle",
            ROTATE_PROPERTIES,
            Capabilities::NONE.with_rotate().with_angle(),
        )
    }

    /// Scheduled on/off timer.
    #[must_use]
    pub const fn timer() -> Self {
        Self::builtin("timer", TIMER_PROPERTIES, Capabilities::NONE.with_timer())
    }

    /// Creates a builder for a custom feature.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> FeatureBuilder {
        FeatureBuilder::new(name)
    }

    /// Returns the feature name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wire properties this feature requires.
    #[must_use]
    pub fn required_properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the capabilities this feature grants.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns whether this feature grants mode control.
    #[must_use]
    pub const fn supports_mode(&self) -> bool {
        self.capabilities.mode
    }

    /// Returns whether this feature grants oscillation control.
    #[must_use]
    pub const fn supports_rotate(&self) -> bool {
        self.capabilities.rotate
    }

    /// Returns whether this feature grants angle control.
    #[must_use]
    pub const fn supports_angle(&self) -> bool {
        self.capabilities.angle
    }

    /// Returns whether this feature grants timer control.
    #[must_use]
    pub const fn supports_timer(&self) -> bool {
        self.capabilities.timer
    }
}

/// Builder for custom features.
///
/// # Examples
///
/// ```
/// use gree_lib::{Feature, Property};
///
/// let feature = Feature::builder("fault_report")
///     .property(Property::JFerr)
///     .property(Property::Estate)
///     .build()
///     .unwrap();
///
/// assert_eq!(feature.required_properties().len(), 2);
/// assert!(Feature::builder("empty").build().is_err());
/// ```
#[derive(Debug)]
pub struct FeatureBuilder {
    name: String,
    properties: Vec<Property>,
    capabilities: Capabilities,
}

impl FeatureBuilder {
    /// Creates a new builder with no properties and no capabilities.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            capabilities: Capabilities::NONE,
        }
    }

    /// Adds a required property; duplicates are ignored.
    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        if !self.properties.contains(&property) {
            self.properties.push(property);
        }
        self
    }

    /// Grants mode control.
    #[must_use]
    pub fn with_mode(mut self) -> Self {
        self.capabilities = self.capabilities.with_mode();
        self
    }

    /// Grants oscillation control.
    #[must_use]
    pub fn with_rotate(mut self) -> Self {
        self.capabilities = self.capabilities.with_rotate();
        self
    }

    /// Grants angle control.
    #[must_use]
    pub fn with_angle(mut self) -> Self {
        self.capabilities = self.capabilities.with_angle();
        self
    }

    /// Grants timer control.
    #[must_use]
    pub fn with_timer(mut self) -> Self {
        self.capabilities = self.capabilities.with_timer();
        self
    }

    /// Builds the feature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyFeature` if no property was added.
    pub fn build(self) -> Result<Feature, ValueError> {
        if self.properties.is_empty() {
            return Err(ValueError::EmptyFeature(self.name));
        }
        Ok(Feature {
            name: Cow::Owned(self.name),
            properties: Cow::Owned(self.properties),
            capabilities: self.capabilities,
        })
    }
}

/// The composition of a device's features.
///
/// Properties keep first-seen order, which only affects the order in which
/// they are requested; membership is independent of feature order.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: Vec<Feature>,
    properties: Vec<Property>,
    capabilities: Capabilities,
}

impl FeatureSet {
    /// Composes a list of features.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        let mut properties = Vec::new();
        for feature in &features {
            for property in feature.required_properties() {
                if !properties.contains(property) {
                    properties.push(*property);
                }
            }
        }
        let capabilities = features.iter().map(Feature::capabilities).collect();

        Self {
            features,
            properties,
            capabilities,
        }
    }

    /// Returns the features in declaration order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns the de-duplicated properties in first-seen order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the properties as an ordered set, for order-independent comparison.
    #[must_use]
    pub fn property_set(&self) -> BTreeSet<Property> {
        self.properties.iter().copied().collect()
    }

    /// Returns the combined capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns whether any feature requires the property.
    #[must_use]
    pub fn supports(&self, property: Property) -> bool {
        self.properties.contains(&property)
    }
}

impl PartialEq for FeatureSet {
    fn eq(&self, other: &Self) -> bool {
        self.property_set() == other.property_set() && self.capabilities == other.capabilities
    }
}

impl Eq for FeatureSet {}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
