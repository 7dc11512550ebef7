// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for discovery, the registry and the model catalog.

mod common;

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use common::{MockDiscovery, MockTransport, device_info};
use gree_lib::discovery::{DiscoveryOptions, discover_devices, has_devices};
use gree_lib::{DeviceRegistry, Error, Feature, ModelCatalog, Property, SessionConfig};

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[tokio::test]
    async fn registers_supported_devices_and_skips_unknown_models() {
        let scanner = MockDiscovery::new(vec![
            device_info("aa01", "828211"),
            device_info("aa02", "999999"),
            device_info("aa03", "828211").with_name("Bedroom"),
        ]);
        let registry = DeviceRegistry::new(ModelCatalog::builtin());

        let found = discover_devices(&scanner, &registry, &DiscoveryOptions::new())
            .await
            .unwrap();

        let macs: Vec<_> = found.iter().map(|d| d.info().mac().to_string()).collect();
        assert_eq!(macs, vec!["aa01", "aa03"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("aa02"));
        assert_eq!(registry.get("aa03").unwrap().info().name(), "Bedroom");
    }

    #[tokio::test]
    async fn rediscovery_reports_only_changes() {
        let scanner = MockDiscovery::new(vec![device_info("aa01", "828211")]);
        let registry = DeviceRegistry::new(ModelCatalog::builtin());
        let options = DiscoveryOptions::new();

        assert_eq!(discover_devices(&scanner, &registry, &options).await.unwrap().len(), 1);
        assert!(discover_devices(&scanner, &registry, &options).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_receives_options() {
        let scanner = MockDiscovery::new(Vec::new());
        let registry = DeviceRegistry::default();
        let subnet = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 255));
        let options = DiscoveryOptions::new()
            .with_timeout(Duration::from_secs(3))
            .with_broadcast_address(subnet);

        let found = discover_devices(&scanner, &registry, &options).await.unwrap();

        assert!(found.is_empty());
        assert_eq!(scanner.scans(), vec![(Duration::from_secs(3), vec![subnet])]);
    }

    #[tokio::test]
    async fn has_devices_probe() {
        let options = DiscoveryOptions::new();
        assert!(!has_devices(&MockDiscovery::new(Vec::new()), &options).await.unwrap());

        // Any answer counts, supported model or not
        let scanner = MockDiscovery::new(vec![device_info("aa09", "999999")]);
        assert!(has_devices(&scanner, &options).await.unwrap());
    }
}

// ============================================================================
// Registry and Catalog
// ============================================================================

mod registry {
    use super::*;

    #[test]
    fn open_unknown_device_fails() {
        let registry = DeviceRegistry::default();
        let transport = Arc::new(MockTransport::new());

        let err = registry
            .open("aa01", transport, SessionConfig::default())
            .unwrap_err();

        assert!(matches!(err, Error::DeviceNotFound(ref mac) if mac == "aa01"));
    }

    #[test]
    fn open_uses_registered_descriptor() {
        let registry = DeviceRegistry::default();
        registry.register(device_info("aa01", "828211")).unwrap();

        let config = SessionConfig::new().with_timeout(Duration::from_secs(1));
        let device = registry
            .open("aa01", Arc::new(MockTransport::new()), config)
            .unwrap();

        assert_eq!(device.descriptor().type_name(), "FLZ-09X67Bg");
        assert_eq!(device.config().timeout(), Duration::from_secs(1));
        assert!(device.capabilities().supports_angle());
    }

    #[test]
    fn custom_catalog_rows_extend_support() {
        let dehumidifier = Feature::builder("dehumidify")
            .property(Property::Estate)
            .property(Property::JFerr)
            .build()
            .unwrap();
        let catalog = ModelCatalog::builtin()
            .into_builder()
            .model("900001", "FD-40", vec![Feature::base(), dehumidifier, Feature::timer()])
            .build();
        let registry = DeviceRegistry::new(catalog);

        registry.register(device_info("bb01", "900001")).unwrap();
        let descriptor = registry.get("bb01").unwrap();

        assert!(descriptor.supports(Property::Estate));
        assert!(descriptor.supports(Property::TimerOn));
        assert!(!descriptor.supports(Property::Mode));
        assert!(descriptor.capabilities().supports_timer());
    }

    #[test]
    fn feature_order_does_not_change_properties() {
        let forward = ModelCatalog::builder()
            .model("1", "a", vec![Feature::base(), Feature::fan_rotate(), Feature::angle()])
            .build()
            .describe(device_info("cc01", "1"))
            .unwrap();
        let backward = ModelCatalog::builder()
            .model("1", "a", vec![Feature::angle(), Feature::fan_rotate(), Feature::base()])
            .build()
            .describe(device_info("cc01", "1"))
            .unwrap();

        assert_eq!(forward.features(), backward.features());
        assert_eq!(forward.capabilities(), backward.capabilities());
        assert!(forward.capabilities().supports_rotate());
        assert!(forward.capabilities().supports_angle());
    }
}
