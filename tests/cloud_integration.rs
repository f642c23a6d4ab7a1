// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the cloud protocol using wiremock.

use keemple_lib::types::{DeviceType, Position};
use keemple_lib::{BlindOperation, CloudConfig, KeempleHome, TEMP_TARGET_IDX};
use wiremock::matchers::{method, path, query_param, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> CloudConfig {
    CloudConfig::new("48123456789", "secret").with_base_url(server.uri())
}

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/phoneuser/login"))
        .and(query_param("platform", "8"))
        .and(query_param("phonenumber", "48123456789"))
        .and(query_param("password", "secret"))
        .and(query_param("language", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resultCode": 0
        })))
        .mount(server)
        .await;
}

async fn mount_poll(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/data/querychangeddata2"))
        .and(query_param("platform", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn snapshot_body() -> serde_json::Value {
    serde_json::json!({
        "resultCode": 0,
        "appliancestatus": [
            {"nuid": 5, "devicetype": "42", "status": 1, "statuses": "[1,0]",
             "zwavedeviceid": 12},
            {"nuid": 7, "devicetype": "43", "status": 150, "zwavedeviceid": 13},
            {"nuid": 9, "devicetype": "45", "status": 0,
             "statuses": "[21.0,0,19.5,0,1]", "zwavedeviceid": 14}
        ],
        "remote": [
            {"appliancelist": [{"nuid": 5, "name": "Kitchen Dual"}]}
        ],
        "rooms": [
            {"name": "Kitchen", "appliancelist": [{"nuid": 5}]}
        ]
    })
}

// ============================================================================
// Login
// ============================================================================

mod login {
    use super::*;

    #[tokio::test]
    async fn successful_login_sets_authenticated() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;

        let home = KeempleHome::new(config(&server)).unwrap();
        assert!(home.login().await);
    }

    #[tokio::test]
    async fn rejected_login_returns_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/phoneuser/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 11,
                "resultMessage": "bad credentials"
            })))
            .mount(&server)
            .await;

        let home = KeempleHome::new(config(&server)).unwrap();
        assert!(!home.login().await);
    }

    #[tokio::test]
    async fn transport_failure_returns_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/phoneuser/login"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let home = KeempleHome::new(config(&server)).unwrap();
        assert!(!home.login().await);
    }
}

// ============================================================================
// Poll + reconcile
// ============================================================================

mod update {
    use super::*;

    #[tokio::test]
    async fn poll_builds_devices_and_rooms() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;
        mount_poll(&server, snapshot_body()).await;

        let mut home = KeempleHome::new(config(&server)).unwrap();
        home.update().await.unwrap();

        // Dual entry split into two channels plus blind plus heater
        assert_eq!(home.devices().len(), 4);

        let duals = home.get_devices_by_type(&DeviceType::DualLight);
        assert_eq!(duals.len(), 2);
        assert!(duals[0].unique_id().ends_with("_channel_1"));
        assert!(duals[1].unique_id().ends_with("_channel_2"));

        // Blind status 150 clamps to the vendor maximum
        let blinds = home.get_devices_by_type(&DeviceType::Blind);
        assert_eq!(blinds[0].status(), 99);

        // Both channels share nuid 5 and land in Kitchen together
        assert_eq!(home.get_devices_in_room("Kitchen").len(), 2);
        assert_eq!(home.get_devices_in_room("Unassigned").len(), 2);
    }

    #[tokio::test]
    async fn repeated_polls_preserve_handle_identity() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;
        mount_poll(&server, snapshot_body()).await;

        let mut home = KeempleHome::new(config(&server)).unwrap();
        home.update().await.unwrap();
        let before: Vec<_> = home.devices().to_vec();

        home.update().await.unwrap();
        let after = home.devices();

        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(after) {
            assert!(old.ptr_eq(new));
        }
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;
        Mock::given(method("POST"))
            .and(path("/data/querychangeddata2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut home = KeempleHome::new(config(&server)).unwrap();
        assert!(home.update().await.is_err());
    }

    #[tokio::test]
    async fn non_zero_result_code_propagates() {
        let server = MockServer::start().await;
        mount_login_success(&server).await;
        mount_poll(
            &server,
            serde_json::json!({"resultCode": 7, "resultMessage": "expired"}),
        )
        .await;

        let mut home = KeempleHome::new(config(&server)).unwrap();
        assert!(home.update().await.is_err());
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    async fn home_with_devices(server: &MockServer) -> KeempleHome {
        mount_login_success(server).await;
        mount_poll(server, snapshot_body()).await;
        let mut home = KeempleHome::new(config(server)).unwrap();
        home.update().await.unwrap();
        home
    }

    #[tokio::test]
    async fn turn_on_sends_channel_and_mutates_speculatively() {
        let server = MockServer::start().await;
        let home = home_with_devices(&server).await;

        Mock::given(method("POST"))
            .and(path("/device/operate"))
            .and(query_param("zwavedeviceid", "12"))
            .and(query_param("channel", "2"))
            .and(query_param_contains("command", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 0
            })))
            .mount(&server)
            .await;

        let duals = home.get_devices_by_type(&DeviceType::DualLight);
        let channel_two = &duals[1];

        assert!(home.turn_on(channel_two).await);
        assert_eq!(channel_two.status(), 1);
        assert_eq!(channel_two.read().channel_status(), 1.0);
    }

    #[tokio::test]
    async fn blind_position_converts_to_vendor_range() {
        let server = MockServer::start().await;
        let home = home_with_devices(&server).await;

        Mock::given(method("POST"))
            .and(path("/device/operate"))
            .and(query_param("zwavedeviceid", "13"))
            .and(query_param_contains("command", "\"value\":99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 0
            })))
            .mount(&server)
            .await;

        let blind = &home.get_devices_by_type(&DeviceType::Blind)[0];
        assert!(
            home.set_blind_position(blind, Position::new(100).unwrap())
                .await
        );
        assert_eq!(blind.status(), 99);
    }

    #[tokio::test]
    async fn blind_stop_leaves_position_unchanged() {
        let server = MockServer::start().await;
        let home = home_with_devices(&server).await;

        Mock::given(method("POST"))
            .and(path("/device/operate"))
            .and(query_param_contains("command", "stop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 0
            })))
            .mount(&server)
            .await;

        let blind = &home.get_devices_by_type(&DeviceType::Blind)[0];
        let before = blind.status();
        assert!(home.operate_blind(blind, BlindOperation::Stop, None).await);
        assert_eq!(blind.status(), before);
    }

    #[tokio::test]
    async fn heater_temperature_updates_target_slot_only() {
        let server = MockServer::start().await;
        let home = home_with_devices(&server).await;

        Mock::given(method("POST"))
            .and(path("/device/operate"))
            .and(query_param("zwavedeviceid", "14"))
            .and(query_param_contains("command", "temperature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 0
            })))
            .mount(&server)
            .await;

        let heater = &home.get_devices_by_type(&DeviceType::Heater)[0];
        assert!(home.set_heater_temperature(heater, 23.5).await);

        let device = heater.read();
        assert_eq!(device.statuses.get(TEMP_TARGET_IDX), Some(23.5));
        assert_eq!(device.current_temperature(), Some(19.5));
        assert_eq!(device.is_heating(), Some(true));
    }

    #[tokio::test]
    async fn rejected_command_leaves_state_untouched() {
        let server = MockServer::start().await;
        let home = home_with_devices(&server).await;

        Mock::given(method("POST"))
            .and(path("/device/operate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": 1,
                "resultMessage": "device busy"
            })))
            .mount(&server)
            .await;

        let heater = &home.get_devices_by_type(&DeviceType::Heater)[0];
        let before = heater.read().statuses.clone();

        assert!(!home.set_heater_temperature(heater, 25.0).await);
        assert_eq!(heater.read().statuses, before);

        let blind = &home.get_devices_by_type(&DeviceType::Blind)[0];
        let before = blind.status();
        assert!(!home.turn_off(blind).await);
        assert_eq!(blind.status(), before);
    }
}
