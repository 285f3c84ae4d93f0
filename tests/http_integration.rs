// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the remote client using wiremock.

use std::time::Duration;

use bolt_remote::protocol::{ClientConfig, FanOut, QueryEncoding};
use bolt_remote::{Error, ParseError, ProtocolError, RemoteDeviceClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "123e4567-e89b-12d3-a456-426614174000";
const OTHER_KEY: &str = "00000000-0000-4000-8000-000000000001";

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(KEY).with_base_url(format!("{}/remote/", server.uri()))
}

fn client_for(server: &MockServer) -> RemoteDeviceClient {
    config_for(server).into_client().unwrap()
}

fn command_path(command: &str) -> String {
    format!("/remote/{KEY}/{command}")
}

async fn mount_version_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(command_path("version")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "1",
            "value": "1.0.0"
        })))
        .mount(server)
        .await;
}

/// Mounts a handler for `command` that answers each device with its own name.
async fn mount_echo(server: &MockServer, command: &str, devices: &[&str]) {
    for device in devices {
        Mock::given(method("GET"))
            .and(path(command_path(command)))
            .and(query_param("deviceName", *device))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "1",
                "value": device
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

async fn registered_client(server: &MockServer, devices: &[&str]) -> RemoteDeviceClient {
    mount_version_ok(server).await;
    let mut client = client_for(server);
    for device in devices {
        assert!(client.add_device(device).await);
    }
    client
}

fn values(outcomes: &[bolt_remote::DeviceOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .map(|o| {
            o.response()
                .and_then(|r| r.value())
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

// ============================================================================
// Device registration
// ============================================================================

mod registration {
    use super::*;

    #[tokio::test]
    async fn add_device_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(command_path("version")))
            .and(query_param("deviceName", "DEV1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        assert!(client.add_device("DEV1").await);
        assert_eq!(client.list_devices(), ["DEV1"]);
    }

    #[tokio::test]
    async fn add_device_rejected_by_service() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(command_path("version")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "0",
                "value": "Device not found"
            })))
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        assert!(!client.add_device("DEV1").await);
        assert!(client.list_devices().is_empty());

        let err = client.try_add_device("DEV1").await.unwrap_err();
        match err {
            Error::DeviceRejected { device, response } => {
                assert_eq!(device, "DEV1");
                assert_eq!(response.body(), r#"{"success":"0","value":"Device not found"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_device_with_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(command_path("version")))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let err = client.try_add_device("DEV1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::Json { status: 502, .. })
        ));
        assert!(client.list_devices().is_empty());
    }

    #[tokio::test]
    async fn add_device_normalizes_to_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(command_path("version")))
            .and(query_param("deviceName", "12345"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        assert!(client.add_device(12345).await);
        assert_eq!(client.list_devices(), ["12345"]);
    }

    #[tokio::test]
    async fn add_device_without_key_makes_no_call() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(0)
            .mount(&server)
            .await;

        let mut client = ClientConfig::new("not-a-key")
            .with_base_url(format!("{}/remote/", server.uri()))
            .into_client()
            .unwrap();
        assert!(client.key().is_none());
        assert!(!client.add_device("DEV1").await);
    }

    #[tokio::test]
    async fn remove_device_shrinks_registry() {
        let server = MockServer::start().await;
        let mut client = registered_client(&server, &["DEV1", "DEV2"]).await;

        assert!(client.remove_device("DEV1"));
        assert_eq!(client.list_devices(), ["DEV2"]);

        assert!(!client.remove_device("DEV1"));
        assert_eq!(client.list_devices(), ["DEV2"]);
    }

    #[tokio::test]
    async fn duplicate_devices_are_kept() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1", "DEV1"]).await;

        assert_eq!(client.list_devices(), ["DEV1", "DEV1"]);
        assert_eq!(client.version().await.len(), 2);
    }
}

// ============================================================================
// Capability fan-out
// ============================================================================

mod capabilities {
    use super::*;

    #[tokio::test]
    async fn analog_write_fans_out_in_registration_order() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1", "DEV2"]).await;

        for device in ["DEV1", "DEV2"] {
            Mock::given(method("GET"))
                .and(path(command_path("analogWrite")))
                .and(query_param("deviceName", device))
                .and(query_param("pin", "2"))
                .and(query_param("value", "100"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "success": "1",
                    "value": 100
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let outcomes = client.analog_write(2, 100).await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].device, "DEV1");
        assert_eq!(outcomes[1].device, "DEV2");
        assert!(outcomes.iter().all(bolt_remote::DeviceOutcome::is_success));
        assert_eq!(outcomes[0].response().unwrap().value(), Some(&json!(100)));
    }

    #[tokio::test]
    async fn each_capability_hits_its_endpoint() {
        let server = MockServer::start().await;
        let devices = ["DEV1", "DEV2", "DEV3"];
        let client = registered_client(&server, &devices).await;

        for command in ["isOnline", "restart", "analogRead", "digitalRead", "digitalWrite"] {
            mount_echo(&server, command, &devices).await;
        }

        assert_eq!(values(&client.is_online().await), devices);
        assert_eq!(values(&client.restart().await), devices);
        assert_eq!(values(&client.analog_read().await), devices);
        assert_eq!(values(&client.digital_read(3).await), devices);
        assert_eq!(values(&client.digital_write(0, "HIGH").await), devices);
    }

    #[tokio::test]
    async fn version_returns_one_result_per_device() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1", "DEV2"]).await;

        let outcomes = client.version().await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(bolt_remote::DeviceOutcome::is_success));
    }

    #[tokio::test]
    async fn analog_read_always_uses_a0() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1"]).await;

        Mock::given(method("GET"))
            .and(path(command_path("analogRead")))
            .and(query_param("pin", "A0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "1",
                "value": "512"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcomes = client.analog_read().await;
        assert_eq!(
            outcomes[0].response().unwrap().value(),
            Some(&json!("512"))
        );
    }

    #[tokio::test]
    async fn empty_registry_makes_no_calls() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.version().await.is_empty());
        assert!(client.analog_write(1, 1).await.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_parameters_skip_whole_batch() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1", "DEV2"]).await;

        for command in ["analogWrite", "digitalRead", "digitalWrite"] {
            Mock::given(method("GET"))
                .and(path(command_path(command)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
                .expect(0)
                .mount(&server)
                .await;
        }

        assert!(client.analog_write(7, 100).await.is_empty());
        assert!(client.analog_write(2, 255).await.is_empty());
        assert!(client.digital_read(4).await.is_empty());
        assert!(client.digital_write(4, "HIGH").await.is_empty());
        assert!(client.digital_write(1, "high").await.is_empty());
        assert!(client.digital_write(1, "MEDIUM").await.is_empty());
    }

    #[tokio::test]
    async fn set_key_changes_request_path() {
        let server = MockServer::start().await;
        let mut client = registered_client(&server, &["DEV1"]).await;

        Mock::given(method("GET"))
            .and(path(format!("/remote/{OTHER_KEY}/restart")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.set_key(OTHER_KEY));
        assert!(client.restart().await[0].is_success());
    }
}

// ============================================================================
// Per-device failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn malformed_body_is_reported_per_device() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1", "DEV2"]).await;

        Mock::given(method("GET"))
            .and(path(command_path("isOnline")))
            .and(query_param("deviceName", "DEV1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        mount_echo(&server, "isOnline", &["DEV2"]).await;

        let outcomes = client.is_online().await;
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].result,
            Err(Error::Parse(ParseError::Json { status: 200, .. }))
        ));
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn transport_failure_does_not_abort_fan_out() {
        let server = MockServer::start().await;
        mount_version_ok(&server).await;

        let mut client = config_for(&server)
            .with_timeout(Duration::from_millis(300))
            .into_client()
            .unwrap();
        assert!(client.add_device("DEV1").await);
        assert!(client.add_device("DEV2").await);

        Mock::given(method("GET"))
            .and(path(command_path("restart")))
            .and(query_param("deviceName", "DEV1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": "1"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        mount_echo(&server, "restart", &["DEV2"]).await;

        let outcomes = client.restart().await;
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].result,
            Err(Error::Protocol(ProtocolError::Http(_)))
        ));
        let message = outcomes[0].result.as_ref().unwrap_err().to_string();
        assert!(!message.contains(KEY), "key leaked into error: {message}");
        assert!(outcomes[1].is_success());
    }

    #[tokio::test]
    async fn cleared_key_is_reported_per_device() {
        let server = MockServer::start().await;
        let mut client = registered_client(&server, &["DEV1", "DEV2"]).await;

        Mock::given(method("GET"))
            .and(path(command_path("restart")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client.clear_key().is_some());

        let outcomes = client.restart().await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].device, "DEV1");
        assert_eq!(outcomes[1].device, "DEV2");
        assert!(
            outcomes
                .iter()
                .all(|o| matches!(o.result, Err(Error::KeyNotSet)))
        );
        assert_eq!(client.list_devices(), ["DEV1", "DEV2"]);
    }

    #[tokio::test]
    async fn service_failure_is_returned_not_raised() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1"]).await;

        Mock::given(method("GET"))
            .and(path(command_path("digitalRead")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "0",
                "value": "Device is offline"
            })))
            .mount(&server)
            .await;

        let outcomes = client.digital_read(0).await;
        let response = outcomes[0].response().unwrap();
        assert!(!response.success());
        assert_eq!(response.status(), 200);
    }
}

// ============================================================================
// Request construction
// ============================================================================

mod request_format {
    use super::*;

    #[tokio::test]
    async fn query_string_is_sent_verbatim() {
        let server = MockServer::start().await;
        let client = registered_client(&server, &["DEV1"]).await;
        mount_echo(&server, "digitalWrite", &["DEV1"]).await;

        client.digital_write(3, "LOW").await;

        let requests = server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        assert_eq!(last.url.path(), command_path("digitalWrite"));
        assert_eq!(last.url.query(), Some("deviceName=DEV1&pin=3&value=LOW"));
    }

    #[tokio::test]
    async fn encoded_mode_escapes_device_names() {
        let server = MockServer::start().await;
        mount_version_ok(&server).await;

        let mut client = config_for(&server)
            .with_query_encoding(QueryEncoding::Encoded)
            .into_client()
            .unwrap();
        assert!(client.add_device("my&device").await);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("deviceName=my%26device"));
    }

    #[tokio::test]
    async fn raw_mode_splits_reserved_characters() {
        let server = MockServer::start().await;
        mount_version_ok(&server).await;

        let mut client = client_for(&server);
        assert!(client.add_device("my&device").await);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("deviceName=my&device"));
    }
}

// ============================================================================
// Concurrent fan-out
// ============================================================================

mod concurrent {
    use super::*;

    #[tokio::test]
    async fn results_keep_registration_order() {
        let server = MockServer::start().await;
        mount_version_ok(&server).await;

        let mut client = config_for(&server)
            .with_fan_out(FanOut::Concurrent)
            .into_client()
            .unwrap();
        for device in ["DEV1", "DEV2", "DEV3"] {
            assert!(client.add_device(device).await);
        }

        // First device answers last
        Mock::given(method("GET"))
            .and(path(command_path("isOnline")))
            .and(query_param("deviceName", "DEV1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": "1", "value": "DEV1"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        mount_echo(&server, "isOnline", &["DEV2", "DEV3"]).await;

        let outcomes = client.is_online().await;
        assert_eq!(values(&outcomes), ["DEV1", "DEV2", "DEV3"]);
        let devices: Vec<&str> = outcomes.iter().map(|o| o.device.as_str()).collect();
        assert_eq!(devices, ["DEV1", "DEV2", "DEV3"]);
    }

    #[tokio::test]
    async fn invalid_parameters_spawn_nothing() {
        let server = MockServer::start().await;
        mount_version_ok(&server).await;

        let mut client = config_for(&server)
            .with_fan_out(FanOut::Concurrent)
            .into_client()
            .unwrap();
        assert!(client.add_device("DEV1").await);

        Mock::given(method("GET"))
            .and(path(command_path("analogWrite")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": "1"})))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client.analog_write(9, 10).await.is_empty());
    }
}
