use std::time::Duration;

use rideguard_config::FallbackProviderConfig;
use rideguard_dispatcher::TwilioProvider;
use rideguard_domain::{CallProvider, IncidentType, RelayError};
use rideguard_testing_utils::IncidentRecordBuilder;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALLS_PATH: &str = "/2010-04-01/Accounts/AC123/Calls.json";

fn config(server: &MockServer) -> FallbackProviderConfig {
    FallbackProviderConfig {
        account_sid: Some("AC123".to_string()),
        auth_token: Some("secret".to_string()),
        from_phone: Some("+15559990000".to_string()),
        base_url: server.uri(),
        ..FallbackProviderConfig::default()
    }
}

#[tokio::test]
async fn test_place_call_posts_form_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .and(basic_auth("AC123", "secret"))
        .and(body_string_contains("To=%2B15550001111"))
        .and(body_string_contains("From=%2B15559990000"))
        .and(body_string_contains("Record=true"))
        .and(body_string_contains("Timeout=30"))
        .and(body_string_contains("Twiml="))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"sid": "CA42", "status": "queued"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = TwilioProvider::new(config(&server))
        .place_call("+15550001111", "Emergency alert.")
        .await
        .unwrap();

    assert_eq!(result.call_id, "CA42");
    assert_eq!(result.status.as_deref(), Some("queued"));
}

#[tokio::test]
async fn test_script_is_escaped_inside_twiml() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sid": "CA1", "status": "queued"})))
        .mount(&server)
        .await;

    TwilioProvider::new(config(&server))
        .place_call("+15550001111", "<Hangup/> & more")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    // "&lt;Hangup/&gt;" 经表单编码后的形式
    assert!(body.contains("%26lt%3BHangup%2F%26gt%3B"));
    assert_eq!(body.matches("%3CHangup%2F%3E").count(), 1);
}

#[tokio::test]
async fn test_error_message_from_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"code": 20003, "message": "Authenticate"})),
        )
        .mount(&server)
        .await;

    let err = TwilioProvider::new(config(&server))
        .place_call("+15550001111", "script")
        .await
        .unwrap_err();

    match err {
        RelayError::ProviderCall { provider, message } => {
            assert_eq!(provider, "twilio");
            assert!(message.contains("401"));
            assert!(message.contains("Authenticate"));
        }
        other => panic!("expected ProviderCall, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_credentials_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let provider = TwilioProvider::new(FallbackProviderConfig {
        from_phone: None,
        ..config(&server)
    });

    let err = provider.place_call("+15550001111", "script").await.unwrap_err();
    match err {
        RelayError::Configuration(message) => assert!(message.contains("fallback.from_phone")),
        other => panic!("expected Configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dispatch_incident_uses_simplified_script() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .and(body_string_contains("Jane+Doe"))
        .and(body_string_contains("ABC123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sid": "CA7", "status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let record = IncidentRecordBuilder::new().build();
    let result = TwilioProvider::new(config(&server))
        .dispatch_incident("+15550001111", &record, &IncidentType::default())
        .await
        .unwrap();

    assert_eq!(result.call_id, "CA7");
}

#[tokio::test]
async fn test_control_characters_in_record_are_stripped_from_twiml() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sid": "CA8", "status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let record = IncidentRecordBuilder::new()
        .with_location("123 Main St\u{1b}[0m Apt\u{0}4", 37.7749, -122.4194)
        .build();
    TwilioProvider::new(config(&server))
        .dispatch_incident("+15550001111", &record, &IncidentType::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("%1B"));
    assert!(!body.contains("%00"));
    assert!(body.contains("Apt+4"));
}

#[tokio::test]
async fn test_slow_fallback_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CALLS_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"sid": "CA-late", "status": "queued"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = TwilioProvider::new(FallbackProviderConfig {
        request_timeout_seconds: 1,
        ..config(&server)
    });

    let err = provider.place_call("+15550001111", "script").await.unwrap_err();
    match err {
        RelayError::ProviderCall { provider, .. } => assert_eq!(provider, "twilio"),
        other => panic!("expected ProviderCall, got {other:?}"),
    }
}
