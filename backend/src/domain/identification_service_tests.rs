//! Tests for the identification pipeline service.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockCaptureStore, MockProviderClient};

fn provider(kind: ProviderKind) -> MockProviderClient {
    let mut client = MockProviderClient::new();
    client.expect_kind().return_const(kind);
    client
}

fn service_with(
    client: MockProviderClient,
    store: MockCaptureStore,
) -> IdentificationService<MockCaptureStore> {
    IdentificationService::new(Arc::new(store)).with_provider(Arc::new(client))
}

fn rose_reply() -> Value {
    json!({"results": [{"score": 0.87, "species": {
        "scientificName": "Rosa canina", "commonNames": ["Rose"]}}]})
}

#[tokio::test]
async fn empty_image_is_rejected_without_calling_the_provider() {
    let mut client = provider(ProviderKind::Label);
    client.expect_identify().times(0);
    let mut store = MockCaptureStore::new();
    store.expect_save().times(0);

    let service = service_with(client, store);
    let err = service
        .run_and_save(
            Vec::new(),
            ProviderKind::Label,
            ProviderOptions::default(),
            UserId::new(1),
        )
        .await
        .expect_err("empty image rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn run_normalises_the_provider_reply() {
    let mut client = provider(ProviderKind::Botanical);
    client
        .expect_identify()
        .withf(|image, options| image.as_bytes() == b"jpeg" && options.organs() == "flower")
        .times(1)
        .return_once(|_, _| Ok(rose_reply()));

    let service = service_with(client, MockCaptureStore::new());
    let result = service
        .run(
            b"jpeg".to_vec(),
            ProviderKind::Botanical,
            ProviderOptions::with_organs("flower"),
        )
        .await
        .expect("identification succeeds");

    assert_eq!(result.name(), "Rose");
    assert_eq!(result.confidence().value(), 87.0);
}

#[rstest]
#[case(ProviderKind::Label, ProviderClientError::timeout("30s elapsed"))]
#[case(
    ProviderKind::Botanical,
    ProviderClientError::status(404_u16, "{\"message\":\"Species not found\"}")
)]
#[case(ProviderKind::Multimodal, ProviderClientError::decode("expected value", "<html>"))]
#[case(ProviderKind::Multimodal, ProviderClientError::transport("connection refused"))]
#[tokio::test]
async fn transport_failures_degrade_to_fallback(
    #[case] kind: ProviderKind,
    #[case] failure: ProviderClientError,
) {
    let mut client = provider(kind);
    client
        .expect_identify()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = service_with(client, MockCaptureStore::new());
    let result = service
        .run(b"jpeg".to_vec(), kind, ProviderOptions::default())
        .await
        .expect("failure absorbed");

    assert_eq!(result, IdentificationResult::fallback(kind));
}

#[tokio::test]
async fn multimodal_error_envelope_in_failed_reply_is_upstream_error() {
    let mut client = provider(ProviderKind::Multimodal);
    client.expect_identify().times(1).return_once(|_, _| {
        Err(ProviderClientError::status(
            401_u16,
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        ))
    });

    let service = service_with(client, MockCaptureStore::new());
    let err = service
        .run(b"jpeg".to_vec(), ProviderKind::Multimodal, ProviderOptions::default())
        .await
        .expect_err("upstream error surfaced");

    assert_eq!(err.code(), ErrorCode::UpstreamError);
    assert_eq!(err.message(), "Incorrect API key provided");
}

#[rstest]
#[case(ProviderClientError::transport("connection refused"))]
#[case(ProviderClientError::timeout("30s elapsed"))]
#[tokio::test]
async fn run_and_save_skips_the_store_when_the_provider_is_unreachable(
    #[case] failure: ProviderClientError,
) {
    let mut client = provider(ProviderKind::Label);
    client
        .expect_identify()
        .times(1)
        .return_once(move |_, _| Err(failure));
    let mut store = MockCaptureStore::new();
    store.expect_save().times(0);

    let service = service_with(client, store);
    let result = service
        .run_and_save(
            b"jpeg".to_vec(),
            ProviderKind::Label,
            ProviderOptions::default(),
            UserId::new(9),
        )
        .await
        .expect("failure absorbed");

    assert_eq!(result, IdentificationResult::fallback(ProviderKind::Label));
}

#[rstest]
#[case(json!({"error": {"message": ""}}))]
#[case(json!({"error": "   "}))]
#[tokio::test]
async fn blank_multimodal_error_message_uses_the_default(#[case] reply: Value) {
    let mut client = provider(ProviderKind::Multimodal);
    client
        .expect_identify()
        .times(1)
        .return_once(move |_, _| Ok(reply));

    let service = service_with(client, MockCaptureStore::new());
    let err = service
        .run(b"jpeg".to_vec(), ProviderKind::Multimodal, ProviderOptions::default())
        .await
        .expect_err("upstream error surfaced");

    assert_eq!(err.code(), ErrorCode::UpstreamError);
    assert_eq!(err.message(), "provider returned an error");
}

#[tokio::test]
async fn multimodal_error_envelope_in_success_reply_is_upstream_error() {
    let mut client = provider(ProviderKind::Multimodal);
    client
        .expect_identify()
        .times(1)
        .return_once(|_, _| Ok(json!({"error": {"message": "quota exceeded"}})));

    let service = service_with(client, MockCaptureStore::new());
    let err = service
        .run(b"jpeg".to_vec(), ProviderKind::Multimodal, ProviderOptions::default())
        .await
        .expect_err("upstream error surfaced");

    assert_eq!(err.code(), ErrorCode::UpstreamError);
}

#[tokio::test]
async fn unconfigured_provider_is_service_unavailable() {
    let mut client = provider(ProviderKind::Label);
    client.expect_identify().times(0);

    let service = service_with(client, MockCaptureStore::new());
    let err = service
        .run(b"jpeg".to_vec(), ProviderKind::Botanical, ProviderOptions::default())
        .await
        .expect_err("no botanical client");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn run_and_save_persists_the_result_with_the_image() {
    let mut client = provider(ProviderKind::Botanical);
    client
        .expect_identify()
        .times(1)
        .return_once(|_, _| Ok(rose_reply()));
    let mut store = MockCaptureStore::new();
    store
        .expect_save()
        .withf(|record| {
            record.user_id() == UserId::new(9)
                && record.image() == b"jpeg"
                && record.result().name() == "Rose"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let service = service_with(client, store);
    let result = service
        .run_and_save(
            b"jpeg".to_vec(),
            ProviderKind::Botanical,
            ProviderOptions::default(),
            UserId::new(9),
        )
        .await
        .expect("identify and save");

    assert_eq!(result.name(), "Rose");
}

#[rstest]
#[case(CaptureStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(CaptureStoreError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn run_and_save_surfaces_store_failures(
    #[case] failure: CaptureStoreError,
    #[case] expected: ErrorCode,
) {
    let mut client = provider(ProviderKind::Botanical);
    client
        .expect_identify()
        .times(1)
        .return_once(|_, _| Ok(rose_reply()));
    let mut store = MockCaptureStore::new();
    store.expect_save().times(1).return_once(move |_| Err(failure));

    let service = service_with(client, store);
    let err = service
        .run_and_save(
            b"jpeg".to_vec(),
            ProviderKind::Botanical,
            ProviderOptions::default(),
            UserId::new(9),
        )
        .await
        .expect_err("store failure surfaced");

    assert_eq!(err.code(), expected);
}
