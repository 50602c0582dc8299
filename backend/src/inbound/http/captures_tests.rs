//! Tests for the capture history handlers.

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use super::*;
use crate::domain::{Confidence, IdentificationResult, UserId};
use crate::test_support::multipart::{Part, body, content_type};
use crate::inbound::http::test_utils::MockPorts;

async fn save(ports: MockPorts, parts: &[Part<'_>]) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(save_result)
            .service(get_user_history),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/saveResult")
        .insert_header(("content-type", content_type()))
        .set_payload(body(parts))
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

async fn history(ports: MockPorts, form: &[(&str, &str)]) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(save_result)
            .service(get_user_history),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/getUserHistory")
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

#[actix_web::test]
async fn save_result_forwards_the_form() {
    let mut ports = MockPorts::default();
    ports
        .captures
        .expect_save_result()
        .withf(|request| {
            *request == SaveCaptureRequest {
                user_id: UserId::new(4),
                image: b"jpeg".to_vec(),
                object_name: "Rose".to_owned(),
                confidence: "87.00%".to_owned(),
                description: "A flowering shrub".to_owned(),
                buy_link: None,
            }
        })
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = save(
        ports,
        &[
            Part::File("image", "capture.jpg", b"jpeg"),
            Part::Text("object_name", "Rose"),
            Part::Text("confidence", "87.00%"),
            Part::Text("description", "A flowering shrub"),
            Part::Text("buy_link", " "),
            Part::Text("user_id", "4"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[actix_web::test]
async fn save_result_requires_user_id() {
    let (status, body) = save(
        MockPorts::default(),
        &[
            Part::File("image", "capture.jpg", b"jpeg"),
            Part::Text("object_name", "Rose"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("missing_user_id"));
}

#[actix_web::test]
async fn history_lists_records_with_encoded_images() {
    let mut ports = MockPorts::default();
    ports
        .history
        .expect_history()
        .withf(|user_id| *user_id == UserId::new(4))
        .times(1)
        .returning(|user_id| {
            Ok(vec![
                CaptureRecord::new(
                    user_id,
                    b"jpeg".to_vec(),
                    IdentificationResult::new(
                        "Rose",
                        Confidence::new(87.0),
                        "A flowering shrub",
                        Some("https://example.com/rose".to_owned()),
                    ),
                ),
                CaptureRecord::new(
                    user_id,
                    b"png".to_vec(),
                    IdentificationResult::new("Mug", Confidence::new(40.5), "", None),
                ),
            ])
        });

    let (status, body) = history(ports, &[("user_id", "4")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "name": "Rose",
                "confidence": 87.0,
                "description": "A flowering shrub",
                "link": "https://example.com/rose",
                "image_base64": "anBlZw=="
            },
            {
                "name": "Mug",
                "confidence": 40.5,
                "description": "",
                "link": null,
                "image_base64": "cG5n"
            }
        ])
    );
}

#[actix_web::test]
async fn history_for_unknown_user_is_empty() {
    let mut ports = MockPorts::default();
    ports
        .history
        .expect_history()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let (status, body) = history(ports, &[("user_id", "99")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn history_rejects_missing_or_malformed_user_id() {
    let (status, body) = history(MockPorts::default(), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("missing_user_id"));

    let (status, body) = history(MockPorts::default(), &[("user_id", "abc")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_user_id"));
}
