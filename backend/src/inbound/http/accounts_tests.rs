//! Tests for the account handlers.

use actix_web::{App, http::StatusCode, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{UserAccount, UserId};
use crate::inbound::http::test_utils::MockPorts;

async fn post_form(ports: MockPorts, uri: &str, form: &[(&str, &str)]) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(register)
            .service(login),
    )
    .await;
    let req = test::TestRequest::post()
        .uri(uri)
        .set_form(form)
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

#[actix_web::test]
async fn register_reports_success() {
    let mut ports = MockPorts::default();
    ports
        .authenticator
        .expect_register()
        .withf(|credentials| credentials.email() == "ada@example.com")
        .times(1)
        .returning(|_| Ok(UserId::new(7)));

    let (status, body) = post_form(
        ports,
        "/register",
        &[("email", " Ada@Example.com "), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[actix_web::test]
async fn register_reports_conflict_for_taken_email() {
    let mut ports = MockPorts::default();
    ports
        .authenticator
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::conflict("Email already exists")));

    let (status, body) = post_form(
        ports,
        "/register",
        &[("email", "ada@example.com"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["message"], json!("Email already exists"));
}

#[rstest]
#[case::blank_email(&[("email", "  "), ("password", "hunter2")], "email must not be empty")]
#[case::missing_email(&[("password", "hunter2")], "email must not be empty")]
#[case::malformed_email(&[("email", "ada"), ("password", "hunter2")], "email must be a valid address")]
#[case::blank_password(&[("email", "ada@example.com"), ("password", "")], "password must not be empty")]
#[actix_web::test]
async fn register_rejects_invalid_credentials_without_calling_port(
    #[case] form: &[(&str, &str)],
    #[case] message: &str,
) {
    let (status, body) = post_form(MockPorts::default(), "/register", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "message": message, "code": "invalid_request" })
    );
}

#[actix_web::test]
async fn register_surfaces_storage_outage() {
    let mut ports = MockPorts::default();
    ports
        .authenticator
        .expect_register()
        .returning(|_| Err(Error::service_unavailable("account storage unavailable")));

    let (status, body) = post_form(
        ports,
        "/register",
        &[("email", "ada@example.com"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("service_unavailable"));
}

#[actix_web::test]
async fn login_returns_id_and_tier() {
    let mut ports = MockPorts::default();
    ports
        .authenticator
        .expect_login()
        .withf(|credentials| credentials.password() == "hunter2")
        .times(1)
        .returning(|_| Ok(Some(UserAccount::new(UserId::new(3), "pro"))));

    let (status, body) = post_form(
        ports,
        "/login",
        &[("email", "ada@example.com"), ("password", "hunter2")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 3, "tier": "pro" }));
}

#[actix_web::test]
async fn login_returns_nulls_on_mismatch() {
    let mut ports = MockPorts::default();
    ports
        .authenticator
        .expect_login()
        .times(1)
        .returning(|_| Ok(None));

    let (status, body) = post_form(
        ports,
        "/login",
        &[("email", "ada@example.com"), ("password", "wrong")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": null, "tier": null }));
}

#[actix_web::test]
async fn login_with_blank_fields_returns_nulls_without_calling_port() {
    let (status, body) = post_form(MockPorts::default(), "/login", &[("email", "")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": null, "tier": null }));
}
