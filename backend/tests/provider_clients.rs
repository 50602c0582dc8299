//! Provider clients against a local stub HTTP server.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

use lens_backend::domain::ports::{ProviderClient, ProviderClientError};
use lens_backend::domain::{ImagePayload, ProviderOptions};
use lens_backend::outbound::providers::{
    OpenAiVisionClient, PlantNetClient, ProviderEndpoint, VisionLabelClient,
};

/// What the stub saw for the last request.
#[derive(Debug, Default, Clone)]
struct Captured {
    query: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct StubReply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

struct Stub {
    addr: SocketAddr,
    captured: Arc<Mutex<Captured>>,
}

impl Stub {
    fn endpoint(&self, timeout: Duration) -> ProviderEndpoint {
        let url = Url::parse(&format!("http://{}/provider", self.addr)).expect("stub url");
        ProviderEndpoint::new(url, "secret-key", timeout)
    }

    fn captured(&self) -> Captured {
        self.captured.lock().expect("capture lock").clone()
    }
}

async fn handle(
    req: HttpRequest,
    body: web::Bytes,
    reply: web::Data<StubReply>,
    captured: web::Data<Arc<Mutex<Captured>>>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    *captured.lock().expect("capture lock") = Captured {
        query: req.query_string().to_owned(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.to_vec(),
    };
    if !reply.delay.is_zero() {
        actix_web::rt::time::sleep(reply.delay).await;
    }
    HttpResponse::build(reply.status)
        .content_type("application/json")
        .body(reply.body.clone())
}

fn spawn_stub(status: StatusCode, body: Value, delay: Duration) -> Stub {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let reply = StubReply {
        status,
        body: body.to_string(),
        delay,
    };
    let shared = captured.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(reply.clone()))
            .app_data(web::Data::new(shared.clone()))
            .route("/provider", web::post().to(handle))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind stub server");
    let addr = *server.addrs().first().expect("bound address");
    actix_web::rt::spawn(server.run());
    Stub { addr, captured }
}

fn image() -> ImagePayload {
    ImagePayload::try_new(b"jpeg".to_vec()).expect("non-empty image")
}

fn request_json(captured: &Captured) -> Value {
    serde_json::from_slice(&captured.body).expect("request body is JSON")
}

#[actix_web::test]
async fn label_client_posts_base64_annotate_request() {
    let reply = json!({
        "responses": [{ "labelAnnotations": [{ "description": "Mug", "score": 0.9 }] }]
    });
    let stub = spawn_stub(StatusCode::OK, reply.clone(), Duration::ZERO);
    let client = VisionLabelClient::new(stub.endpoint(Duration::from_secs(5))).expect("client");

    let raw = client
        .identify(&image(), &ProviderOptions::default())
        .await
        .expect("stub replies 200");

    assert_eq!(raw, reply);
    let captured = stub.captured();
    assert_eq!(captured.query, "key=secret-key");
    let body = request_json(&captured);
    assert_eq!(body["requests"][0]["image"]["content"], json!("anBlZw=="));
    assert_eq!(
        body["requests"][0]["features"][0]["type"],
        json!("LABEL_DETECTION")
    );
}

#[actix_web::test]
async fn multimodal_client_sends_bearer_token_and_data_url() {
    let reply = json!({ "choices": [{ "message": { "content": "{}" } }] });
    let stub = spawn_stub(StatusCode::OK, reply, Duration::ZERO);
    let client = OpenAiVisionClient::new(stub.endpoint(Duration::from_secs(5)), "gpt-4o-mini")
        .expect("client");

    client
        .identify(&image(), &ProviderOptions::default())
        .await
        .expect("stub replies 200");

    let captured = stub.captured();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer secret-key"));
    let body = request_json(&captured);
    assert_eq!(body["model"], json!("gpt-4o-mini"));
    let serialised = body.to_string();
    assert!(serialised.contains("data:image/jpeg;base64,anBlZw=="));
}

#[actix_web::test]
async fn plantnet_client_uploads_multipart_with_organs() {
    let stub = spawn_stub(StatusCode::OK, json!({ "results": [] }), Duration::ZERO);
    let client = PlantNetClient::new(stub.endpoint(Duration::from_secs(5))).expect("client");

    client
        .identify(&image(), &ProviderOptions::with_organs("flower"))
        .await
        .expect("stub replies 200");

    let captured = stub.captured();
    assert_eq!(captured.query, "api-key=secret-key");
    assert!(
        captured
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    );
    let body = String::from_utf8_lossy(&captured.body);
    assert!(body.contains("name=\"images\""));
    assert!(body.contains("filename=\"capture.jpg\""));
    assert!(body.contains("name=\"organs\""));
    assert!(body.contains("flower"));
}

#[actix_web::test]
async fn non_success_status_keeps_body() {
    let stub = spawn_stub(
        StatusCode::UNAUTHORIZED,
        json!({ "error": { "message": "Incorrect API key provided" } }),
        Duration::ZERO,
    );
    let client = OpenAiVisionClient::new(stub.endpoint(Duration::from_secs(5)), "gpt-4o-mini")
        .expect("client");

    let err = client
        .identify(&image(), &ProviderOptions::default())
        .await
        .expect_err("401 is an error");

    assert_eq!(err.http_status(), Some(401));
    assert!(err.body().is_some_and(|body| body.contains("Incorrect API key")));
}

#[actix_web::test]
async fn slow_provider_times_out() {
    let stub = spawn_stub(StatusCode::OK, json!({}), Duration::from_secs(2));
    let client = VisionLabelClient::new(stub.endpoint(Duration::from_millis(200))).expect("client");

    let err = client
        .identify(&image(), &ProviderOptions::default())
        .await
        .expect_err("request should time out");

    assert!(matches!(err, ProviderClientError::Timeout { .. }), "got {err:?}");
}
