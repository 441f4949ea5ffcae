use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};

use storefront_auth::{
    AccessToken, AuthContext, FileSessionStore, Gate, MemorySessionStore, Session, protect,
};
use storefront_client::{
    AuthApi, ClientConfig, HttpProductApi, LoginError, SUCCESS_MESSAGE, SubmissionError,
    SubmissionPipeline,
};
use storefront_core::{NotificationLevel, NotificationLog, Route, UserId};
use storefront_products::{
    FileHandle, FormState, PreviewUrls, ProductDraft, ProductForm, SubmitBlocked, UploadPolicy,
};

#[derive(Debug, Clone, Default)]
struct CapturedRequest {
    authorization: Option<String>,
    content_type: Option<String>,
    fields: Vec<(String, String)>,
    pictures: Vec<(String, Option<String>, Vec<u8>)>,
}

#[derive(Clone)]
struct MockBackend {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: Value,
}

async fn create_product(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    let mut captured = CapturedRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        ..CapturedRequest::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pictures" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_owned);
            let data = field.bytes().await.unwrap();
            captured.pictures.push((file_name, content_type, data.to_vec()));
        } else {
            let text = field.text().await.unwrap();
            captured.fields.push((name, text));
        }
    }

    backend.requests.lock().unwrap().push(captured);
    (backend.status, Json(backend.body.clone()))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "seller@example.com" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({ "token": "jwt-from-login", "userId": "65f0aa" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(status: StatusCode, body: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let backend = MockBackend {
            requests: requests.clone(),
            status,
            body,
        };
        let app = Router::new()
            .route("/products", post(create_product))
            .route("/auth/login", post(login))
            .with_state(backend);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            requests,
            handle,
        }
    }

    fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, "/nonexistent/session.json").unwrap()
}

fn logged_in() -> AuthContext {
    let mut auth = AuthContext::new(Arc::new(MemorySessionStore::new()));
    auth.login(Session::new(
        AccessToken::new("jwt-123").unwrap(),
        UserId::new("user-42").unwrap(),
    ))
    .unwrap();
    auth
}

fn filled_form(name: &str) -> (ProductForm, PreviewUrls) {
    let previews = PreviewUrls::new();
    let mut form = ProductForm::new(UploadPolicy::default(), previews.clone());
    form.set_name(name);
    form.set_price("12.5");
    form.set_quantity("3");
    form.add_files(vec![
        FileHandle::in_memory("front.png", vec![1u8, 2, 3]),
        FileHandle::in_memory("back.jpg", vec![4u8, 5]),
    ])
    .unwrap();
    (form, previews)
}

fn pipeline(base_url: &str) -> (SubmissionPipeline<HttpProductApi>, NotificationLog) {
    let log = NotificationLog::new();
    let api = HttpProductApi::new(&config(base_url)).unwrap();
    (SubmissionPipeline::new(api, Arc::new(log.clone())), log)
}

#[tokio::test]
async fn multipart_request_carries_fields_pictures_and_bearer_token() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({ "id": "p1" })).await;
    let (pipeline, _log) = pipeline(&srv.base_url);
    let (mut form, _) = filled_form("Desk lamp");

    let dir = tempfile::tempdir().unwrap();
    let on_disk = dir.path().join("side.webp");
    std::fs::write(&on_disk, b"webp-bytes").unwrap();
    form.add_files(vec![FileHandle::on_disk(&on_disk, 10)]).unwrap();

    pipeline.submit(&mut form, &logged_in()).await.unwrap();

    let requests = srv.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];

    assert_eq!(req.authorization.as_deref(), Some("Bearer jwt-123"));
    assert!(
        req.content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("multipart/form-data")
    );

    let fields: Vec<(&str, &str)> = req
        .fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        fields,
        [
            ("name", "Desk lamp"),
            ("price", "12.5"),
            ("quantity", "3"),
            ("userId", "user-42"),
        ]
    );

    let names: Vec<&str> = req.pictures.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, ["front.png", "back.jpg", "side.webp"]);
    assert_eq!(req.pictures[0].1.as_deref(), Some("image/png"));
    assert_eq!(req.pictures[0].2, vec![1u8, 2, 3]);
    assert_eq!(req.pictures[2].2, b"webp-bytes".to_vec());
}

#[tokio::test]
async fn success_clears_form_and_notifies_once() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({})).await;
    let (pipeline, log) = pipeline(&srv.base_url);
    let (mut form, previews) = filled_form("Desk lamp");

    pipeline.submit(&mut form, &logged_in()).await.unwrap();

    assert_eq!(form.state(), FormState::Empty);
    assert_eq!(form.draft(), &ProductDraft::default());
    assert!(form.images().is_empty());
    assert!(form.input_files().is_empty());
    assert_eq!(previews.live_count(), 0);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, NotificationLevel::Success);
    assert_eq!(entries[0].message, SUCCESS_MESSAGE);
    assert_eq!(entries[0].message, "product created successful!");
}

#[tokio::test]
async fn server_rejection_keeps_form_and_reports_message() {
    let srv = TestServer::spawn(
        StatusCode::BAD_REQUEST,
        json!({ "message": "Product name already exists" }),
    )
    .await;
    let (pipeline, log) = pipeline(&srv.base_url);
    let (mut form, previews) = filled_form("Desk lamp");
    let before = form.draft().clone();

    let err = pipeline.submit(&mut form, &logged_in()).await.unwrap_err();

    match &err {
        SubmissionError::ServerRejected { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Product name already exists");
        }
        other => panic!("expected ServerRejected, got {other:?}"),
    }
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.draft(), &before);
    assert_eq!(form.images().len(), 2);
    assert_eq!(previews.live_count(), 2);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_error());
    assert_eq!(entries[0].message, "Product name already exists");
}

#[tokio::test]
async fn network_failure_keeps_form_and_reports_message() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (pipeline, log) = pipeline(&base_url);
    let (mut form, _) = filled_form("Desk lamp");
    let before = form.draft().clone();

    let err = pipeline.submit(&mut form, &logged_in()).await.unwrap_err();

    assert!(matches!(err, SubmissionError::Network(_)));
    assert_eq!(form.draft(), &before);
    assert_eq!(form.images().len(), 2);
    assert_eq!(form.state(), FormState::Editing);

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_error());
    assert_eq!(entries[0].message, err.to_string());
    assert!(!entries[0].message.is_empty());
}

#[tokio::test]
async fn invalid_name_sends_no_request() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({})).await;
    let (pipeline, log) = pipeline(&srv.base_url);
    let (mut form, _) = filled_form("ab");

    let err = pipeline.submit(&mut form, &logged_in()).await.unwrap_err();

    assert!(matches!(
        err,
        SubmissionError::Blocked(SubmitBlocked::Invalid(_))
    ));
    assert_eq!(srv.requests().len(), 0);
    assert!(log.is_empty());
}

#[tokio::test]
async fn login_returns_session_for_valid_credentials() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({})).await;
    let api = AuthApi::new(&config(&srv.base_url)).unwrap();

    let session = api.login("seller@example.com", "secret").await.unwrap();

    assert_eq!(session.token().as_str(), "jwt-from-login");
    assert_eq!(session.user_id().as_str(), "65f0aa");
}

#[tokio::test]
async fn login_rejection_carries_server_message() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({})).await;
    let api = AuthApi::new(&config(&srv.base_url)).unwrap();

    match api.login("seller@example.com", "wrong").await {
        Err(LoginError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn login_submit_logout_round_trip_with_persisted_session() {
    let srv = TestServer::spawn(StatusCode::CREATED, json!({})).await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let log = NotificationLog::new();

    // Log in and persist.
    let api = AuthApi::new(&config(&srv.base_url)).unwrap();
    let session = api.login("seller@example.com", "secret").await.unwrap();
    AuthContext::new(Arc::new(FileSessionStore::new(&session_file)))
        .login(session)
        .unwrap();

    // A fresh context (new process) picks the session up again.
    let mut auth = AuthContext::restore(Arc::new(FileSessionStore::new(&session_file))).unwrap();
    assert!(protect(&auth, &|s: &Session| s.user_id().to_string()).is_render());

    let (pipeline, _) = pipeline(&srv.base_url);
    let (mut form, _) = filled_form("Desk lamp");
    pipeline.submit(&mut form, &auth).await.unwrap();
    assert_eq!(
        srv.requests()[0].authorization.as_deref(),
        Some("Bearer jwt-from-login")
    );

    assert_eq!(auth.logout(&log), Route::Login);
    assert!(auth.current_session().is_none());
    assert_eq!(
        protect(&auth, &|s: &Session| s.user_id().to_string()),
        Gate::Redirect(Route::Login)
    );

    let reopened = AuthContext::restore(Arc::new(FileSessionStore::new(&session_file))).unwrap();
    assert!(!reopened.is_authenticated());
}
