//! In-process stand-in for the REST backend, served by axum on a random port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::{Multipart, Path, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use internship_portal::{config::Config, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

#[derive(Default)]
pub struct Backend {
    pub applications: Vec<JsonValue>,
    pub internships: Vec<JsonValue>,
    pub certificates: Vec<JsonValue>,
    /// Bodies received on `PUT /api/applications/:id`, in arrival order.
    pub status_updates: Vec<(String, JsonValue)>,
    /// Parts received on `POST /api/documents`.
    pub uploads: Vec<JsonValue>,
}

type Shared = Arc<Mutex<Backend>>;

fn caller(headers: &HeaderMap) -> Option<JsonValue> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    match token {
        ADMIN_TOKEN => Some(json!({
            "_id": "admin-1", "name": "Portal Admin", "email": "admin@example.com", "role": "admin"
        })),
        USER_TOKEN => Some(json!({
            "_id": "user-1", "name": "Asha Verma", "email": "asha@example.com", "role": "user"
        })),
        _ => None,
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or expired token" })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} not found", what) })),
    )
        .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    match caller(&headers) {
        Some(user) => Json(json!({ "data": user })).into_response(),
        None => unauthorized(),
    }
}

async fn list_applications(State(db): State<Shared>, headers: HeaderMap) -> Response {
    if caller(&headers).is_none() {
        return unauthorized();
    }
    let db = db.lock().unwrap();
    Json(json!({ "data": db.applications })).into_response()
}

async fn get_application(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if caller(&headers).is_none() {
        return unauthorized();
    }
    let db = db.lock().unwrap();
    match db.applications.iter().find(|a| a["_id"] == id.as_str()) {
        Some(app) => Json(app.clone()).into_response(),
        None => not_found("Application"),
    }
}

async fn update_application(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Response {
    if caller(&headers).is_none() {
        return unauthorized();
    }
    let mut db = db.lock().unwrap();
    db.status_updates.push((id.clone(), body.clone()));
    let Some(app) = db.applications.iter_mut().find(|a| a["_id"] == id.as_str()) else {
        return not_found("Application");
    };
    app["status"] = body["status"].clone();
    if let Some(details) = body.get("interviewDetails") {
        app["interviewDetails"] = details.clone();
    }
    if let Some(comments) = body.get("adminComments") {
        app["adminComments"] = comments.clone();
    }
    Json(json!({ "data": app.clone() })).into_response()
}

async fn create_application(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> Response {
    let Some(user) = caller(&headers) else {
        return unauthorized();
    };
    let mut db = db.lock().unwrap();
    let mut created = body;
    created["_id"] = json!(format!("app-{}", db.applications.len() + 1));
    created["userId"] = user["_id"].clone();
    created["status"] = json!("In_Review");
    created["createdAt"] = json!("2024-05-02T10:00:00Z");
    db.applications.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn list_internships(State(db): State<Shared>) -> Response {
    let db = db.lock().unwrap();
    Json(db.internships.clone()).into_response()
}

async fn get_internship(State(db): State<Shared>, Path(id): Path<String>) -> Response {
    let db = db.lock().unwrap();
    match db.internships.iter().find(|i| i["_id"] == id.as_str()) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found("Internship"),
    }
}

async fn verify_certificate(State(db): State<Shared>, Path(code): Path<String>) -> Response {
    let db = db.lock().unwrap();
    match db.certificates.iter().find(|c| c["certificateId"] == code.as_str()) {
        Some(cert) => Json(json!({ "data": cert })).into_response(),
        None => not_found("Certificate"),
    }
}

async fn upload_document(
    State(db): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if caller(&headers).is_none() {
        return unauthorized();
    }
    let mut received = json!({});
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "kind" => received["kind"] = json!(field.text().await.unwrap()),
            "file" => {
                received["fileName"] = json!(field.file_name().unwrap_or_default());
                received["contentType"] = json!(field.content_type());
                received["size"] = json!(field.bytes().await.unwrap().len());
            }
            _ => {}
        }
    }

    let mut db = db.lock().unwrap();
    db.uploads.push(received.clone());
    let document = json!({
        "_id": format!("doc-{}", db.uploads.len()),
        "userId": "user-1",
        "kind": received["kind"],
        "fileName": received["fileName"],
        "url": format!("https://files.example.com/{}", received["fileName"].as_str().unwrap_or("")),
    });
    (StatusCode::CREATED, Json(json!({ "data": document }))).into_response()
}

pub fn sample_backend() -> Backend {
    Backend {
        applications: vec![
            json!({
                "_id": "a1", "internshipId": "i1", "fullName": "Asha Verma",
                "email": "asha@example.com", "status": "In_Review",
                "createdAt": "2024-04-03T09:00:00Z"
            }),
            json!({
                "_id": "a2", "internshipId": "i2", "fullName": "Ravi Kumar",
                "email": "ravi@example.com", "status": "Shortlisted",
                "createdAt": "2024-04-01T09:00:00Z"
            }),
            json!({
                "_id": "a3", "internshipId": "i1", "fullName": "Meera Nair",
                "email": "meera@example.com", "status": "Rejected",
                "createdAt": "2024-04-02T09:00:00Z"
            }),
        ],
        internships: vec![
            json!({ "_id": "i1", "title": "Backend Intern", "category": "Stipend", "amount": "8000" }),
            json!({ "_id": "i2", "title": "Data Analyst", "category": "Free" }),
        ],
        certificates: vec![json!({
            "_id": "c1", "certificateId": "CERT-2024-001", "internName": "Meera Nair",
            "role": "Backend Intern", "startDate": "2024-01-01", "endDate": "2024-03-31"
        })],
        ..Default::default()
    }
}

pub async fn spawn_backend(backend: Backend) -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(backend));
    let app = Router::new()
        .route("/api/users/me/profile", get(me))
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/api/applications/:id",
            get(get_application).put(update_application),
        )
        .route("/api/internships", get(list_internships))
        .route("/api/internships/:id", get(get_internship))
        .route("/api/certificates/verify/:code", get(verify_certificate))
        .route("/api/documents", axum::routing::post(upload_document))
        .with_state(shared.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), shared)
}

/// Backend that answers every request with a non-JSON body and records the
/// method and raw path it was asked for.
pub async fn spawn_recording_backend() -> (String, Arc<Mutex<Vec<String>>>) {
    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .fallback(|State(seen): State<Arc<Mutex<Vec<String>>>>, method: Method, uri: Uri| async move {
            seen.lock().unwrap().push(format!("{} {}", method, uri.path()));
            "ok"
        })
        .with_state(seen.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

/// Gateway router wired to a fresh fake backend.
pub async fn portal(backend: Backend, debounce: Duration) -> (Router, Shared) {
    let (url, shared) = spawn_backend(backend).await;
    let mut config = Config::for_backend(&url).expect("config");
    config.search_debounce = debounce;
    let state = AppState::new(&config).expect("state");
    (routes::portal_router().with_state(state), shared)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<JsonValue>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn multipart_request(uri: &str, token: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    const BOUNDARY: &str = "portal-test-boundary";
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
