//! In-process stub of the academy backend for integration tests.
//!
//! Speaks the production wire format: `{ data, pagination?, message? }`
//! envelopes, `_id`/camelCase field names, redacted stubs for secret posts
//! and `message`-bearing error bodies.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password123";
pub const ADMIN_TOKEN: &str = "stub-admin-token";

/// A consultation as stored by the stub.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub id: String,
    pub writer_id: String,
    pub title: String,
    pub content: String,
    /// `Some` marks the post secret.
    pub password: Option<String>,
    /// Admin replies as (id, content) pairs.
    pub comments: Vec<(String, String)>,
    pub deleted: bool,
    pub view_count: u64,
}

/// Shared stub state with request counters the tests assert on.
#[derive(Clone, Default)]
pub struct StubBackend {
    posts: Arc<Mutex<BTreeMap<String, StoredPost>>>,
    notices: Arc<Mutex<BTreeMap<String, Value>>>,
    passers: Arc<Mutex<BTreeMap<String, Value>>>,
    /// Uploaded image keys mapped to their byte size.
    images: Arc<Mutex<BTreeMap<String, u64>>>,
    next_id: Arc<AtomicUsize>,
    /// Number of `GET /consultations/{id}` calls served.
    pub fetches: Arc<AtomicUsize>,
    /// Number of `check-password` calls served.
    pub password_checks: Arc<AtomicUsize>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_public(&self, id: &str, title: &str, content: &str) {
        self.insert(StoredPost {
            id: id.to_string(),
            writer_id: "hong".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            password: None,
            comments: vec![],
            deleted: false,
            view_count: 0,
        });
    }

    pub fn insert_secret(&self, id: &str, title: &str, content: &str, password: &str) {
        self.insert(StoredPost {
            id: id.to_string(),
            writer_id: "hong".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            password: Some(password.to_string()),
            comments: vec![],
            deleted: false,
            view_count: 0,
        });
    }

    pub fn insert(&self, post: StoredPost) {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
    }

    pub fn add_comment(&self, post_id: &str, comment_id: &str, content: &str) {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.get_mut(post_id).expect("unknown post id");
        post.comments
            .push((comment_id.to_string(), content.to_string()));
    }

    pub fn insert_notice(&self, id: &str, title: &str, content: &str) {
        self.notices.lock().unwrap().insert(
            id.to_string(),
            json!({
                "_id": id,
                "title": title,
                "content": content,
                "viewCount": 5,
                "createdAt": "2024-03-01T00:00:00Z"
            }),
        );
    }

    pub fn insert_passer(&self, id: &str, title: &str, image_urls: &[&str]) {
        self.passers.lock().unwrap().insert(
            id.to_string(),
            json!({
                "_id": id,
                "title": title,
                "thumbnailUrl": "https://cdn.example.com/thumb.jpg",
                "imageUrls": image_urls,
                "viewCount": 3,
                "createdAt": "2024-02-10T00:00:00Z"
            }),
        );
    }

    pub fn has_image(&self, key: &str) -> bool {
        self.images.lock().unwrap().contains_key(key)
    }

    pub fn is_deleted(&self, id: &str) -> bool {
        self.posts
            .lock()
            .unwrap()
            .get(id)
            .map(|p| p.deleted)
            .unwrap_or(false)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.posts.lock().unwrap().contains_key(id)
    }

    fn fresh_id(&self) -> String {
        format!("p{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn full_json(post: &StoredPost) -> Value {
    json!({
        "_id": post.id,
        "writerId": post.writer_id,
        "title": post.title,
        "content": post.content,
        "isSecret": post.password.is_some(),
        "status": if post.comments.is_empty() { "PENDING" } else { "ANSWERED" },
        "boardType": "INQUIRY",
        "viewCount": post.view_count,
        "comments": post.comments.iter().map(|(id, content)| json!({
            "_id": id,
            "content": content,
            "createdAt": "2024-01-16T09:00:00Z",
            "updatedAt": "2024-01-16T09:00:00Z"
        })).collect::<Vec<_>>(),
        "needPassword": false,
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z"
    })
}

fn redacted_json(post: &StoredPost) -> Value {
    json!({
        "_id": post.id,
        "writerId": post.writer_id,
        "title": post.title,
        "needPassword": true,
        "createdAt": "2024-01-15T10:30:00Z"
    })
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "게시글을 찾을 수 없습니다." })),
    )
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "data": data }))
}

async fn list_consultations(
    State(backend): State<StubBackend>,
    Query(params): Query<BTreeMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let posts = backend.posts.lock().unwrap();
    let items: Vec<Value> = posts
        .values()
        .filter(|p| !p.deleted)
        .map(|p| {
            if p.password.is_some() {
                redacted_json(p)
            } else {
                full_json(p)
            }
        })
        .collect();
    let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let total = items.len() as u64;
    (
        StatusCode::OK,
        Json(json!({
            "data": items,
            "pagination": { "currentPage": page, "totalPages": 1, "totalItems": total }
        })),
    )
}

async fn create_consultation(
    State(backend): State<StubBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = backend.fresh_id();
    let post = StoredPost {
        id: id.clone(),
        writer_id: body["writerId"].as_str().unwrap_or_default().to_string(),
        title: body["title"].as_str().unwrap_or_default().to_string(),
        content: body["content"].as_str().unwrap_or_default().to_string(),
        password: body["password"].as_str().map(str::to_string),
        comments: vec![],
        deleted: false,
        view_count: 0,
    };
    let rendered = full_json(&post);
    backend.insert(post);
    (StatusCode::CREATED, envelope(rendered))
}

async fn get_consultation(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    backend.fetches.fetch_add(1, Ordering::SeqCst);
    let posts = backend.posts.lock().unwrap();
    match posts.get(&id).filter(|p| !p.deleted) {
        None => not_found(),
        Some(post) if post.password.is_some() => (StatusCode::OK, envelope(redacted_json(post))),
        Some(post) => (StatusCode::OK, envelope(full_json(post))),
    }
}

async fn check_password(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.password_checks.fetch_add(1, Ordering::SeqCst);
    let posts = backend.posts.lock().unwrap();
    let Some(post) = posts.get(&id).filter(|p| !p.deleted) else {
        return not_found();
    };
    let candidate = body["password"].as_str().unwrap_or_default();
    if post.password.as_deref() == Some(candidate) {
        (StatusCode::OK, envelope(full_json(post)))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "비밀번호가 일치하지 않습니다" })),
        )
    }
}

async fn update_consultation(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    let Some(post) = posts.get_mut(&id).filter(|p| !p.deleted) else {
        return not_found();
    };
    if let Some(title) = body["title"].as_str() {
        post.title = title.to_string();
    }
    if let Some(content) = body["content"].as_str() {
        post.content = content.to_string();
    }
    (StatusCode::OK, envelope(full_json(post)))
}

async fn delete_consultation(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    let Some(post) = posts.get_mut(&id).filter(|p| !p.deleted) else {
        return not_found();
    };
    if let Some(expected) = &post.password {
        let candidate = body["password"].as_str().unwrap_or_default();
        if candidate != expected {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "비밀번호가 일치하지 않습니다" })),
            );
        }
    }
    post.deleted = true;
    (
        StatusCode::OK,
        Json(json!({ "data": null, "message": "삭제되었습니다." })),
    )
}

async fn restore_consultation(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    match posts.get_mut(&id) {
        None => not_found(),
        Some(post) => {
            post.deleted = false;
            (StatusCode::OK, Json(json!({ "data": null })))
        }
    }
}

async fn force_delete_consultation(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    match posts.remove(&id) {
        None => not_found(),
        Some(_) => (StatusCode::OK, Json(json!({ "data": null }))),
    }
}

async fn list_deleted(State(backend): State<StubBackend>) -> (StatusCode, Json<Value>) {
    let posts = backend.posts.lock().unwrap();
    let items: Vec<Value> = posts
        .values()
        .filter(|p| p.deleted)
        .map(full_json)
        .collect();
    let total = items.len() as u64;
    (
        StatusCode::OK,
        Json(json!({
            "data": items,
            "pagination": { "currentPage": 1, "totalPages": 1, "totalItems": total }
        })),
    )
}

async fn bulk_restore(
    State(backend): State<StubBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    if let Some(ids) = body["ids"].as_array() {
        for id in ids.iter().filter_map(|v| v.as_str()) {
            if let Some(post) = posts.get_mut(id) {
                post.deleted = false;
            }
        }
    }
    (StatusCode::OK, Json(json!({ "data": null })))
}

async fn bulk_force_delete(
    State(backend): State<StubBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut posts = backend.posts.lock().unwrap();
    if let Some(ids) = body["ids"].as_array() {
        for id in ids.iter().filter_map(|v| v.as_str()) {
            posts.remove(id);
        }
    }
    (StatusCode::OK, Json(json!({ "data": null })))
}

async fn list_comments(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let posts = backend.posts.lock().unwrap();
    let Some(post) = posts.get(&id) else {
        return not_found();
    };
    let comments: Vec<Value> = post
        .comments
        .iter()
        .map(|(id, content)| {
            json!({
                "_id": id,
                "content": content,
                "createdAt": "2024-01-16T09:00:00Z",
                "updatedAt": "2024-01-16T09:00:00Z"
            })
        })
        .collect();
    (StatusCode::OK, envelope(json!(comments)))
}

async fn create_comment(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut posts = backend.posts.lock().unwrap();
    let Some(post) = posts.get_mut(&id) else {
        return not_found();
    };
    let comment_id = format!("c{}", post.comments.len() + 1);
    let content = body["content"].as_str().unwrap_or_default().to_string();
    post.comments.push((comment_id.clone(), content.clone()));
    (
        StatusCode::CREATED,
        envelope(json!({
            "_id": comment_id,
            "content": content,
            "createdAt": "2024-01-16T09:00:00Z",
            "updatedAt": "2024-01-16T09:00:00Z"
        })),
    )
}

async fn update_comment(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut posts = backend.posts.lock().unwrap();
    let comment = posts
        .values_mut()
        .flat_map(|post| post.comments.iter_mut())
        .find(|(comment_id, _)| comment_id == &id);
    let Some((comment_id, content)) = comment else {
        return not_found();
    };
    if let Some(new_content) = body["content"].as_str() {
        *content = new_content.to_string();
    }
    (
        StatusCode::OK,
        envelope(json!({
            "_id": comment_id,
            "content": content,
            "createdAt": "2024-01-16T09:00:00Z",
            "updatedAt": "2024-01-17T09:00:00Z"
        })),
    )
}

async fn delete_comment(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut posts = backend.posts.lock().unwrap();
    for post in posts.values_mut() {
        let before = post.comments.len();
        post.comments.retain(|(comment_id, _)| comment_id != &id);
        if post.comments.len() < before {
            return (StatusCode::OK, Json(json!({ "data": null })));
        }
    }
    not_found()
}

async fn list_passers(State(backend): State<StubBackend>) -> (StatusCode, Json<Value>) {
    let passers = backend.passers.lock().unwrap();
    let items: Vec<Value> = passers.values().cloned().collect();
    let total = items.len() as u64;
    (
        StatusCode::OK,
        Json(json!({
            "data": items,
            "pagination": { "currentPage": 1, "totalPages": 1, "totalItems": total }
        })),
    )
}

async fn get_passer(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let passers = backend.passers.lock().unwrap();
    match passers.get(&id) {
        None => not_found(),
        Some(passer) => (StatusCode::OK, envelope(passer.clone())),
    }
}

fn image_json(key: &str, size: u64) -> Value {
    json!({
        "key": key,
        "url": format!("https://cdn.example.com/{}", key),
        "size": size,
        "lastModified": "2024-04-01T00:00:00.000Z"
    })
}

async fn upload_image(
    State(backend): State<StubBackend>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut file_name = String::new();
    let mut size = 0u64;
    let mut folder = "images".to_string();
    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("image") => {
                file_name = field.file_name().unwrap_or("file").to_string();
                size = field.bytes().await.map(|b| b.len() as u64).unwrap_or(0);
            }
            Some("folder") => folder = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }
    let key = format!("{}/{}", folder, file_name);
    backend.images.lock().unwrap().insert(key.clone(), size);
    (StatusCode::CREATED, envelope(image_json(&key, size)))
}

async fn upload_multiple_images(
    State(backend): State<StubBackend>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut files: Vec<(String, u64)> = Vec::new();
    let mut folder = "images".to_string();
    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("images") => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let size = field.bytes().await.map(|b| b.len() as u64).unwrap_or(0);
                files.push((file_name, size));
            }
            Some("folder") => folder = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }
    let mut images = backend.images.lock().unwrap();
    let rendered: Vec<Value> = files
        .into_iter()
        .map(|(file_name, size)| {
            let key = format!("{}/{}", folder, file_name);
            images.insert(key.clone(), size);
            image_json(&key, size)
        })
        .collect();
    (StatusCode::CREATED, envelope(json!(rendered)))
}

async fn list_images(
    State(backend): State<StubBackend>,
    Query(params): Query<BTreeMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let folder = params.get("folder").cloned().unwrap_or_default();
    let max_keys: usize = params
        .get("maxKeys")
        .and_then(|m| m.parse().ok())
        .unwrap_or(100);
    let images = backend.images.lock().unwrap();
    let items: Vec<Value> = images
        .iter()
        .filter(|(key, _)| key.starts_with(&format!("{}/", folder)))
        .take(max_keys)
        .map(|(key, size)| image_json(key, *size))
        .collect();
    (StatusCode::OK, envelope(json!(items)))
}

async fn delete_image(
    State(backend): State<StubBackend>,
    Query(params): Query<BTreeMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let Some(key) = params.get("key") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "key is required" })),
        );
    };
    match backend.images.lock().unwrap().remove(key) {
        None => not_found(),
        Some(_) => (StatusCode::OK, Json(json!({ "data": null }))),
    }
}

async fn list_notices(State(backend): State<StubBackend>) -> (StatusCode, Json<Value>) {
    let notices = backend.notices.lock().unwrap();
    let items: Vec<Value> = notices.values().cloned().collect();
    let total = items.len() as u64;
    (
        StatusCode::OK,
        Json(json!({
            "data": items,
            "pagination": { "currentPage": 1, "totalPages": 1, "totalItems": total }
        })),
    )
}

async fn get_notice(
    State(backend): State<StubBackend>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let notices = backend.notices.lock().unwrap();
    match notices.get(&id) {
        None => not_found(),
        Some(notice) => (StatusCode::OK, envelope(notice.clone())),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", ADMIN_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "인증이 필요합니다" })),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        (
            StatusCode::OK,
            envelope(json!({
                "token": ADMIN_TOKEN,
                "user": { "_id": "u1", "email": ADMIN_EMAIL, "name": "관리자" }
            })),
        )
    } else {
        unauthorized()
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (
            StatusCode::OK,
            envelope(json!({ "_id": "u1", "email": ADMIN_EMAIL, "name": "관리자" })),
        )
    } else {
        unauthorized()
    }
}

async fn logout() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "data": null })))
}

fn router(backend: StubBackend) -> Router {
    Router::new()
        .route(
            "/api/consultations",
            get(list_consultations).post(create_consultation),
        )
        .route("/api/consultations/deleted", get(list_deleted))
        .route("/api/consultations/bulk-restore", post(bulk_restore))
        .route(
            "/api/consultations/bulk-force",
            axum::routing::delete(bulk_force_delete),
        )
        .route(
            "/api/consultations/:id",
            get(get_consultation)
                .patch(update_consultation)
                .delete(delete_consultation),
        )
        .route("/api/consultations/:id/check-password", post(check_password))
        .route("/api/consultations/:id/restore", post(restore_consultation))
        .route(
            "/api/consultations/:id/force",
            axum::routing::delete(force_delete_consultation),
        )
        .route(
            "/api/consultations/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/comments/:id",
            axum::routing::patch(update_comment).delete(delete_comment),
        )
        .route("/api/notices", get(list_notices))
        .route("/api/notices/:id", get(get_notice))
        .route("/api/passers", get(list_passers))
        .route("/api/passers/:id", get(get_passer))
        .route("/api/images/upload", post(upload_image))
        .route("/api/images/upload-multiple", post(upload_multiple_images))
        .route("/api/images/list", get(list_images))
        .route("/api/images", axum::routing::delete(delete_image))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .with_state(backend)
}

/// Serve the stub on an ephemeral port and return its base URL.
pub async fn spawn(backend: StubBackend) -> String {
    let app = router(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub backend");
    let addr = listener.local_addr().expect("stub backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend died");
    });
    format!("http://{}", addr)
}
