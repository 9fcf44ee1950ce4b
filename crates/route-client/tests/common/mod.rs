//! Shared fixtures: an axum example controller and its declared client surface.

#![allow(dead_code)]

use std::io::Cursor;

use axum::extract::{Multipart, Path, Query, RawQuery};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use route_client::{controller, ClientFactory, MultipartFile};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleResponse {
    pub message: String,
}

impl ExampleResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
}

controller! {
    /// Example controller mounted under `/example`.
    #[route("/example")]
    pub struct ExampleController;

    pub trait ExampleApi {
        #[get]
        fn example_method() -> ExampleResponse;

        #[post("/body")]
        fn body_example(#[body] request: ExampleRequest) -> ExampleResponse;

        #[get("/param")]
        fn param_example(#[query] message: Option<String>) -> ExampleResponse;

        #[get("/path/{message}")]
        fn path_example(#[path] message: Option<String>) -> ExampleResponse;

        /// Echoes the `X-Example-Header` request header.
        #[get("/header")]
        fn header_example(#[query(optional)] fallback: Option<String>) -> ExampleResponse;

        /// Always fails with a 500.
        #[get("/enum")]
        fn enum_example() -> ExampleResponse;

        #[get("/names")]
        fn names(#[query("name")] names: Vec<Option<String>>) -> Vec<String>;

        #[get("/items")]
        fn items(#[query(optional)] page: Option<u32>) -> Page<Item>;

        #[get("/items/all")]
        fn all_items() -> Vec<Item>;

        #[get("/items/all")]
        fn nested_items() -> Vec<Vec<Item>>;

        #[get("/text")]
        fn text() -> String;

        #[delete("/items/{id}")]
        fn delete_item(#[path] id: u64);

        #[post("/upload")]
        fn upload_file(file: MultipartFile) -> ExampleResponse;

        #[put("/upload")]
        fn upload_file_put(file: MultipartFile) -> ExampleResponse;

        #[post("/stream")]
        fn stream_file(input: Cursor<Vec<u8>>) -> String;

        #[request(methods = [GET, POST], path = "/ambiguous")]
        fn ambiguous();

        fn unrouted();
    }
}

#[derive(Debug, Deserialize)]
struct ParamQuery {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

async fn example_method() -> Json<ExampleResponse> {
    Json(ExampleResponse::new("Hello world!"))
}

async fn body_example(Json(request): Json<ExampleRequest>) -> Json<ExampleResponse> {
    Json(ExampleResponse::new(format!(
        "Received: {}",
        request.message
    )))
}

async fn param_example(Query(query): Query<ParamQuery>) -> Json<ExampleResponse> {
    let message = query.message.unwrap_or_else(|| "null".to_string());
    Json(ExampleResponse::new(format!("Received: {message}")))
}

async fn path_example(Path(message): Path<String>) -> Json<ExampleResponse> {
    Json(ExampleResponse::new(format!("Received: {message}")))
}

async fn header_example(headers: HeaderMap) -> Json<ExampleResponse> {
    let value = headers
        .get("x-example-header")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");
    Json(ExampleResponse::new(format!("Header value: {value}")))
}

async fn enum_example() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": {"code": 500, "message": "Unknown enum value"}})),
    )
}

async fn names(RawQuery(query): RawQuery) -> Json<Vec<String>> {
    let names = query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "name")
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_default()
        })
        .collect();
    Json(names)
}

fn sample_items() -> Vec<Item> {
    vec![
        Item {
            id: 1,
            name: "first".to_string(),
        },
        Item {
            id: 2,
            name: "second".to_string(),
        },
    ]
}

async fn items(Query(query): Query<PageQuery>) -> Json<Page<Item>> {
    Json(Page {
        items: sample_items(),
        page: query.page.unwrap_or(1),
    })
}

async fn all_items() -> Json<Vec<Item>> {
    Json(sample_items())
}

async fn text() -> &'static str {
    "plain text"
}

async fn delete_item(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn describe_upload(mut multipart: Multipart, prefix: &str) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            return Json(ExampleResponse::new(format!(
                "{prefix}: {file_name} ({content_type})"
            )))
            .into_response();
        }
    }
    StatusCode::BAD_REQUEST.into_response()
}

type Response = axum::response::Response;

async fn upload_file(multipart: Multipart) -> Response {
    describe_upload(multipart, "Uploaded File").await
}

async fn upload_file_put(multipart: Multipart) -> Response {
    describe_upload(multipart, "Uploaded File using put").await
}

async fn stream_file(headers: HeaderMap, body: String) -> String {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");
    format!("Received stream: {body} ({content_type})")
}

/// Router serving the example controller.
pub fn router() -> Router {
    Router::new()
        .route("/example", get(example_method))
        .route("/example/body", post(body_example))
        .route("/example/param", get(param_example))
        .route("/example/path/{message}", get(path_example))
        .route("/example/header", get(header_example))
        .route("/example/enum", get(enum_example))
        .route("/example/names", get(names))
        .route("/example/items", get(items))
        .route("/example/items/all", get(all_items))
        .route("/example/items/{id}", axum::routing::delete(delete_item))
        .route("/example/text", get(text))
        .route("/example/upload", post(upload_file).put(upload_file_put))
        .route("/example/stream", post(stream_file))
}

/// Factory dispatching into [`router`].
pub fn factory() -> ClientFactory {
    ClientFactory::for_router(router()).expect("router executor")
}

/// The multipart file used by the upload examples.
pub fn test_file() -> MultipartFile {
    MultipartFile::new("file", b"Hello, World!".to_vec())
        .with_file_name("test.txt")
        .with_content_type("text/plain")
}
