//! Request/response customizers, snapshots and client config.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{factory, router, ExampleApi, ExampleController, ExampleRequest, ExampleResponse};
use pretty_assertions::assert_eq;
use route_client::http::header::{ACCEPT, CONTENT_TYPE};
use route_client::http::{HeaderName, HeaderValue, Method, StatusCode};
use route_client::{
    expect, ClientBuilder, ClientConfig, ClientCustomizer, ClientFactory, Controller, Error,
    RawResponse, RequestDescriptor,
};

fn example_header() -> HeaderName {
    HeaderName::from_static("x-example-header")
}

#[test_log::test]
fn customize_request() {
    let client = factory()
        .builder::<ExampleController>()
        .customize_request(|request| {
            request.header(example_header(), HeaderValue::from_static("token"));
        })
        .build();
    let response = client.header_example(None).unwrap().unwrap();
    assert_eq!(response.message, "Header value: token");
}

#[test_log::test]
fn check_expected_status_using_builder() {
    let client = factory()
        .builder::<ExampleController>()
        .expect_status(200)
        .build();
    let response = client.example_method().unwrap();
    assert_eq!(response, Some(ExampleResponse::new("Hello world!")));
}

#[test_log::test]
fn unexpected_status_fails_the_call() {
    let client = factory()
        .builder::<ExampleController>()
        .with_expected_status(200);
    let err = client.enum_example().unwrap_err();
    match err {
        Error::Assertion(failure) => {
            assert_eq!(failure.message(), "expected status 200 but was 500");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test_log::test]
fn expected_error_status_passes() {
    let client = factory()
        .builder::<ExampleController>()
        .with_expected_status(500);
    assert_eq!(client.enum_example().unwrap(), None);
}

#[test_log::test]
fn create_expects_success() {
    let client = factory().create::<ExampleController>();
    assert!(client.example_method().unwrap().is_some());

    let err = client.enum_example().unwrap_err();
    assert!(matches!(err, Error::Assertion(_)), "{err:?}");
}

#[test_log::test]
fn build_takes_a_snapshot() {
    let builder = factory().builder::<ExampleController>();
    let before = builder.build();

    let builder = builder.customize_request(|request| {
        request.header(example_header(), HeaderValue::from_static("late"));
    });
    let after = builder.build();

    assert_eq!(
        before.header_example(None).unwrap().unwrap().message,
        "Header value: none"
    );
    assert_eq!(
        after.header_example(None).unwrap().unwrap().message,
        "Header value: late"
    );
}

#[test_log::test]
fn customizers_run_in_registration_order() {
    let client = factory()
        .builder::<ExampleController>()
        .customize_request(|request| {
            request.header(example_header(), HeaderValue::from_static("first"));
        })
        .customize_request(|request| {
            request
                .headers_mut()
                .insert(example_header(), HeaderValue::from_static("second"));
        })
        .build();
    assert_eq!(
        client.header_example(None).unwrap().unwrap().message,
        "Header value: second"
    );
}

#[test_log::test]
fn failed_expectation_skips_observers() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let client = factory()
        .builder::<ExampleController>()
        .expect_status(200)
        .observe_response(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    client.example_method().unwrap();
    assert!(client.enum_example().is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test_log::test]
fn response_expectations_compose() {
    let client = factory()
        .builder::<ExampleController>()
        .customize_response(expect::success())
        .customize_response(expect::content_type("application/json"))
        .build();
    assert!(client.example_method().unwrap().is_some());

    let err = client.text().unwrap_err();
    assert!(
        err.to_string().contains("expected content type 'application/json'"),
        "{err}"
    );
}

#[test_log::test]
fn context_path_and_default_headers() {
    let factory = ClientFactory::for_router(axum::Router::new().nest("/api", router()))
        .unwrap()
        .with_config(
            ClientConfig::new()
                .context_path("/api")
                .default_header(example_header(), HeaderValue::from_static("default")),
        );
    let client = factory.create::<ExampleController>();
    assert_eq!(
        client.header_example(None).unwrap().unwrap().message,
        "Header value: default"
    );
}

struct ExampleHeader(&'static str);

impl ClientCustomizer for ExampleHeader {
    fn customize<C: Controller>(&self, builder: ClientBuilder<C>) -> ClientBuilder<C> {
        let value = HeaderValue::from_static(self.0);
        builder
            .customize_request(move |request| {
                request.header(example_header(), value.clone());
            })
            .expect_status(200)
    }
}

#[test_log::test]
fn shared_customizer() {
    let client = factory()
        .customized::<ExampleController, _>(&ExampleHeader("shared"))
        .build();
    assert_eq!(
        client.header_example(None).unwrap().unwrap().message,
        "Header value: shared"
    );
}

#[test_log::test]
fn closure_executor_sees_final_request() {
    let captured: Arc<Mutex<Vec<(Method, String, Option<String>, Vec<u8>)>>> = Arc::default();
    let sink = Arc::clone(&captured);
    let factory = ClientFactory::new(
        move |request: RequestDescriptor| -> route_client::Result<RawResponse> {
            let content_type = request
                .body()
                .map(|body| body.content_type().to_string());
            let bytes = request
                .body()
                .map(|body| body.bytes().to_vec())
                .unwrap_or_default();
            sink.lock()
                .unwrap()
                .push((request.method().clone(), request.uri(), content_type, bytes));
            Ok(RawResponse::new(StatusCode::OK)
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .with_body(r#"{"message":"stubbed"}"#))
        },
    );

    let client = factory
        .builder::<ExampleController>()
        .customize_request(|request| {
            request.header(ACCEPT, HeaderValue::from_static("application/json"));
        })
        .build();
    let response = client
        .body_example(ExampleRequest {
            message: "hi".to_string(),
        })
        .unwrap();
    assert_eq!(response, Some(ExampleResponse::new("stubbed")));

    let captured = captured.lock().unwrap();
    assert_eq!(
        *captured,
        vec![(
            Method::POST,
            "/example/body".to_string(),
            Some("application/json".to_string()),
            br#"{"message":"hi"}"#.to_vec()
        )]
    );
}
