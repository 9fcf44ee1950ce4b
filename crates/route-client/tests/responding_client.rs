//! Responses captured alongside decoded payloads.

mod common;

use common::{factory, ExampleApi, ExampleController, ExampleRequest, ExampleResponse};
use pretty_assertions::assert_eq;
use route_client::http::{HeaderName, HeaderValue};
use route_client::{AssertionFailure, Error};

#[test_log::test]
fn should_return_internal_server_error() {
    let client = factory().responding_client::<ExampleController>();
    let response = client
        .execute_function(|c| c.enum_example())
        .unwrap();
    assert_eq!(response.status_code(), 500);
    assert_eq!(response.body(), None);
    assert_eq!(response.error_message(), Some("Unknown enum value"));
}

#[test_log::test]
fn basic_get() {
    let client = factory().responding_client::<ExampleController>();
    let response = client
        .execute_function(|c| c.example_method())
        .unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.content_type(), Some("application/json"));
    assert!(response.content_length() > 0);
    assert_eq!(response.error_message(), None);
    assert_eq!(
        response.into_body(),
        Some(ExampleResponse::new("Hello world!"))
    );
}

#[test_log::test]
fn post_with_body() {
    let client = factory().responding_client::<ExampleController>();
    let request = ExampleRequest {
        message: "Test message".to_string(),
    };
    let response = client
        .execute_function(move |c| c.body_example(request))
        .unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.body().map(|r| r.message.as_str()),
        Some("Received: Test message")
    );
}

#[test_log::test]
fn consumer_captures_status() {
    let client = factory().responding_client::<ExampleController>();
    let response = client.execute_consumer(|c| c.delete_item(9)).unwrap();
    assert_eq!(response.status_code(), 204);
    assert_eq!(response.content_length(), 0);
    assert_eq!(response.body(), None);
}

#[test_log::test]
fn each_execution_reports_its_own_response() {
    let client = factory().responding_client::<ExampleController>();
    let failed = client.execute_function(|c| c.enum_example()).unwrap();
    let ok = client.execute_function(|c| c.example_method()).unwrap();
    assert_eq!(failed.status_code(), 500);
    assert_eq!(ok.status_code(), 200);
}

#[test_log::test]
fn action_without_call_is_rejected() {
    let client = factory().responding_client::<ExampleController>();
    let err = client
        .execute_function(|_| Ok(Some(1_u8)))
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "{err:?}");
}

#[test_log::test]
fn customized_request_reaches_the_handler() {
    let client = factory()
        .responding_client::<ExampleController>()
        .customize_request(|request| {
            request.header(
                HeaderName::from_static("x-example-header"),
                HeaderValue::from_static("responding"),
            );
        });
    let response = client
        .execute_function(|c| c.header_example(None))
        .unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.into_body(),
        Some(ExampleResponse::new("Header value: responding"))
    );
}

#[test_log::test]
fn response_customizer_sees_every_call() {
    let client = factory()
        .responding_client::<ExampleController>()
        .customize_response(|response| {
            if response.status().is_server_error() {
                Err(AssertionFailure::new(format!(
                    "server error {}",
                    response.status().as_u16()
                )))
            } else {
                Ok(())
            }
        });

    let ok = client.execute_function(|c| c.example_method()).unwrap();
    assert_eq!(ok.status_code(), 200);

    let err = client
        .execute_function(|c| c.enum_example())
        .unwrap_err();
    match err {
        Error::Assertion(failure) => assert_eq!(failure.message(), "server error 500"),
        other => panic!("unexpected error: {other:?}"),
    }
}
