//! End-to-end dispatch through an axum application.

use axum::http::header::{CONTENT_ENCODING, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use inject_fetch::{FetchError, Request, ResponseType};
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_basic_get() {
    let (dispatcher, network) = common::dispatcher(Router::new().route("/hello", get(|| async { "world" })));

    let res = dispatcher.fetch(Request::get("http://example.com/hello")).await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.status_text(), "OK");
    assert!(res.ok());
    assert_eq!(res.text(), "world");
    assert_eq!(res.response_type(), ResponseType::Basic);
    assert_eq!(res.url().unwrap().as_str(), "http://example.com/hello");
    assert!(!res.redirected());
    assert!(network.seen().is_empty());
}

#[tokio::test]
async fn test_unrouted_path() {
    let (dispatcher, _) = common::dispatcher(Router::new().route("/hello", get(|| async { "world" })));

    let res = dispatcher.fetch(Request::get("http://example.com/nope")).await.unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.status_text(), "Not Found");
    assert!(!res.ok());
}

#[tokio::test]
async fn test_status_text_is_reason_phrase() {
    let router = Router::new().route("/tea", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }));
    let (dispatcher, _) = common::dispatcher(router);

    let res = dispatcher.fetch(Request::get("http://example.com/tea")).await.unwrap();

    assert_eq!(res.status(), 418);
    assert_eq!(res.status_text(), "I'm a teapot");
}

#[tokio::test]
async fn test_status_text_from_handler() {
    let router = Router::new().route(
        "/",
        get(|| async {
            let mut res = "hello".into_response();
            res.extensions_mut()
                .insert(hyper::ext::ReasonPhrase::from_static(b"Super"));
            res
        }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let res = dispatcher.fetch(Request::get("http://example.com/")).await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.status_text(), "Super");
}

#[tokio::test]
async fn test_data_url_gif() {
    let (dispatcher, network) = common::dispatcher(Router::new());

    let res = dispatcher
        .fetch(Request::get(
            "data:image/gif;base64,R0lGODlhAQABAIAAAAUEBAAAACwAAAAAAQABAAACAkQBADs=",
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("content-type").as_deref(), Some("image/gif"));
    assert_eq!(res.headers().len(), 1);
    let body = res.bytes();
    assert_eq!(body.len(), 35);
    assert_eq!(&body[..6], b"GIF89a");
    assert!(network.seen().is_empty());
}

#[tokio::test]
async fn test_data_url_plain_text() {
    let (dispatcher, _) = common::dispatcher(Router::new());

    let res = dispatcher.fetch(Request::get("data:,Hello%2C%20World!")).await.unwrap();

    assert_eq!(res.text(), "Hello, World!");
    assert_eq!(
        res.headers().get("content-type").as_deref(),
        Some("text/plain;charset=US-ASCII")
    );
}

#[tokio::test]
async fn test_data_url_unpadded_base64() {
    let (dispatcher, _) = common::dispatcher(Router::new());

    let res = dispatcher.fetch(Request::get("data:text/plain;base64,YQ")).await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text(), "a");
}

#[tokio::test]
async fn test_unsupported_scheme() {
    let (dispatcher, network) = common::dispatcher(Router::new());

    let err = dispatcher.fetch(Request::get("gopher://example.com/")).await.unwrap_err();

    assert!(matches!(err, FetchError::UnsupportedScheme(_)));
    assert_eq!(err.to_string(), "URL scheme \"gopher\" is not supported.");
    assert!(network.seen().is_empty());
}

#[tokio::test]
async fn test_unsupported_method() {
    let (dispatcher, _) = common::dispatcher(Router::new());

    let request = Request::builder("http://example.com/")
        .method("UNKNOWN_METHOD")
        .build()
        .unwrap();
    let err = dispatcher.fetch(request).await.unwrap_err();

    assert!(matches!(err, FetchError::UnsupportedMethod(_)));
    assert!(err.to_string().contains("must be equal to one of the allowed values"));
}

#[tokio::test]
async fn test_host_header_from_url() {
    let router = Router::new().route(
        "/",
        get(|headers: HeaderMap| async move { headers["host"].to_str().unwrap().to_string() }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let res = dispatcher.fetch(Request::get("http://example.com:3000/")).await.unwrap();
    assert_eq!(res.text(), "example.com:3000");

    let res = dispatcher.fetch(Request::get("https://example.com/")).await.unwrap();
    assert_eq!(res.text(), "example.com");
}

#[tokio::test]
async fn test_caller_headers_win() {
    let router = Router::new().route(
        "/",
        get(|headers: HeaderMap| async move { headers["user-agent"].to_str().unwrap().to_string() }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let request = Request::builder("http://example.com/")
        .header("User-Agent", "custom/1.0")
        .build()
        .unwrap();
    let res = dispatcher.fetch(request).await.unwrap();

    assert_eq!(res.text(), "custom/1.0");
}

#[tokio::test]
async fn test_post_text_body() {
    let router = Router::new().route(
        "/echo",
        post(|headers: HeaderMap, body: String| async move {
            let header = |name: &str| headers[name].to_str().unwrap().to_string();
            format!(
                "{}|{}|{}|{}",
                header("content-type"),
                header("content-length"),
                header("user-agent"),
                body
            )
        }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let request = Request::builder("http://example.com/echo")
        .method("post")
        .text("hello")
        .build()
        .unwrap();
    let res = dispatcher.fetch(request).await.unwrap();

    assert_eq!(res.text(), "text/plain;charset=UTF-8|5|inject-fetch|hello");
}

#[tokio::test]
async fn test_json_round_trip() {
    let router = Router::new().route(
        "/users",
        post(|Json(user): Json<Value>| async move { Json(json!({ "created": user["name"] })) }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let request = Request::builder("http://example.com/users")
        .method("POST")
        .json(&json!({ "name": "ferris" }))
        .build()
        .unwrap();
    let res = dispatcher.fetch(request).await.unwrap();

    let body: Value = res.json().unwrap();
    assert_eq!(body, json!({ "created": "ferris" }));
}

#[tokio::test]
async fn test_body_stream_error_propagates() {
    let (dispatcher, _) = common::dispatcher(common::kaboom());

    let err = dispatcher.fetch(Request::get("http://example.com/")).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().contains("kaboom"));
}

#[tokio::test]
async fn test_no_content_skips_decoding() {
    let router = Router::new().route(
        "/empty",
        get(|| async { (StatusCode::NO_CONTENT, [(CONTENT_ENCODING, "gzip")]) }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let res = dispatcher.fetch(Request::get("http://example.com/empty")).await.unwrap();

    assert_eq!(res.status(), 204);
    assert!(res.body().is_none());
    assert_eq!(res.headers().get("content-encoding").as_deref(), Some("gzip"));
}

#[tokio::test]
async fn test_head_skips_decoding() {
    let router = Router::new().route(
        "/file",
        get(|| async { common::encoded("gzip", common::gzip(b"file contents")) }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let request = Request::builder("http://example.com/file").method("HEAD").build().unwrap();
    let res = dispatcher.fetch(request).await.unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.body().is_none());
    assert_eq!(res.headers().get("content-encoding").as_deref(), Some("gzip"));
}

#[tokio::test]
async fn test_set_cookie_values_stay_separate() {
    let router = Router::new().route(
        "/login",
        get(|| async {
            (
                AppendHeaders([
                    (SET_COOKIE, "session=abc; Path=/"),
                    (SET_COOKIE, "theme=dark; Expires=Wed, 21 Oct 2015 07:28:00 GMT"),
                ]),
                "ok",
            )
        }),
    );
    let (dispatcher, _) = common::dispatcher(router);

    let res = dispatcher.fetch(Request::get("http://example.com/login")).await.unwrap();

    assert_eq!(
        res.headers().get_set_cookie(),
        vec![
            "session=abc; Path=/".to_string(),
            "theme=dark; Expires=Wed, 21 Oct 2015 07:28:00 GMT".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_declined_request_goes_to_network() {
    let network = common::RecordingNetwork::default();
    let dispatcher = inject_fetch::Dispatcher::router(Router::new().route("/", get(|| async { "local" })))
        .matcher(|url: &url::Url, _: &Request| url.host_str() == Some("local.test"))
        .network(network.clone())
        .build()
        .unwrap();

    let local = dispatcher.fetch(Request::get("http://local.test/")).await.unwrap();
    assert_eq!(local.text(), "local");

    let remote = dispatcher.fetch(Request::get("http://remote.test/")).await.unwrap();
    assert_eq!(remote.text(), "from network");
    assert_eq!(network.seen(), vec!["http://remote.test/".to_string()]);
}

#[tokio::test]
async fn test_configured_intercept_rules() {
    let network = common::RecordingNetwork::default();
    let config: inject_fetch::FetchConfig = toml::from_str(
        r#"
        [intercept]
        hosts = ["api.test"]
        path_prefix = "/v1"
        "#,
    )
    .unwrap();
    let dispatcher = inject_fetch::Dispatcher::router(Router::new().route("/v1/ping", get(|| async { "pong" })))
        .config(config)
        .network(network.clone())
        .build()
        .unwrap();

    let res = dispatcher.fetch(Request::get("http://api.test/v1/ping")).await.unwrap();
    assert_eq!(res.text(), "pong");

    dispatcher.fetch(Request::get("http://api.test/v2/ping")).await.unwrap();
    dispatcher.fetch(Request::get("http://other.test/v1/ping")).await.unwrap();
    assert_eq!(network.seen().len(), 2);
}

#[tokio::test]
async fn test_concurrent_fetches_share_dispatcher() {
    let (dispatcher, _) = common::dispatcher(common::redirect_chain());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let url = format!("http://example.com/redirect/{}", i % 4);
                dispatcher.fetch(Request::get(url)).await
            })
        })
        .collect();

    for handle in handles {
        let res = handle.await.unwrap().unwrap();
        assert_eq!(res.text(), "done");
    }
}
