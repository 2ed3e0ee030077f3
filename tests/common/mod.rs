//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::Path;
use axum::http::header::{CONTENT_ENCODING, CONTENT_LENGTH, LOCATION};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::future::BoxFuture;
use inject_fetch::{Dispatcher, FetchResult, Headers, NetworkFetch, Request, Response};

/// Network fallback that never touches a socket and records what it was given.
#[derive(Clone, Default)]
pub struct RecordingNetwork {
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingNetwork {
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl NetworkFetch for RecordingNetwork {
    fn fetch(&self, request: Request) -> BoxFuture<'_, FetchResult<Response>> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(request.url().to_string());
            Ok(Response::new(
                200,
                "OK",
                Headers::new(),
                Some(Bytes::from_static(b"from network")),
            ))
        })
    }
}

/// A dispatcher over `router` whose fallback is a [`RecordingNetwork`].
pub fn dispatcher(router: Router) -> (Dispatcher, RecordingNetwork) {
    let network = RecordingNetwork::default();
    let dispatcher = Dispatcher::router(router)
        .network(network.clone())
        .build()
        .unwrap();
    (dispatcher, network)
}

/// `/redirect/{n}` answers 302 to `/redirect/{n-1}`; `/redirect/0` answers "done".
pub fn redirect_chain() -> Router {
    Router::new().route(
        "/redirect/{n}",
        get(|Path(n): Path<u32>| async move {
            if n == 0 {
                "done".into_response()
            } else {
                (StatusCode::FOUND, [(LOCATION, format!("/redirect/{}", n - 1))]).into_response()
            }
        }),
    )
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Zlib-wrapped deflate, as most servers send it.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Headerless deflate, as some servers send it.
pub fn raw_deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn brotli(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 11, 22);
        writer.write_all(data).unwrap();
    }
    out
}

/// A handler response carrying `payload` with the given content-encoding and
/// a content-length matching the encoded size.
pub fn encoded(coding: &'static str, payload: Vec<u8>) -> impl IntoResponse {
    let len = payload.len().to_string();
    ([(CONTENT_ENCODING, coding.to_string()), (CONTENT_LENGTH, len)], payload)
}

/// A handler whose body stream fails on first poll.
pub fn kaboom() -> Router {
    Router::new().route(
        "/",
        get(|| async {
            Body::from_stream(futures_util::stream::once(async {
                Err::<Bytes, std::io::Error>(std::io::Error::other("kaboom"))
            }))
        }),
    )
}
