//! Shared helpers for the unit tests.

use std::net::SocketAddr;

use bytes::{BufMut, Bytes, BytesMut};
use hyper::{Body, Method, Request, Response, header::CONTENT_TYPE};

use crate::structs::struct_plugin::PluginContext;

pub const BOUNDARY: &str = "storesafe-test-boundary";

/// One multipart part: field name, optional filename, content.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Bytes {
    let mut buf = BytesMut::new();
    for (field, filename, data) in parts {
        buf.put_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                buf.put_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; \
                         filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                buf.put_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        buf.put_slice(data);
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    buf.freeze()
}

pub fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    raw_upload_request(multipart_body(parts))
}

/// Upload request carrying `body` as-is, for bodies that are not well formed.
pub fn raw_upload_request(body: Bytes) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub fn ctx() -> PluginContext {
    PluginContext {
        remote_addr: SocketAddr::from(([127, 0, 0, 1], 40000)),
    }
}

pub async fn body_bytes(resp: Response<Body>) -> Bytes {
    hyper::body::to_bytes(resp.into_body()).await.unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    String::from_utf8(body_bytes(resp).await.to_vec()).unwrap()
}
