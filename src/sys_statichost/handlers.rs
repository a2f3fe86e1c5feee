//! HTTP glue: serve whatever `core::map_static_path` gives us.

use std::path::Path;

use hyper::{
    Body, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::sys_fileapi::handlers::respond_text;
use crate::sys_statichost::core;

/// Try to serve `uri` from `root`.
/// Returns `None` if there is no such file, so the caller can fall back.
pub async fn handler_static(root: &Path, uri: &str) -> Option<Response<Body>> {
    if core::is_traversal(uri) {
        return Some(respond_text(StatusCode::FORBIDDEN, "Forbidden"));
    }

    let path = core::map_static_path(root, uri)?;
    match File::open(&path).await {
        Ok(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let mut resp = Response::new(Body::wrap_stream(ReaderStream::new(file)));
            if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
                resp.headers_mut().insert(CONTENT_TYPE, value);
            }
            Some(resp)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "static open failed: {e}");
            Some(respond_text(StatusCode::NOT_FOUND, "Not found"))
        }
    }
}
