//! HTTP glue: turn core results into hyper::Response<Body>.

use hyper::{
    Body, Request, Response, StatusCode,
    header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HeaderValue},
};
use multer::Multipart;
use tokio_util::io::ReaderStream;

use crate::sys_fileapi::{
    core::{FileListResponse, FileStore, StoredFile},
    error::StoreError,
    filename::FileName,
};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub async fn handler_upload(store: &FileStore, req: Request<Body>) -> Response<Body> {
    // A missing or non-multipart content type means there is no file part at all.
    let boundary = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok());
    let Some(boundary) = boundary else {
        return respond_error(&StoreError::NoFileProvided, "upload", "");
    };

    let multipart = Multipart::new(req.into_body(), boundary);
    match store.store_multipart(multipart).await {
        Ok(_) => respond_text(StatusCode::OK, "Files uploaded successfully."),
        Err(e) => respond_error(&e, "upload", "Failed to upload file."),
    }
}

pub async fn handler_list(store: &FileStore) -> Response<Body> {
    let files = match store.list().await {
        Ok(files) => files,
        Err(e) => return respond_error(&e, "list", "Failed to retrieve file list."),
    };

    match serde_json::to_vec(&FileListResponse { files }) {
        Ok(body) => {
            let mut resp = Response::new(Body::from(body));
            resp.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            resp
        }
        Err(e) => {
            tracing::error!("json error: {e}");
            respond_text(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve file list.")
        }
    }
}

/// `segment` is the raw (still percent-encoded) last path segment.
pub async fn handler_download(store: &FileStore, segment: &str) -> Response<Body> {
    let opened = match FileName::from_path_segment(segment) {
        Ok(name) => store.open(&name).await,
        Err(e) => Err(e),
    };
    match opened {
        Ok(stored) => download_response(stored),
        Err(e) => respond_error(&e, "download", "Failed to read file."),
    }
}

/// `segment` is the raw (still percent-encoded) last path segment.
pub async fn handler_remove(store: &FileStore, segment: &str) -> Response<Body> {
    let removed = match FileName::from_path_segment(segment) {
        Ok(name) => store.remove(&name).await,
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => respond_text(StatusCode::OK, "File removed successfully."),
        Err(e) => respond_error(&e, "remove", "Failed to remove file."),
    }
}

fn download_response(stored: StoredFile) -> Response<Body> {
    let mime = mime_guess::from_path(stored.name.as_str()).first_or_octet_stream();
    let disposition = content_disposition(&stored.name);

    let mut resp = Response::new(Body::wrap_stream(ReaderStream::new(stored.file)));
    let headers = resp.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }
    headers.insert(CONTENT_LENGTH, HeaderValue::from(stored.len));
    headers.insert(CONTENT_DISPOSITION, disposition);
    resp
}

/// `attachment` with an ASCII fallback name plus the exact UTF-8 name.
fn content_disposition(name: &FileName) -> HeaderValue {
    let ascii: String = name
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(name.as_str())
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn respond_error(err: &StoreError, op: &str, io_failure: &str) -> Response<Body> {
    match err {
        StoreError::Io(_) => tracing::error!(op, "{err}"),
        _ => tracing::warn!(op, "{err}"),
    }
    respond_text(err.status_code(), err.user_message(io_failure))
}

pub fn respond_text(code: StatusCode, msg: &str) -> Response<Body> {
    let mut r = Response::new(Body::from(msg.to_string()));
    *r.status_mut() = code;
    r.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    r
}
