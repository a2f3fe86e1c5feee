use async_trait::async_trait;
use hyper::{
    Body, Method, Request, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use std::{convert::Infallible, path::PathBuf};

use crate::structs::struct_plugin::{Plugin, PluginContext};
use crate::sys_fileapi::handlers::respond_text;
use crate::sys_statichost::handlers::handler_static;

/// Client page compiled into the binary, used when the static root has no index.
const EMBEDDED_INDEX: &str = include_str!("../../../static/index.html");

// ---------------------- Plugin ----------------------

/// Serves the browser client and anything else under the static root.
pub struct PluginClient {
    static_root: PathBuf,
}

impl PluginClient {
    pub fn new(static_root: PathBuf) -> Self {
        Self { static_root }
    }
}

#[async_trait]
impl Plugin for PluginClient {
    async fn plugin_init(&mut self) -> anyhow::Result<()> {
        if !self.static_root.join("index.html").is_file() {
            tracing::info!(
                static_root = %self.static_root.display(),
                "no index.html on disk, serving built-in client"
            );
        }
        Ok(())
    }

    fn plugin_name(&self) -> &str {
        "PluginClient"
    }

    fn plugin_can_handle(&self, req: &Request<Body>) -> bool {
        req.method() == Method::GET
    }

    async fn plugin_handle(
        &self,
        req: Request<Body>,
        _ctx: &PluginContext,
    ) -> Result<Response<Body>, Infallible> {
        let path = req.uri().path().to_string();

        if let Some(resp) = handler_static(&self.static_root, &path).await {
            return Ok(resp);
        }

        if path == "/" || path == "/index.html" {
            let mut resp = Response::new(Body::from(EMBEDDED_INDEX));
            resp.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
            return Ok(resp);
        }

        Ok(respond_text(StatusCode::NOT_FOUND, "Not found"))
    }
}
