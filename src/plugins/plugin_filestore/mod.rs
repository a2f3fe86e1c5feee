use async_trait::async_trait;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::{convert::Infallible, path::PathBuf};

use crate::structs::struct_plugin::{Plugin, PluginContext};
use crate::sys_fileapi::{core::FileStore, handlers};

// ---------------------- Routes ----------------------

/// The four store endpoints, resolved from a request path.
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Upload,
    List,
    Download(&'a str),
    Remove(&'a str),
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        match path {
            "/upload" => Some(Route::Upload),
            "/files" => Some(Route::List),
            _ => {
                if let Some(seg) = single_segment(path, "/download/") {
                    Some(Route::Download(seg))
                } else {
                    single_segment(path, "/remove/").map(Route::Remove)
                }
            }
        }
    }

    fn method(&self) -> Method {
        match self {
            Route::Upload => Method::POST,
            Route::List | Route::Download(_) => Method::GET,
            Route::Remove(_) => Method::DELETE,
        }
    }
}

fn single_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
        .filter(|seg| !seg.is_empty() && !seg.contains('/'))
}

// ---------------------- Plugin ----------------------

pub struct PluginFileStore {
    store: FileStore,
}

impl PluginFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            store: FileStore::new(root),
        }
    }
}

#[async_trait]
impl Plugin for PluginFileStore {
    async fn plugin_init(&mut self) -> anyhow::Result<()> {
        self.store.ensure_root().await?;
        tracing::info!(root = %self.store.root().display(), "file store ready");
        Ok(())
    }

    fn plugin_name(&self) -> &str {
        "PluginFileStore"
    }

    fn plugin_can_handle(&self, req: &Request<Body>) -> bool {
        Route::parse(req.uri().path()).is_some()
    }

    async fn plugin_handle(
        &self,
        req: Request<Body>,
        ctx: &PluginContext,
    ) -> Result<Response<Body>, Infallible> {
        let path = req.uri().path().to_string();
        let Some(route) = Route::parse(&path) else {
            return Ok(handlers::respond_text(StatusCode::NOT_FOUND, "Not found"));
        };

        if req.method() != route.method() {
            return Ok(handlers::respond_text(
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed",
            ));
        }

        let resp = match route {
            Route::Upload => {
                tracing::debug!(peer = %ctx.remote_addr, "upload started");
                handlers::handler_upload(&self.store, req).await
            }
            Route::List => handlers::handler_list(&self.store).await,
            Route::Download(seg) => handlers::handler_download(&self.store, seg).await,
            Route::Remove(seg) => handlers::handler_remove(&self.store, seg).await,
        };
        Ok(resp)
    }
}
