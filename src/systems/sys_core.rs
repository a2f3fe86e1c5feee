//! Server loop: accept connections, hand each request to the plugin manager.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use hyper::{
    Body, Method, Request, Response, Server, StatusCode,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue,
    },
    server::conn::AddrStream,
    service::{make_service_fn, service_fn},
};

use crate::{structs::struct_plugin::PluginContext, systems::sys_plugin::PluginManager};

const CORS_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const CORS_HEADERS: &str = "Content-Type";

/// Serve `manager` on `addr` until Ctrl-C.
///
/// With `cors` set, every response allows any origin and preflight requests are
/// answered here without reaching a plugin.
pub async fn run_server(
    addr: SocketAddr,
    cors: bool,
    manager: Arc<PluginManager>,
) -> anyhow::Result<()> {
    let make_svc = make_service_fn(move |conn: &AddrStream| {
        let manager = manager.clone();
        let ctx = PluginContext {
            remote_addr: conn.remote_addr(),
        };
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let manager = manager.clone();
                async move { Ok::<_, Infallible>(dispatch(&manager, cors, req, ctx).await) }
            }))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_svc);
    tracing::info!("Server listening on http://{}", server.local_addr());

    server.with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Route one request and decorate the response.
pub async fn dispatch(
    manager: &PluginManager,
    cors: bool,
    req: Request<Body>,
    ctx: PluginContext,
) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut resp = if cors && method == Method::OPTIONS {
        let mut r = Response::new(Body::empty());
        *r.status_mut() = StatusCode::NO_CONTENT;
        r
    } else {
        match manager.find_plugin(&req) {
            Some(plugin) => match plugin.plugin_handle(req, &ctx).await {
                Ok(r) => r,
                Err(never) => match never {},
            },
            None => {
                let mut r = Response::new(Body::from("Not found"));
                *r.status_mut() = StatusCode::NOT_FOUND;
                r
            }
        }
    };

    if cors {
        apply_cors(&mut resp);
    }

    tracing::debug!(
        %method,
        %path,
        status = resp.status().as_u16(),
        peer = %ctx.remote_addr,
        "request"
    );
    resp
}

fn apply_cors(resp: &mut Response<Body>) {
    let headers = resp.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(CORS_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_HEADERS));
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::plugin_filestore::PluginFileStore;
    use crate::test_utils::{body_string, ctx, upload_request};

    async fn manager_for(root: &std::path::Path) -> PluginManager {
        let mut manager = PluginManager::new();
        manager.apply_plugin(Box::new(PluginFileStore::new(root.to_path_buf())));
        manager.init_plugins().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn preflight_is_answered_without_plugin() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_for(dir.path()).await;

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/remove/a.txt")
            .body(Body::empty())
            .unwrap();
        let resp = dispatch(&manager, true, req, ctx()).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_METHODS], CORS_METHODS);
    }

    #[tokio::test]
    async fn every_response_allows_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_for(dir.path()).await;

        let upload = upload_request(&[("file", Some("a.txt"), b"hi")]);
        let resp = dispatch(&manager, true, upload, ctx()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let missing = Request::builder()
            .uri("/download/nope.txt")
            .body(Body::empty())
            .unwrap();
        let resp = dispatch(&manager, true, missing, ctx()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn cors_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_for(dir.path()).await;

        let req = Request::builder().uri("/files").body(Body::empty()).unwrap();
        let resp = dispatch(&manager, false, req, ctx()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn unclaimed_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_for(dir.path()).await;

        let req = Request::builder().uri("/nowhere").body(Body::empty()).unwrap();
        let resp = dispatch(&manager, true, req, ctx()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "Not found");
    }
}
