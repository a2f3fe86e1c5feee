use async_trait::async_trait;
use hyper::{Body, Request, Response};
use std::{convert::Infallible, net::SocketAddr};

/// Per-connection data handed to every plugin call.
#[derive(Debug, Clone, Copy)]
pub struct PluginContext {
    pub remote_addr: SocketAddr,
}

/// A unit of routing: owns a slice of the URL space and answers requests in it.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Runs once before the server starts accepting connections.
    async fn plugin_init(&mut self) -> anyhow::Result<()>;

    fn plugin_name(&self) -> &str;

    /// Cheap check used by the manager to pick the plugin for a request.
    fn plugin_can_handle(&self, req: &Request<Body>) -> bool;

    async fn plugin_handle(
        &self,
        req: Request<Body>,
        ctx: &PluginContext,
    ) -> Result<Response<Body>, Infallible>;
}
