//! Plugin registry: ordered list, first match wins.

use hyper::{Body, Request};

use crate::structs::struct_plugin::Plugin;

pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    /// Register a plugin. Earlier registrations take precedence.
    pub fn apply_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Initialise every plugin in registration order, stopping at the first failure.
    pub async fn init_plugins(&mut self) -> anyhow::Result<()> {
        for plugin in self.plugins.iter_mut() {
            plugin.plugin_init().await?;
            tracing::info!(plugin = plugin.plugin_name(), "plugin initialized");
        }
        Ok(())
    }

    pub fn find_plugin(&self, req: &Request<Body>) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.plugin_can_handle(req))
            .map(|p| &**p)
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }
}
