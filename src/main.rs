use std::sync::Arc;

use clap::Parser;

use crate::systems::{
    sys_config::Config, sys_core::run_server, sys_logging::init_logging, sys_plugin::PluginManager,
};

pub mod plugins;
pub mod structs;
pub mod sys_fileapi;
pub mod sys_statichost;
pub mod systems;

#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config.log_filter);

    let mut manager = PluginManager::new();

    // Store routes first; the client claims every other GET.
    manager.apply_plugin(Box::new(plugins::plugin_filestore::PluginFileStore::new(
        config.upload_dir.clone(),
    )));
    manager.apply_plugin(Box::new(plugins::plugin_client::PluginClient::new(
        config.static_dir.clone(),
    )));
    manager.init_plugins().await?;
    let manager = Arc::new(manager);

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        static_dir = %config.static_dir.display(),
        cors = config.cors,
        plugins = manager.plugin_count(),
        "starting StoreSafe"
    );
    run_server(config.bind_addr(), config.cors, manager).await
}
