pub mod plugin_client;
pub mod plugin_filestore;
