pub mod sys_config;
pub mod sys_core;
pub mod sys_logging;
pub mod sys_plugin;
