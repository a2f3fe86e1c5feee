pub mod core;
pub mod error;
pub mod filename;
pub mod handlers;
