pub mod auth_cmd;
pub mod browse;
pub mod common;
pub mod completions;
pub mod config;
pub mod list;
pub mod search;
pub mod version;
