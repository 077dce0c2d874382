pub mod api;
pub mod app;
pub mod broadcast;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod global;
pub mod relay;
pub mod store;
pub mod summarize;
