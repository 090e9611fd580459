pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod history;
pub mod message;
