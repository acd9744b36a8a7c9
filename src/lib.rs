pub mod builder;
pub mod canvas;
pub mod client;
pub mod config;
pub mod constants;
pub mod draft;
pub mod error;
pub mod logging;
pub mod notify;
pub mod properties;
pub mod strategy;
pub mod ui;
