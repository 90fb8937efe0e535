pub mod app;
pub mod config;
pub mod debounce;
pub mod models;
pub mod presenter;
pub mod request;
pub mod search;
