pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;
