pub mod auth;
pub mod axum_http;
pub mod background_worker;
pub mod config;
pub mod usecases;
