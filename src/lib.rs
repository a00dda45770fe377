pub mod app;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod models;
pub mod server;

pub use app::App;
pub use error::ApiError;
