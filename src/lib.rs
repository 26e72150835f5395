pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;
