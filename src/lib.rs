pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod state;
