// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod lesson;
pub mod models;
pub mod recorder;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod store;
pub mod utils;

pub use routes::create_router;
