// src/models/mod.rs

pub mod progress;
pub mod session;
