pub mod ml_service;
pub mod models;
