pub mod config;
pub mod domain;
pub mod error;
pub mod health;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod ws;

pub use error::AppError;
