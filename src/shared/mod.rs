// Shared module
pub mod clients;
pub mod config;
pub mod errors;
pub mod services;
pub mod utils;
