pub mod connection;
pub mod error;
mod insights;
mod integrations;
pub mod models;
mod pulse;
pub mod repository;
mod teams;
mod vault;
