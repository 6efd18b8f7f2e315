pub mod insights;
pub mod integrations;
pub mod pulse;
pub mod server;
pub mod teams;
pub mod vault;

pub use server::server_health;
