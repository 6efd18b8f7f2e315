pub mod health;
pub mod insights;
pub mod integrations;
pub mod pulse;
pub mod shared;
pub mod teams;
pub mod vault;
