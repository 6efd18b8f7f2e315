mod data;
mod ports;
mod services;

pub use data::*;
pub use ports::*;
pub use services::*;
