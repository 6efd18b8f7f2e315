mod analyzers;
mod data;
mod ports;
mod services;

pub use analyzers::*;
pub use data::*;
pub use ports::*;
pub use services::*;
