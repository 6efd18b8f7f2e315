pub mod db;
pub mod identity;
pub mod ids;
pub mod memory;
