pub mod config;
pub mod server;
pub mod upstream;
pub mod usage;
