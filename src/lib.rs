pub mod columns;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod record;
pub mod sheets;

pub mod server;
