pub mod plan;
pub mod server;
