pub mod assets;
pub mod config;
pub mod markdown;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;
pub mod template;

pub use routes::AppState;
