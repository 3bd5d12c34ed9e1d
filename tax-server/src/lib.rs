pub mod api;
pub mod config;
pub mod logging;
pub mod server;

pub use api::{AppState, router};
pub use config::ServerConfig;
