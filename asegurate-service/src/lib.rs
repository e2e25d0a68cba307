pub mod config;
pub mod service;

pub use config::{LogFormat, ServiceConfig};
pub use service::{AppState, build_router};
