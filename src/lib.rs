pub mod api;
pub mod config;
pub mod data;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use data::{builtin_roster, load_roster};
pub use service::{MatcherService, RequestStore};
