pub mod api;
mod cache;
mod client;
mod config;
pub mod models;

pub use cache::RRSetCache;
pub use client::{DesecClient, DEFAULT_API_URL};
pub use config::Config;
