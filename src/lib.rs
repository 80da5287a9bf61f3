pub mod common;
pub mod config;
pub mod desec;
pub mod jsonfile;
pub mod resources;
pub mod service;
pub mod session;

pub use config::*;
pub use session::Session;
