pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{LocalStorage, OmdbClient};
pub use crate::config::{AppConfig, CliConfig, Command};
pub use crate::core::session::{NominationSession, RestoreSource};
pub use crate::utils::error::{Result, ShoppiesError};
