pub mod commands;
pub mod render;
pub mod shell;

pub use commands::run_command;
