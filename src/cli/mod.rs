pub mod app;
pub mod commands;
pub mod context;

pub use app::{Cli, Commands, LogLevel};
pub use context::AppContext;
