pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod registry;
pub mod storage;

pub use error::{FunRunError, Result};
