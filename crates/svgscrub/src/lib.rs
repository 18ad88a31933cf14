// svgscrub library exports

pub mod app;
pub mod cli;
pub mod config;
pub mod file_manager;

pub use app::{run, Outcome};
pub use cli::Cli;
pub use config::Config;
