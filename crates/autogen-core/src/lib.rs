pub mod actions;
pub mod certs;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod io;
pub mod manifest;
pub mod package;
pub mod paths;
pub mod registry;
pub mod runner;
pub mod version;

pub use error::{AutogenError, Result};
