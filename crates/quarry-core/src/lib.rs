//! quarry-core: Configuration, errors, logging, and the search wire protocol.

pub mod build_info;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod paths;
pub mod protocol;

pub use config::Config;
pub use error::{Error, Result};
