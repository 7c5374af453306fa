//! Configuration management
//!
//! This module handles loading and managing configuration settings
//! for both the HTTP server and the command line tools.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{
    ApiSettings, LoggingSettings, LookupSettings, ServerSettings, Settings, StoreSettings,
};
