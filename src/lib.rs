pub mod client;
pub mod config;
pub mod domain;
pub mod security;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ToolsCli;

pub use client::ToolsClientConfiguration;
pub use config::{BasicClientConfiguration, ClientConfigurationBuilder};
pub use domain::model::{Executor, SaslOptions, SslContext};
pub use domain::ports::{ClientConfiguration, SecurityFactory};
pub use security::callback::{Callback, CallbackHandler, ClientCallbackHandler};
pub use utils::error::{Result, ToolsError};
