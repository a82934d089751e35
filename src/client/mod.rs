pub mod tools_configuration;

pub use tools_configuration::ToolsClientConfiguration;
