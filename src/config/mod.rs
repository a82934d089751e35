#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{Executor, SaslOptions, SslContext};
use crate::domain::ports::{ClientConfiguration, SecurityFactory};
use crate::security::callback::CallbackHandler;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::io;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_PROTOCOL: &str = "remote+http";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: i32 = 9990;
pub const DEFAULT_CONNECTION_TIMEOUT_MS: i32 = 5000;

/// Assembles a [`BasicClientConfiguration`].
///
/// Starts from the management interface defaults (`remote+http://localhost:9990`,
/// 5 second timeout). Passing `None` to an optional setter clears the value.
#[derive(Clone)]
pub struct ClientConfigurationBuilder {
    protocol: Option<String>,
    host: Option<String>,
    port: i32,
    connection_timeout: i32,
    callback_handler: Option<Arc<dyn CallbackHandler>>,
    sasl_options: Option<SaslOptions>,
    ssl_context: Option<SslContext>,
    ssl_context_factory: Option<Arc<dyn SecurityFactory<SslContext>>>,
    executor: Option<Executor>,
    client_bind_address: Option<String>,
    authentication_config_uri: Option<Url>,
}

impl Default for ClientConfigurationBuilder {
    fn default() -> Self {
        Self {
            protocol: Some(DEFAULT_PROTOCOL.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: DEFAULT_PORT,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT_MS,
            callback_handler: None,
            sasl_options: None,
            ssl_context: None,
            ssl_context_factory: None,
            executor: None,
            client_bind_address: None,
            authentication_config_uri: None,
        }
    }
}

impl ClientConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: Option<String>) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn connection_timeout(mut self, timeout_ms: i32) -> Self {
        self.connection_timeout = timeout_ms;
        self
    }

    pub fn callback_handler(mut self, handler: Option<Arc<dyn CallbackHandler>>) -> Self {
        self.callback_handler = handler;
        self
    }

    pub fn sasl_options(mut self, options: Option<SaslOptions>) -> Self {
        self.sasl_options = options;
        self
    }

    pub fn sasl_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.sasl_options
            .get_or_insert_with(SaslOptions::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn ssl_context(mut self, context: Option<SslContext>) -> Self {
        self.ssl_context = context;
        self
    }

    pub fn ssl_context_factory(
        mut self,
        factory: Option<Arc<dyn SecurityFactory<SslContext>>>,
    ) -> Self {
        self.ssl_context_factory = factory;
        self
    }

    pub fn executor(mut self, executor: Option<Executor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn client_bind_address(mut self, address: Option<String>) -> Self {
        self.client_bind_address = address;
        self
    }

    pub fn authentication_config_uri(mut self, uri: Option<Url>) -> Self {
        self.authentication_config_uri = uri;
        self
    }

    /// 解析並設定外部驗證設定檔位置
    pub fn authentication_config(self, uri: &str) -> Result<Self> {
        let uri = validation::validate_uri("authentication_config", uri)?;
        Ok(self.authentication_config_uri(Some(uri)))
    }

    pub fn build(self) -> Result<BasicClientConfiguration> {
        self.validate()?;

        tracing::debug!(
            protocol = ?self.protocol,
            host = ?self.host,
            port = self.port,
            "Built client configuration"
        );

        Ok(BasicClientConfiguration {
            protocol: self.protocol,
            host: self.host,
            port: self.port,
            connection_timeout: self.connection_timeout,
            callback_handler: self.callback_handler,
            sasl_options: self.sasl_options,
            ssl_context: self.ssl_context,
            ssl_context_factory: self.ssl_context_factory,
            executor: self.executor,
            client_bind_address: self.client_bind_address,
            authentication_config_uri: self.authentication_config_uri,
            closed: false,
        })
    }
}

impl Validate for ClientConfigurationBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(host) = &self.host {
            validation::validate_non_empty_string("host", host)?;
        }
        if let Some(protocol) = &self.protocol {
            validation::validate_protocol("protocol", protocol)?;
        }
        if let Some(address) = &self.client_bind_address {
            validation::validate_non_empty_string("client_bind_address", address)?;
        }
        // 0 表示未指定連接埠
        validation::validate_range("port", self.port, 0, 65535)?;
        validation::validate_range("connection_timeout", self.connection_timeout, 0, i32::MAX)?;
        Ok(())
    }
}

/// A plain, self-contained client configuration.
pub struct BasicClientConfiguration {
    protocol: Option<String>,
    host: Option<String>,
    port: i32,
    connection_timeout: i32,
    callback_handler: Option<Arc<dyn CallbackHandler>>,
    sasl_options: Option<SaslOptions>,
    ssl_context: Option<SslContext>,
    ssl_context_factory: Option<Arc<dyn SecurityFactory<SslContext>>>,
    executor: Option<Executor>,
    client_bind_address: Option<String>,
    authentication_config_uri: Option<Url>,
    closed: bool,
}

impl BasicClientConfiguration {
    pub fn builder() -> ClientConfigurationBuilder {
        ClientConfigurationBuilder::new()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ClientConfiguration for BasicClientConfiguration {
    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn port(&self) -> i32 {
        self.port
    }

    fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    fn connection_timeout(&self) -> i32 {
        self.connection_timeout
    }

    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>> {
        self.callback_handler.clone()
    }

    fn sasl_options(&self) -> Option<&SaslOptions> {
        self.sasl_options.as_ref()
    }

    fn ssl_context(&self) -> Option<&SslContext> {
        self.ssl_context.as_ref()
    }

    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>> {
        self.ssl_context_factory.clone()
    }

    fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    fn client_bind_address(&self) -> Option<&str> {
        self.client_bind_address.as_deref()
    }

    fn authentication_config_uri(&self) -> Option<&Url> {
        self.authentication_config_uri.as_ref()
    }

    /// Drops the executor handle and TLS values. Closing twice is a no-op.
    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.executor = None;
        self.ssl_context = None;
        self.ssl_context_factory = None;
        self.closed = true;
        tracing::debug!("Client configuration closed");
        Ok(())
    }
}

impl fmt::Debug for BasicClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicClientConfiguration")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connection_timeout", &self.connection_timeout)
            .field("sasl_options", &self.sasl_options)
            .field("ssl_context", &self.ssl_context)
            .field("client_bind_address", &self.client_bind_address)
            .field(
                "authentication_config_uri",
                &self.authentication_config_uri.as_ref().map(Url::as_str),
            )
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
