use crate::domain::model::{Executor, SaslOptions, SslContext};
use crate::domain::ports::{ClientConfiguration, SecurityFactory};
use crate::security::callback::{CallbackHandler, ClientCallbackHandler};
use std::fmt;
use std::io;
use std::sync::Arc;
use url::Url;

/// Connection configuration for a management client or a CLI session.
///
/// Wraps another configuration and forwards every property to it except the
/// callback handler. When the wrapped configuration points at no external
/// authentication configuration, the username and password given here answer
/// the authentication challenges instead.
pub struct ToolsClientConfiguration<C: ClientConfiguration> {
    delegate: C,
    username: Option<String>,
    password: Option<String>,
    callback_handler: Option<Arc<dyn CallbackHandler>>,
}

impl<C: ClientConfiguration> ToolsClientConfiguration<C> {
    pub fn new(delegate: C, username: Option<String>, password: Option<String>) -> Self {
        let callback_handler: Option<Arc<dyn CallbackHandler>> =
            match delegate.authentication_config_uri() {
                None => {
                    tracing::debug!(
                        has_username = username.is_some(),
                        has_password = password.is_some(),
                        "Using inline credentials for authentication"
                    );
                    let handler: Arc<dyn CallbackHandler> = Arc::new(ClientCallbackHandler::new(
                        username.clone(),
                        password.clone(),
                    ));
                    Some(handler)
                }
                Some(uri) => {
                    tracing::debug!(%uri, "Using authentication configuration from delegate");
                    if username.is_some() || password.is_some() {
                        tracing::warn!(
                            %uri,
                            "Credentials supplied alongside an authentication configuration are not used to authenticate"
                        );
                    }
                    delegate.callback_handler()
                }
            };

        Self {
            delegate,
            username,
            password,
            callback_handler,
        }
    }

    /// The username provided, or `None` if one was not provided.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The password provided, or `None` if one was not provided.
    ///
    /// Every call returns a new buffer the caller is free to clear.
    pub fn password(&self) -> Option<Vec<char>> {
        self.password.as_ref().map(|p| p.chars().collect())
    }

    /// Formats the controller address a CLI session connects to, e.g.
    /// `remote+http://localhost:9990`.
    pub fn controller(&self) -> String {
        let mut controller = String::new();
        if let Some(protocol) = self.protocol() {
            controller.push_str(protocol);
            controller.push_str("://");
        }
        controller.push_str(self.host().unwrap_or("localhost"));
        let port = self.port();
        if port > 0 {
            controller.push(':');
            controller.push_str(&port.to_string());
        }
        controller
    }

    pub fn delegate(&self) -> &C {
        &self.delegate
    }

    pub fn into_inner(self) -> C {
        self.delegate
    }
}

impl<C: ClientConfiguration> ClientConfiguration for ToolsClientConfiguration<C> {
    fn host(&self) -> Option<&str> {
        self.delegate.host()
    }

    fn port(&self) -> i32 {
        self.delegate.port()
    }

    fn protocol(&self) -> Option<&str> {
        self.delegate.protocol()
    }

    fn connection_timeout(&self) -> i32 {
        self.delegate.connection_timeout()
    }

    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>> {
        self.callback_handler.clone()
    }

    fn sasl_options(&self) -> Option<&SaslOptions> {
        self.delegate.sasl_options()
    }

    fn ssl_context(&self) -> Option<&SslContext> {
        self.delegate.ssl_context()
    }

    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>> {
        self.delegate.ssl_context_factory()
    }

    fn executor(&self) -> Option<&Executor> {
        self.delegate.executor()
    }

    fn client_bind_address(&self) -> Option<&str> {
        self.delegate.client_bind_address()
    }

    fn authentication_config_uri(&self) -> Option<&Url> {
        self.delegate.authentication_config_uri()
    }

    fn close(&mut self) -> io::Result<()> {
        self.delegate.close()
    }
}

impl<C: ClientConfiguration> fmt::Debug for ToolsClientConfiguration<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolsClientConfiguration")
            .field("controller", &self.controller())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("callback_handler", &self.callback_handler)
            .finish()
    }
}
