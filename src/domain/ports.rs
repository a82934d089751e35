use crate::domain::model::{Executor, SaslOptions, SslContext};
use crate::security::callback::CallbackHandler;
use std::io;
use std::sync::Arc;
use url::Url;

/// Produces a security value on demand.
pub trait SecurityFactory<T>: Send + Sync {
    fn create(&self) -> io::Result<T>;
}

impl<T, F> SecurityFactory<T> for F
where
    F: Fn() -> io::Result<T> + Send + Sync,
{
    fn create(&self) -> io::Result<T> {
        self()
    }
}

/// Everything a management client needs to know to open a connection.
///
/// A port of zero or less means no port was configured.
pub trait ClientConfiguration: Send + Sync {
    fn host(&self) -> Option<&str>;
    fn port(&self) -> i32;
    fn protocol(&self) -> Option<&str>;
    /// Connection timeout in milliseconds.
    fn connection_timeout(&self) -> i32;
    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>>;
    fn sasl_options(&self) -> Option<&SaslOptions>;
    /// Direct TLS context; newer clients prefer [`Self::ssl_context_factory`].
    fn ssl_context(&self) -> Option<&SslContext>;
    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>>;
    fn executor(&self) -> Option<&Executor>;
    fn client_bind_address(&self) -> Option<&str>;
    /// Location of an externally managed authentication configuration.
    fn authentication_config_uri(&self) -> Option<&Url>;
    /// Releases whatever the configuration holds.
    fn close(&mut self) -> io::Result<()>;
}

impl<C: ClientConfiguration + ?Sized> ClientConfiguration for Box<C> {
    fn host(&self) -> Option<&str> {
        (**self).host()
    }

    fn port(&self) -> i32 {
        (**self).port()
    }

    fn protocol(&self) -> Option<&str> {
        (**self).protocol()
    }

    fn connection_timeout(&self) -> i32 {
        (**self).connection_timeout()
    }

    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>> {
        (**self).callback_handler()
    }

    fn sasl_options(&self) -> Option<&SaslOptions> {
        (**self).sasl_options()
    }

    fn ssl_context(&self) -> Option<&SslContext> {
        (**self).ssl_context()
    }

    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>> {
        (**self).ssl_context_factory()
    }

    fn executor(&self) -> Option<&Executor> {
        (**self).executor()
    }

    fn client_bind_address(&self) -> Option<&str> {
        (**self).client_bind_address()
    }

    fn authentication_config_uri(&self) -> Option<&Url> {
        (**self).authentication_config_uri()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Read access goes through to the shared value. Closing requires the last
/// handle; while other clones are alive `close` fails and the value is left open.
impl<C: ClientConfiguration + ?Sized> ClientConfiguration for Arc<C> {
    fn host(&self) -> Option<&str> {
        (**self).host()
    }

    fn port(&self) -> i32 {
        (**self).port()
    }

    fn protocol(&self) -> Option<&str> {
        (**self).protocol()
    }

    fn connection_timeout(&self) -> i32 {
        (**self).connection_timeout()
    }

    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>> {
        (**self).callback_handler()
    }

    fn sasl_options(&self) -> Option<&SaslOptions> {
        (**self).sasl_options()
    }

    fn ssl_context(&self) -> Option<&SslContext> {
        (**self).ssl_context()
    }

    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>> {
        (**self).ssl_context_factory()
    }

    fn executor(&self) -> Option<&Executor> {
        (**self).executor()
    }

    fn client_bind_address(&self) -> Option<&str> {
        (**self).client_bind_address()
    }

    fn authentication_config_uri(&self) -> Option<&Url> {
        (**self).authentication_config_uri()
    }

    fn close(&mut self) -> io::Result<()> {
        match Arc::get_mut(self) {
            Some(inner) => inner.close(),
            None => Err(io::Error::other(
                "client configuration is still shared and cannot be closed",
            )),
        }
    }
}
