use mgmt_client_tools::security::callback::{NameCallback, PasswordCallback};
use mgmt_client_tools::{
    BasicClientConfiguration, Callback, CallbackHandler, ClientCallbackHandler,
    ClientConfiguration, ClientConfigurationBuilder, Executor, SaslOptions, SecurityFactory,
    SslContext, ToolsClientConfiguration,
};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Delegate whose close outcome and call count can be observed.
struct RecordingConfiguration {
    inner: BasicClientConfiguration,
    fail_close: bool,
    close_calls: Arc<AtomicUsize>,
}

impl ClientConfiguration for RecordingConfiguration {
    fn host(&self) -> Option<&str> {
        self.inner.host()
    }

    fn port(&self) -> i32 {
        self.inner.port()
    }

    fn protocol(&self) -> Option<&str> {
        self.inner.protocol()
    }

    fn connection_timeout(&self) -> i32 {
        self.inner.connection_timeout()
    }

    fn callback_handler(&self) -> Option<Arc<dyn CallbackHandler>> {
        self.inner.callback_handler()
    }

    fn sasl_options(&self) -> Option<&SaslOptions> {
        self.inner.sasl_options()
    }

    fn ssl_context(&self) -> Option<&SslContext> {
        self.inner.ssl_context()
    }

    fn ssl_context_factory(&self) -> Option<Arc<dyn SecurityFactory<SslContext>>> {
        self.inner.ssl_context_factory()
    }

    fn executor(&self) -> Option<&Executor> {
        self.inner.executor()
    }

    fn client_bind_address(&self) -> Option<&str> {
        self.inner.client_bind_address()
    }

    fn authentication_config_uri(&self) -> Option<&Url> {
        self.inner.authentication_config_uri()
    }

    fn close(&mut self) -> io::Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "executor shutdown failed"));
        }
        self.inner.close()
    }
}

fn recording(fail_close: bool) -> (RecordingConfiguration, Arc<AtomicUsize>) {
    let close_calls = Arc::new(AtomicUsize::new(0));
    let delegate = RecordingConfiguration {
        inner: ClientConfigurationBuilder::new().build().unwrap(),
        fail_close,
        close_calls: close_calls.clone(),
    };
    (delegate, close_calls)
}

fn answer(handler: &dyn CallbackHandler) -> (Option<String>, Option<Vec<char>>) {
    let mut callbacks = vec![
        Callback::Name(NameCallback::default()),
        Callback::Password(PasswordCallback::default()),
    ];
    handler.handle(&mut callbacks).unwrap();
    let name = match &callbacks[0] {
        Callback::Name(cb) => cb.name.clone(),
        _ => None,
    };
    let password = match &callbacks[1] {
        Callback::Password(cb) => cb.password.clone(),
        _ => None,
    };
    (name, password)
}

#[test]
fn test_inline_credentials_replace_delegate_handler() {
    let delegate_handler: Arc<dyn CallbackHandler> = Arc::new(ClientCallbackHandler::new(
        Some("delegate-user".into()),
        Some("delegate-pw".into()),
    ));
    let delegate = ClientConfigurationBuilder::new()
        .callback_handler(Some(delegate_handler.clone()))
        .build()
        .unwrap();

    let config =
        ToolsClientConfiguration::new(delegate, Some("admin".into()), Some("admin.1234".into()));
    let handler = config.callback_handler().unwrap();

    assert!(!Arc::ptr_eq(&handler, &delegate_handler));
    let (name, password) = answer(handler.as_ref());
    assert_eq!(name.as_deref(), Some("admin"));
    assert_eq!(password, Some("admin.1234".chars().collect()));
}

#[test]
fn test_authentication_config_keeps_delegate_handler() {
    let delegate_handler: Arc<dyn CallbackHandler> =
        Arc::new(ClientCallbackHandler::new(Some("delegate-user".into()), None));
    let delegate = ClientConfigurationBuilder::new()
        .callback_handler(Some(delegate_handler.clone()))
        .authentication_config("file:///opt/server/bin/wildfly-config.xml")
        .unwrap()
        .build()
        .unwrap();

    let config =
        ToolsClientConfiguration::new(delegate, Some("admin".into()), Some("admin.1234".into()));

    let handler = config.callback_handler().unwrap();
    assert!(Arc::ptr_eq(&handler, &delegate_handler));

    // 憑證仍可取得
    assert_eq!(config.username(), Some("admin"));
    assert_eq!(config.password(), Some("admin.1234".chars().collect()));
}

#[test]
fn test_authentication_config_without_delegate_handler() {
    let delegate = ClientConfigurationBuilder::new()
        .authentication_config("file:///opt/server/bin/wildfly-config.xml")
        .unwrap()
        .build()
        .unwrap();
    let config = ToolsClientConfiguration::new(delegate, Some("admin".into()), None);
    assert!(config.callback_handler().is_none());
}

#[test]
fn test_username_and_password_passthrough() {
    let cases: Vec<(Option<&str>, Option<&str>)> = vec![
        (Some("admin"), Some("pw")),
        (Some(""), Some("")),
        (None, Some("pw")),
        (Some("admin"), None),
        (None, None),
    ];

    for (username, password) in cases {
        let delegate = ClientConfigurationBuilder::new().build().unwrap();
        let config = ToolsClientConfiguration::new(
            delegate,
            username.map(str::to_string),
            password.map(str::to_string),
        );
        assert_eq!(config.username(), username);
        assert_eq!(config.password().is_none(), password.is_none());
        assert_eq!(
            config.password(),
            password.map(|p| p.chars().collect::<Vec<char>>())
        );
    }
}

#[test]
fn test_password_buffers_are_independent() {
    let delegate = ClientConfigurationBuilder::new().build().unwrap();
    let config = ToolsClientConfiguration::new(delegate, None, Some("s3cret".into()));

    let mut first = config.password().unwrap();
    let mut second = config.password().unwrap();
    assert_eq!(first, second);

    first.clear();
    second[0] = 'X';
    assert_eq!(config.password().unwrap(), "s3cret".chars().collect::<Vec<char>>());
}

#[test]
fn test_controller_strings() {
    let cases = [
        (Some("remote+http"), Some("localhost"), 9990, "remote+http://localhost:9990"),
        (None, None, 0, "localhost"),
        (None, Some("10.0.0.5"), 9990, "10.0.0.5:9990"),
        (Some("https"), None, 0, "https://localhost"),
    ];

    for (protocol, host, port, expected) in cases {
        let delegate = ClientConfigurationBuilder::new()
            .protocol(protocol.map(str::to_string))
            .host(host.map(str::to_string))
            .port(port)
            .build()
            .unwrap();
        let config = ToolsClientConfiguration::new(delegate, None, None);
        assert_eq!(config.controller(), expected);
    }
}

#[test]
fn test_accessors_forward_to_delegate() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("delegate-executor")
        .build()
        .unwrap();
    let other_runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let factory_calls = Arc::new(AtomicUsize::new(0));
    let calls = factory_calls.clone();
    let factory: Arc<dyn SecurityFactory<SslContext>> = Arc::new(move || -> io::Result<SslContext> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(SslContext::default())
    });

    let delegate = Arc::new(
        ClientConfigurationBuilder::new()
            .protocol(Some("remote+https".into()))
            .host(Some("mgmt.example.com".into()))
            .port(9993)
            .connection_timeout(30_000)
            .sasl_option("SASL_DISALLOWED_MECHANISMS", "JBOSS-LOCAL-USER")
            .ssl_context(Some(SslContext {
                protocol: "TLSv1.2".into(),
                ..Default::default()
            }))
            .ssl_context_factory(Some(factory.clone()))
            .executor(Some(runtime.handle().clone()))
            .client_bind_address(Some("192.168.1.10".into()))
            .authentication_config("file:///etc/wildfly-config.xml")
            .unwrap()
            .build()
            .unwrap(),
    );

    let config = ToolsClientConfiguration::new(delegate.clone(), None, None);

    assert_eq!(config.host(), delegate.host());
    assert_eq!(config.port(), delegate.port());
    assert_eq!(config.protocol(), delegate.protocol());
    assert_eq!(config.connection_timeout(), delegate.connection_timeout());
    assert_eq!(config.sasl_options(), delegate.sasl_options());
    assert_eq!(config.ssl_context(), delegate.ssl_context());
    assert_eq!(config.client_bind_address(), delegate.client_bind_address());
    assert_eq!(
        config.authentication_config_uri(),
        delegate.authentication_config_uri()
    );

    // 透過轉發的 handle 執行的工作必須跑在委派對象的 runtime 上
    let executor = config.executor().unwrap();
    assert_eq!(
        executor.runtime_flavor(),
        tokio::runtime::RuntimeFlavor::MultiThread
    );
    assert_ne!(executor.runtime_flavor(), other_runtime.handle().runtime_flavor());
    let worker = executor
        .block_on(executor.spawn(async { std::thread::current().name().map(str::to_string) }))
        .unwrap();
    assert_eq!(worker.as_deref(), Some("delegate-executor"));

    let forwarded = config.ssl_context_factory().unwrap();
    assert!(Arc::ptr_eq(&forwarded, &factory));
    assert_eq!(forwarded.create().unwrap().protocol, "TLSv1.3");
    assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_close_forwards_success() {
    let (delegate, close_calls) = recording(false);
    let mut config = ToolsClientConfiguration::new(delegate, None, None);

    assert!(config.close().is_ok());
    assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    assert!(config.into_inner().inner.is_closed());
}

#[test]
fn test_close_returns_delegate_error_unchanged() {
    let (delegate, close_calls) = recording(true);
    let mut config = ToolsClientConfiguration::new(delegate, Some("admin".into()), None);

    let err = config.close().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(err.to_string(), "executor shutdown failed");
    assert_eq!(close_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_close_on_shared_delegate_is_reported() {
    let (delegate, close_calls) = recording(false);
    let shared = Arc::new(delegate);
    let other_handle = shared.clone();
    let mut config = ToolsClientConfiguration::new(shared, None, None);

    assert!(config.close().is_err());
    assert_eq!(close_calls.load(Ordering::SeqCst), 0);

    drop(other_handle);
    assert!(config.close().is_ok());
    assert_eq!(close_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_close_on_sole_shared_delegate_forwards_error() {
    let (delegate, close_calls) = recording(true);
    let mut config = ToolsClientConfiguration::new(Arc::new(delegate), None, None);

    let err = config.close().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(close_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_boxed_delegate() {
    let delegate: Box<dyn ClientConfiguration> =
        Box::new(ClientConfigurationBuilder::new().port(0).build().unwrap());
    let mut config = ToolsClientConfiguration::new(delegate, None, None);
    assert_eq!(config.controller(), "remote+http://localhost");
    assert!(config.close().is_ok());
}
