use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCallback {
    pub prompt: String,
    pub default_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordCallback {
    pub prompt: String,
    pub echo_on: bool,
    pub password: Option<Vec<char>>,
}

impl PasswordCallback {
    /// Zero-fills and drops the stored password.
    pub fn clear_password(&mut self) {
        if let Some(password) = self.password.as_mut() {
            password.iter_mut().for_each(|c| *c = '\0');
        }
        self.password = None;
    }
}

impl fmt::Debug for PasswordCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCallback")
            .field("prompt", &self.prompt)
            .field("echo_on", &self.echo_on)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealmCallback {
    pub prompt: String,
    pub default_text: Option<String>,
    pub text: Option<String>,
}

/// A single question asked during the authentication exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Name(NameCallback),
    Password(PasswordCallback),
    Realm(RealmCallback),
    /// Any callback kind the handler has no answer for.
    Unsupported(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported callback: {0}")]
pub struct UnsupportedCallback(pub String);

/// Answers authentication challenges on behalf of the client.
pub trait CallbackHandler: Send + Sync + fmt::Debug {
    fn handle(&self, callbacks: &mut [Callback]) -> Result<(), UnsupportedCallback>;
}

/// Answers name and password challenges with fixed credentials.
#[derive(Clone)]
pub struct ClientCallbackHandler {
    username: Option<String>,
    password: Option<String>,
}

impl ClientCallbackHandler {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }
}

impl CallbackHandler for ClientCallbackHandler {
    fn handle(&self, callbacks: &mut [Callback]) -> Result<(), UnsupportedCallback> {
        for callback in callbacks.iter_mut() {
            match callback {
                Callback::Name(cb) => {
                    if let Some(username) = &self.username {
                        cb.name = Some(username.clone());
                    }
                }
                Callback::Password(cb) => {
                    if let Some(password) = &self.password {
                        cb.password = Some(password.chars().collect());
                    }
                }
                // 由伺服器端決定 realm
                Callback::Realm(cb) => {
                    cb.text = cb.default_text.clone();
                }
                Callback::Unsupported(kind) => {
                    return Err(UnsupportedCallback(kind.clone()));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ClientCallbackHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCallbackHandler")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}
