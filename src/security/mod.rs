pub mod callback;

pub use callback::{Callback, CallbackHandler, ClientCallbackHandler, UnsupportedCallback};
