use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Negotiation parameters for the SASL mechanism used during the handshake.
pub type SaslOptions = BTreeMap<String, String>;

/// Executor the protocol client schedules its work on.
pub type Executor = tokio::runtime::Handle;

/// TLS settings handed to the protocol client. Holds values only; the
/// client performs the actual negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslContext {
    pub protocol: String,
    pub key_store: Option<PathBuf>,
    pub trust_store: Option<PathBuf>,
    pub verify_hostname: bool,
}

impl Default for SslContext {
    fn default() -> Self {
        Self {
            protocol: "TLSv1.3".to_string(),
            key_store: None,
            trust_store: None,
            verify_hostname: true,
        }
    }
}
