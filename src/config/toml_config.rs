use crate::client::ToolsClientConfiguration;
use crate::config::{BasicClientConfiguration, ClientConfigurationBuilder};
use crate::domain::model::{SaslOptions, SslContext};
use crate::utils::error::{Result, ToolsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionFile {
    #[serde(default)]
    pub connection: ConnectionSection,
    pub credentials: Option<CredentialsSection>,
    pub sasl: Option<SaslOptions>,
    pub tls: Option<TlsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionSection {
    pub protocol: Option<String>,
    pub host: Option<String>,
    pub port: Option<i32>,
    pub timeout_ms: Option<i32>,
    pub bind_address: Option<String>,
    pub authentication_config: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsSection {
    pub protocol: Option<String>,
    pub key_store: Option<PathBuf>,
    pub trust_store: Option<PathBuf>,
    pub verify_hostname: Option<bool>,
}

impl From<&TlsSection> for SslContext {
    fn from(section: &TlsSection) -> Self {
        let defaults = SslContext::default();
        SslContext {
            protocol: section.protocol.clone().unwrap_or(defaults.protocol),
            key_store: section.key_store.clone(),
            trust_store: section.trust_store.clone(),
            verify_hostname: section.verify_hostname.unwrap_or(defaults.verify_hostname),
        }
    }
}

fn env_var_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolsError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;
    Ok(PATTERN.get_or_init(|| re))
}

fn expand(re: &Regex, value: &str) -> String {
    re.replace_all(value, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

fn expand_field(re: &Regex, field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        *value = expand(re, value);
    }
}

impl ConnectionFile {
    /// 從 TOML 檔案載入連線設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading connection settings from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut file: Self = toml::from_str(content)?;
        file.substitute_env_vars()?;
        Ok(file)
    }

    /// 替換字串欄位中的環境變數 (例如 ${MGMT_PASSWORD})，未設定的變數保持原樣。
    /// 解析之後才替換，變數值不經過 TOML 跳脫處理
    fn substitute_env_vars(&mut self) -> Result<()> {
        let re = env_var_pattern()?;

        let connection = &mut self.connection;
        for field in [
            &mut connection.protocol,
            &mut connection.host,
            &mut connection.bind_address,
            &mut connection.authentication_config,
        ] {
            expand_field(re, field);
        }

        if let Some(credentials) = self.credentials.as_mut() {
            expand_field(re, &mut credentials.username);
            expand_field(re, &mut credentials.password);
        }

        if let Some(sasl) = self.sasl.as_mut() {
            for value in sasl.values_mut() {
                *value = expand(re, value);
            }
        }

        if let Some(tls) = self.tls.as_mut() {
            expand_field(re, &mut tls.protocol);
            for path in [&mut tls.key_store, &mut tls.trust_store].into_iter().flatten() {
                let expanded = path.to_str().map(|p| expand(re, p));
                if let Some(expanded) = expanded {
                    *path = PathBuf::from(expanded);
                }
            }
        }

        Ok(())
    }

    /// 驗證設定的合理性
    pub fn validate_config(&self) -> Result<()> {
        let connection = &self.connection;
        if let Some(protocol) = &connection.protocol {
            validation::validate_protocol("connection.protocol", protocol)?;
        }
        if let Some(host) = &connection.host {
            validation::validate_non_empty_string("connection.host", host)?;
        }
        if let Some(port) = connection.port {
            validation::validate_range("connection.port", port, 0, 65535)?;
        }
        if let Some(timeout) = connection.timeout_ms {
            validation::validate_range("connection.timeout_ms", timeout, 0, i32::MAX)?;
        }
        if let Some(uri) = &connection.authentication_config {
            validation::validate_uri("connection.authentication_config", uri)?;
        }

        Ok(())
    }

    /// 轉成 builder；檔案中沒有的欄位沿用預設值
    pub fn to_builder(&self) -> Result<ClientConfigurationBuilder> {
        self.validate_config()?;

        let connection = &self.connection;
        let mut builder = ClientConfigurationBuilder::new();
        if let Some(protocol) = &connection.protocol {
            builder = builder.protocol(Some(protocol.clone()));
        }
        if let Some(host) = &connection.host {
            builder = builder.host(Some(host.clone()));
        }
        if let Some(port) = connection.port {
            builder = builder.port(port);
        }
        if let Some(timeout) = connection.timeout_ms {
            builder = builder.connection_timeout(timeout);
        }
        if let Some(uri) = &connection.authentication_config {
            builder = builder.authentication_config(uri)?;
        }

        Ok(builder
            .client_bind_address(connection.bind_address.clone())
            .sasl_options(self.sasl.clone())
            .ssl_context(self.tls.as_ref().map(SslContext::from)))
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().and_then(|c| c.username.as_deref())
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref().and_then(|c| c.password.as_deref())
    }

    pub fn into_tools_configuration(
        self,
    ) -> Result<ToolsClientConfiguration<BasicClientConfiguration>> {
        let delegate = self.to_builder()?.build()?;
        let credentials = self.credentials.unwrap_or_default();
        Ok(ToolsClientConfiguration::new(
            delegate,
            credentials.username,
            credentials.password,
        ))
    }
}

impl Validate for ConnectionFile {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
