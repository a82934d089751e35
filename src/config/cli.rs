use crate::client::ToolsClientConfiguration;
use crate::config::toml_config::ConnectionFile;
use crate::config::BasicClientConfiguration;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "mgmt-controller")]
#[command(about = "Resolve the controller address and credentials for a management CLI session")]
pub struct ToolsCli {
    #[arg(long, help = "Management protocol, e.g. remote+http")]
    pub protocol: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<i32>,

    #[arg(long = "timeout", value_name = "MILLIS")]
    pub timeout_ms: Option<i32>,

    #[arg(long, env = "MGMT_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "MGMT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long = "auth-config", value_name = "URI", help = "External authentication configuration")]
    pub authentication_config: Option<String>,

    #[arg(long = "bind-address")]
    pub bind_address: Option<String>,

    #[arg(long, value_name = "FILE", help = "TOML file with connection settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_log: bool,
}

impl std::fmt::Debug for ToolsCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolsCli")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_ms", &self.timeout_ms)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("authentication_config", &self.authentication_config)
            .field("bind_address", &self.bind_address)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("json_log", &self.json_log)
            .finish()
    }
}

impl ToolsCli {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn connection_file(&self) -> Result<ConnectionFile> {
        let mut file = match &self.config {
            Some(path) => ConnectionFile::from_file(path)?,
            None => ConnectionFile::default(),
        };

        let connection = &mut file.connection;
        override_with(&mut connection.protocol, &self.protocol);
        override_with(&mut connection.host, &self.host);
        override_with(&mut connection.port, &self.port);
        override_with(&mut connection.timeout_ms, &self.timeout_ms);
        override_with(&mut connection.bind_address, &self.bind_address);
        override_with(&mut connection.authentication_config, &self.authentication_config);

        if self.username.is_some() || self.password.is_some() {
            let credentials = file.credentials.get_or_insert_with(Default::default);
            override_with(&mut credentials.username, &self.username);
            override_with(&mut credentials.password, &self.password);
        }

        Ok(file)
    }

    pub fn tools_configuration(&self) -> Result<ToolsClientConfiguration<BasicClientConfiguration>> {
        self.connection_file()?.into_tools_configuration()
    }
}

fn override_with<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}
