use anyhow::Context;
use clap::Parser;
use mgmt_client_tools::utils::{logger, validation::Validate};
use mgmt_client_tools::{ClientConfiguration, ToolsCli};

fn main() -> anyhow::Result<()> {
    let cli = ToolsCli::parse();

    // 初始化日誌
    if cli.json_log {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file = cli
        .connection_file()
        .context("failed to load connection settings")?;

    // 驗證配置
    if let Err(e) = file.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut config = file
        .into_tools_configuration()
        .context("failed to assemble client configuration")?;

    match (config.authentication_config_uri(), config.username()) {
        (Some(uri), _) => tracing::info!("Authentication delegated to {}", uri),
        (None, Some(_)) => tracing::info!("Authenticating with inline credentials"),
        (None, None) => tracing::info!("No credentials supplied, relying on local authentication"),
    }

    println!("{}", config.controller());

    config
        .close()
        .context("failed to release client configuration")?;
    Ok(())
}
