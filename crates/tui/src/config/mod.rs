use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the gateway proxy.
    pub base_url: String,
    /// Branch preselected at startup (directory key).
    pub filial: String,
    /// Default installment count for payment links.
    pub installments: u32,
    /// Customers list page size.
    pub page_size: u32,
    /// Log level for the env filter.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            filial: String::new(),
            installments: 6,
            page_size: 10,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "checkout_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the preselected branch.
    #[arg(long)]
    filial: Option<String>,
    /// Override the default installment count.
    #[arg(long)]
    installments: Option<u32>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CHECKOUT_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(filial) = args.filial {
        settings.filial = filial;
    }
    if let Some(installments) = args.installments {
        settings.installments = installments;
    }

    Ok(settings)
}
