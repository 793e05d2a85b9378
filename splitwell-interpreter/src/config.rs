use crate::error::CliError;
use std::{env, str::FromStr};
use tracing_subscriber::EnvFilter;

const VIEW_VAR: &str = "SPLITWELL_VIEW";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    Balances,
    Itemized,
    #[default]
    Simplified,
    Trace,
}

impl FromStr for View {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balances" => Ok(Self::Balances),
            "itemized" => Ok(Self::Itemized),
            "simplified" => Ok(Self::Simplified),
            "trace" => Ok(Self::Trace),
            _ => Err(CliError::UnknownView(s.to_string())),
        }
    }
}

/// Settings read from the environment (and a `.env` file, when present).
pub struct AppConfig {
    pub default_view: View,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CliError> {
        let _ = dotenvy::dotenv();
        Self::from_view_var(env::var(VIEW_VAR).ok().as_deref())
    }

    fn from_view_var(value: Option<&str>) -> Result<Self, CliError> {
        let default_view = match value {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => View::default(),
        };
        Ok(Self { default_view })
    }
}

/// Logs go to stderr so rendered output stays clean on stdout.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
