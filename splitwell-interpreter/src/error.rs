use splitwell_domain::LedgerError;
use std::io;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Usage: splitwell-interpreter <ledger.json> [balances|itemized|simplified|trace]")]
    Usage,
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown view '{0}'; expected balances, itemized, simplified or trace")]
    UnknownView(String),
    #[error("Invalid ledger: {0}")]
    Ledger(#[from] LedgerError),
}
