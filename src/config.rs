use crate::constants::{DEFAULT_BASE_URL, DEFAULT_RPC_URL};

/// Environment-derived service configuration. Built once at startup and
/// passed into the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ledger RPC endpoint.
    pub rpc_url: String,
    /// Public base URL of the surrounding service, used to build the
    /// network-addressable metadata URI for each ticket.
    pub base_url: String,
    /// Raw mint authority secret: a JSON array of exactly 64 bytes.
    /// Validated lazily by `AuthorityKeyManager`, not here, so that
    /// read-only operations work without the secret.
    pub mint_authority_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            rpc_url: std::env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            base_url: std::env::var("AFTERSHOW_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            mint_authority_secret: std::env::var("MINT_AUTHORITY_SECRET_KEY").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mint_authority_secret: None,
        }
    }
}
