use std::sync::Arc;

use once_cell::sync::OnceCell;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use tracing::info;

use crate::config::Config;
use crate::constants::SECRET_KEY_LENGTH;
use crate::errors::{AftershowError, Result};

/// The service-held signing keypair. It is both the token's mint authority
/// and its update authority, and never the fee payer. Exactly one logical
/// authority exists per deployment; it is never rotated at runtime.
pub struct MintAuthority {
    keypair: Keypair,
    pubkey: Pubkey,
}

impl MintAuthority {
    /// Builds the authority from its configured secret representation: a
    /// JSON array of exactly 64 bytes (ed25519 seed followed by public key).
    pub fn from_secret_json(raw: &str) -> Result<Self> {
        let bytes: Vec<u8> = serde_json::from_str(raw).map_err(|_| {
            AftershowError::Config("mint authority secret is not a JSON byte array".to_string())
        })?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(AftershowError::Config(format!(
                "mint authority secret must be {} bytes, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            )));
        }
        let keypair = Keypair::from_bytes(&bytes).map_err(|_| {
            AftershowError::Config("mint authority secret is not a valid keypair".to_string())
        })?;
        let pubkey = keypair.pubkey();
        Ok(Self { keypair, pubkey })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    pub fn sign_message(&self, message: &[u8]) -> Signature {
        self.keypair.sign_message(message)
    }
}

impl std::fmt::Debug for MintAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("MintAuthority")
            .field("pubkey", &self.pubkey)
            .finish_non_exhaustive()
    }
}

/// Lazily materializes the deployment's single `MintAuthority` from
/// configuration. The first caller initializes; every later caller observes
/// the same value. A missing or malformed secret fails closed with a
/// `Config` error, never an ephemeral fallback key.
pub struct AuthorityKeyManager {
    secret: Option<String>,
    cell: OnceCell<Arc<MintAuthority>>,
}

impl AuthorityKeyManager {
    pub fn new(config: &Config) -> Self {
        Self {
            secret: config.mint_authority_secret.clone(),
            cell: OnceCell::new(),
        }
    }

    /// Idempotent and thread-safe; initialization happens at most once.
    pub fn get_authority(&self) -> Result<Arc<MintAuthority>> {
        self.cell
            .get_or_try_init(|| {
                let raw = self.secret.as_deref().ok_or_else(|| {
                    AftershowError::Config("MINT_AUTHORITY_SECRET_KEY is not set".to_string())
                })?;
                let authority = MintAuthority::from_secret_json(raw)?;
                info!(authority = %authority.pubkey(), "mint authority initialized");
                Ok(Arc::new(authority))
            })
            .cloned()
    }
}
