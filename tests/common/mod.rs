//! Shared mock ports for the end-to-end scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use aftershow::errors::{AftershowError, Result};
use aftershow::metadata::MetadataDocument;
use aftershow::rpc::{DocumentFetcher, LedgerRpc, OnChainMetadata, TokenAccountView};
use aftershow::{Config, MintService};
use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockLedger {
    pub blockhash_fails: bool,
    pub token_accounts: Vec<TokenAccountView>,
    pub metadata: HashMap<Pubkey, OnChainMetadata>,
    pub balances: HashMap<Pubkey, u64>,
    /// Transactions submitted through the port, for assertions. Shared so a
    /// test can keep a handle after moving the ledger into the service.
    pub sent: Arc<Mutex<Vec<VersionedTransaction>>>,
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn latest_blockhash(&self) -> Result<Hash> {
        if self.blockhash_fails {
            return Err(AftershowError::Network("blockhash unavailable".to_string()));
        }
        Ok(Hash::new_unique())
    }

    async fn balance(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.balances.get(account).copied().unwrap_or(0))
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccountView>> {
        Ok(self
            .token_accounts
            .iter()
            .filter(|account| account.owner == *owner)
            .cloned()
            .collect())
    }

    async fn mint_metadata(&self, mint: &Pubkey) -> Result<Option<OnChainMetadata>> {
        Ok(self.metadata.get(mint).cloned())
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        self.sent
            .lock()
            .expect("sent log poisoned")
            .push(transaction.clone());
        Ok(Signature::new_unique())
    }
}

/// Fetcher with no network: only embedded documents resolve.
pub struct OfflineFetcher;

#[async_trait]
impl DocumentFetcher for OfflineFetcher {
    async fn fetch_document(&self, url: &str) -> Result<MetadataDocument> {
        Err(AftershowError::Network(format!("offline: {url}")))
    }
}

pub fn authority_secret() -> (Keypair, String) {
    let keypair = Keypair::new();
    let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
    (keypair, json)
}

pub fn service_with(
    ledger: MockLedger,
    secret: Option<String>,
) -> MintService<MockLedger, OfflineFetcher> {
    let config = Config {
        rpc_url: "http://localhost:8899".to_string(),
        base_url: "https://aftershow.example".to_string(),
        mint_authority_secret: secret,
    };
    MintService::new(config, Arc::new(ledger), Arc::new(OfflineFetcher))
}
