//! Ports to the ledger network and to off-chain document hosts.
//!
//! The core shapes requests and responses at these contracts; the actual
//! protocol lives in `solana-client` and `reqwest`. Tests substitute mock
//! implementations.

use async_trait::async_trait;
use solana_account_decoder::UiAccountData;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::str::FromStr;
use tracing::debug;

use crate::errors::{AftershowError, Result};
use crate::metadata::{trim_padding, MetadataDocument};

/// A ledger-observed token account, read-only from this system's
/// perspective. `amount` stays a string: token amounts exceed u64 for some
/// foreign mints and the NFT filter only ever compares against `"1"`.
#[derive(Debug, Clone)]
pub struct TokenAccountView {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub decimals: u8,
    pub amount: String,
}

/// Symbol and URI recovered from a mint's on-chain metadata account,
/// NUL-padding already trimmed.
#[derive(Debug, Clone)]
pub struct OnChainMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;

    async fn balance(&self, account: &Pubkey) -> Result<u64>;

    /// All parsed token accounts held by `owner` under the SPL token
    /// program. Ordering is whatever the network returns.
    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccountView>>;

    /// On-chain metadata for a mint, `None` when the mint carries no
    /// metadata account.
    async fn mint_metadata(&self, mint: &Pubkey) -> Result<Option<OnChainMetadata>>;

    /// Broadcasts a fully signed transaction to the network and returns its
    /// signature. The transaction must be submitted byte-for-byte as the
    /// wallet re-serialized it.
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature>;
}

/// Dereferences network-addressable metadata documents.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches and parses a metadata document. A non-success response is a
    /// `Network` error, an unparseable body a `Parse` error.
    async fn fetch_document(&self, url: &str) -> Result<MetadataDocument>;
}

/// `LedgerRpc` over a JSON-RPC node.
pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: RpcClient::new(rpc_url.to_string()),
        }
    }
}

#[async_trait]
impl LedgerRpc for SolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn balance(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.client.get_balance(account).await?)
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccountView>> {
        let keyed = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(spl_token::id()))
            .await?;

        let mut views = Vec::with_capacity(keyed.len());
        for entry in keyed {
            match parse_token_account(&entry.account.data) {
                Some(view) => views.push(view),
                None => debug!(account = %entry.pubkey, "unparseable token account skipped"),
            }
        }
        Ok(views)
    }

    async fn mint_metadata(&self, mint: &Pubkey) -> Result<Option<OnChainMetadata>> {
        let (pda, _) = mpl_token_metadata::accounts::Metadata::find_pda(mint);
        let account = match self.client.get_account(&pda).await {
            Ok(account) => account,
            // Covers both "no metadata account" and transient fetch trouble;
            // the scan path treats either as a per-candidate skip.
            Err(err) => {
                debug!(%mint, %err, "metadata account unavailable");
                return Ok(None);
            }
        };
        let metadata = mpl_token_metadata::accounts::Metadata::safe_deserialize(&account.data)
            .map_err(|err| AftershowError::Parse(format!("metadata account for {mint}: {err}")))?;
        Ok(Some(OnChainMetadata {
            name: trim_padding(&metadata.name).to_string(),
            symbol: trim_padding(&metadata.symbol).to_string(),
            uri: trim_padding(&metadata.uri).to_string(),
        }))
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        Ok(self.client.send_transaction(transaction).await?)
    }
}

fn parse_token_account(data: &UiAccountData) -> Option<TokenAccountView> {
    let UiAccountData::Json(parsed) = data else {
        return None;
    };
    let info = parsed.parsed.get("info")?;
    let mint = Pubkey::from_str(info.get("mint")?.as_str()?).ok()?;
    let owner = Pubkey::from_str(info.get("owner")?.as_str()?).ok()?;
    let token_amount = info.get("tokenAmount")?;
    let decimals = u8::try_from(token_amount.get("decimals")?.as_u64()?).ok()?;
    let amount = token_amount.get("amount")?.as_str()?.to_string();
    Some(TokenAccountView {
        mint,
        owner,
        decimals,
        amount,
    })
}

/// `DocumentFetcher` over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_document(&self, url: &str) -> Result<MetadataDocument> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AftershowError::Network(format!(
                "metadata fetch returned {} for {url}",
                response.status()
            )));
        }
        response
            .json::<MetadataDocument>()
            .await
            .map_err(|err| AftershowError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_account_decoder::parse_account_data::ParsedAccount;
    use serde_json::json;

    fn json_account(value: serde_json::Value) -> UiAccountData {
        UiAccountData::Json(ParsedAccount {
            program: "spl-token".to_string(),
            parsed: value,
            space: 165,
        })
    }

    #[test]
    fn well_formed_token_account_parses() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let data = json_account(json!({
            "type": "account",
            "info": {
                "mint": mint.to_string(),
                "owner": owner.to_string(),
                "tokenAmount": { "amount": "1", "decimals": 0, "uiAmount": 1.0 }
            }
        }));
        let view = parse_token_account(&data).unwrap();
        assert_eq!(view.mint, mint);
        assert_eq!(view.owner, owner);
        assert_eq!(view.decimals, 0);
        assert_eq!(view.amount, "1");
    }

    #[test]
    fn malformed_token_account_is_skipped() {
        let data = json_account(json!({ "type": "account", "info": { "mint": "not-a-key" } }));
        assert!(parse_token_account(&data).is_none());
    }
}
