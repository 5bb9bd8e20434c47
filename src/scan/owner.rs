//! Wallet ownership scanning.

use solana_sdk::pubkey::Pubkey;

use crate::constants::NFT_DECIMALS;
use crate::errors::Result;
use crate::rpc::{LedgerRpc, TokenAccountView};

/// The canonical on-chain shape of a single NFT holding: zero decimals and
/// exactly one unit.
pub fn is_nft_shaped(account: &TokenAccountView) -> bool {
    account.decimals == NFT_DECIMALS && account.amount == "1"
}

/// All NFT-shaped token accounts held by `wallet`. Pure query; ordering is
/// whatever the network returned and is not stable across calls.
pub async fn list_nft_candidates<R: LedgerRpc + ?Sized>(
    rpc: &R,
    wallet: &Pubkey,
) -> Result<Vec<TokenAccountView>> {
    let accounts = rpc.token_accounts_by_owner(wallet).await?;
    Ok(accounts.into_iter().filter(is_nft_shaped).collect())
}
