//! Claim and collection orchestration.
//!
//! Wires the ticket directory, the authority, the instruction/transaction
//! builders, and the scan pipeline together behind the operations the
//! surrounding service exposes. HTTP plumbing stays outside this crate.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::join_all;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::{debug, info};

use crate::artwork::generate_artwork;
use crate::authority::AuthorityKeyManager;
use crate::config::Config;
use crate::errors::{AftershowError, Result};
use crate::metadata::{metadata_uri, MetadataDocument};
use crate::mint::{build_create_and_mint, build_partially_signed, PartiallySignedTransaction};
use crate::rpc::{DocumentFetcher, LedgerRpc};
use crate::scan::{list_nft_candidates, resolve, Resolution};
use crate::state::{
    AftershowNft, AuthorityBalance, ClaimTransaction, ClaimedTicket, EventTicket, FanProfile,
};
use crate::tickets::TicketStore;

pub struct MintService<R, F> {
    config: Config,
    tickets: TicketStore,
    authority: AuthorityKeyManager,
    rpc: Arc<R>,
    fetcher: Arc<F>,
}

impl<R, F> MintService<R, F>
where
    R: LedgerRpc,
    F: DocumentFetcher,
{
    pub fn new(config: Config, rpc: Arc<R>, fetcher: Arc<F>) -> Self {
        let authority = AuthorityKeyManager::new(&config);
        Self {
            config,
            tickets: TicketStore::new(),
            authority,
            rpc,
            fetcher,
        }
    }

    /// Replaces the seeded demo directory, mainly for tests.
    pub fn with_ticket_store(mut self, tickets: TicketStore) -> Self {
        self.tickets = tickets;
        self
    }

    pub fn available_tickets(&self) -> Vec<EventTicket> {
        self.tickets.all()
    }

    /// Ticket eligibility check: exists, not yet claimed, verified.
    pub fn verify_ticket(&self, ticket_id: &str) -> Result<EventTicket> {
        let ticket = self
            .tickets
            .lookup(ticket_id)
            .ok_or_else(|| AftershowError::NotFound(format!("ticket {ticket_id}")))?;
        if ticket.claimed {
            return Err(AftershowError::StateConflict(format!(
                "ticket {ticket_id} has already been claimed"
            )));
        }
        if !ticket.verified {
            return Err(AftershowError::StateConflict(format!(
                "ticket {ticket_id} is not verified"
            )));
        }
        Ok(ticket)
    }

    /// The metadata document served at the ticket's metadata URI.
    pub fn ticket_metadata(&self, ticket_id: &str) -> Result<MetadataDocument> {
        let ticket = self
            .tickets
            .lookup(ticket_id)
            .ok_or_else(|| AftershowError::NotFound(format!("ticket {ticket_id}")))?;
        Ok(MetadataDocument::for_ticket(&ticket))
    }

    /// Builds the partially signed mint transaction for a claim.
    ///
    /// Eligibility and the recipient address are checked before any signing
    /// or network work. The blockhash is fetched fresh immediately before
    /// compilation. Failures are fatal to this single call; no transaction
    /// is ever partially returned.
    pub async fn build_claim_transaction(
        &self,
        ticket_id: &str,
        wallet: &str,
    ) -> Result<ClaimTransaction> {
        let ticket = self.verify_ticket(ticket_id)?;
        let recipient = Pubkey::from_str(wallet)
            .map_err(|_| AftershowError::MalformedAddress(wallet.to_string()))?;

        let authority = self.authority.get_authority()?;
        let uri = metadata_uri(&self.config.base_url, ticket_id);
        let assembled = build_create_and_mint(&authority, &ticket, &uri, &recipient)?;

        let blockhash = self.rpc.latest_blockhash().await?;
        let transaction = build_partially_signed(&authority, &assembled, &recipient, blockhash)?;

        info!(
            ticket = %ticket_id,
            mint = %assembled.mint_pubkey(),
            recipient = %recipient,
            "built partially signed mint transaction"
        );

        Ok(ClaimTransaction {
            transaction_base64: transaction.to_base64()?,
            mint_address: assembled.mint_pubkey().to_string(),
        })
    }

    /// Submits a wallet-signed claim transaction, decoded from its
    /// transport encoding. The bytes must be exactly what the wallet
    /// re-serialized; any mutation invalidates the embedded signatures.
    pub async fn broadcast_claim(&self, transaction_base64: &str) -> Result<String> {
        let transaction = PartiallySignedTransaction::from_base64(transaction_base64)?;
        let signature = self.rpc.send_transaction(transaction.transaction()).await?;
        info!(%signature, "claim transaction broadcast");
        Ok(signature.to_string())
    }

    /// Marks the ticket claimed after the wallet has signed and broadcast.
    /// The claimed transition happens exactly once.
    pub fn confirm_claim(&self, ticket_id: &str) -> Result<ClaimedTicket> {
        let ticket = self
            .tickets
            .lookup(ticket_id)
            .ok_or_else(|| AftershowError::NotFound(format!("ticket {ticket_id}")))?;
        self.tickets.mark_claimed(ticket_id)?;
        info!(ticket = %ticket_id, "ticket claimed");

        let claimed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        Ok(ClaimedTicket {
            artwork_svg: generate_artwork(&ticket),
            ticket_id: ticket.ticket_id,
            event_name: ticket.event_name,
            artist: ticket.artist,
            venue: ticket.venue,
            city: ticket.city,
            date: ticket.date,
            claimed: true,
            claimed_at,
        })
    }

    /// Reconstructs the wallet's Aftershow collection from ledger state.
    /// Candidates resolve concurrently; per-candidate failures are skipped,
    /// never surfaced. Result ordering is not guaranteed.
    pub async fn nfts_by_owner(&self, wallet: &str) -> Result<Vec<AftershowNft>> {
        let owner = Pubkey::from_str(wallet)
            .map_err(|_| AftershowError::MalformedAddress(wallet.to_string()))?;

        let candidates = list_nft_candidates(self.rpc.as_ref(), &owner).await?;
        let resolutions = join_all(candidates.iter().map(|candidate| async move {
            (
                candidate.mint,
                resolve(self.rpc.as_ref(), self.fetcher.as_ref(), &candidate.mint, &owner).await,
            )
        }))
        .await;

        let mut nfts = Vec::new();
        for (mint, resolution) in resolutions {
            match resolution {
                Resolution::Minted(nft) => nfts.push(*nft),
                Resolution::Skipped(reason) => {
                    debug!(%mint, ?reason, "candidate skipped during scan")
                }
            }
        }
        Ok(nfts)
    }

    pub async fn fan_profile(&self, wallet: &str) -> Result<FanProfile> {
        let nfts = self.nfts_by_owner(wallet).await?;
        Ok(FanProfile {
            wallet: wallet.to_string(),
            total_events: nfts.len(),
            nfts,
        })
    }

    /// Operator view of the authority's funding. Fails closed when the
    /// secret is absent, like every other authority-dependent operation.
    pub async fn authority_balance(&self) -> Result<AuthorityBalance> {
        let authority = self.authority.get_authority()?;
        let lamports = self.rpc.balance(&authority.pubkey()).await?;
        Ok(AuthorityBalance {
            public_key: authority.pubkey().to_string(),
            lamports,
            sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        })
    }
}
