//! Instruction assembly for the dual-authority mint.
//!
//! Produces the ordered instruction list that creates a new non-fungible
//! mint with metadata and mints its single unit into the recipient's
//! associated token account. Pure with respect to ledger state: nothing is
//! submitted here.

use mpl_token_metadata::accounts::{MasterEdition, Metadata};
use mpl_token_metadata::instructions::{CreateV1Builder, MintV1Builder};
use mpl_token_metadata::types::{PrintSupply, TokenStandard};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use spl_associated_token_account::get_associated_token_address;

use crate::authority::MintAuthority;
use crate::constants::{ASSET_SYMBOL, MAX_URI_LENGTH, NFT_SUPPLY};
use crate::errors::{AftershowError, Result};
use crate::metadata::on_chain_name;
use crate::state::EventTicket;

/// Instruction list plus the freshly generated single-use mint identity.
/// The caller retains the keypair for partial signing; it is never reused.
#[derive(Debug)]
pub struct AssembledMint {
    pub instructions: Vec<Instruction>,
    pub mint: Keypair,
}

impl AssembledMint {
    pub fn mint_pubkey(&self) -> Pubkey {
        self.mint.pubkey()
    }
}

/// Builds the create-then-mint instruction pair for one ticket.
///
/// Ordering is mandatory: the mint-to instruction references the mint the
/// create instruction defines within the same transaction. The recipient
/// pays rent for every account created, the authority signs as both mint
/// and update authority.
pub fn build_create_and_mint(
    authority: &MintAuthority,
    ticket: &EventTicket,
    metadata_uri: &str,
    recipient: &Pubkey,
) -> Result<AssembledMint> {
    if metadata_uri.len() > MAX_URI_LENGTH {
        return Err(AftershowError::Parse(format!(
            "metadata URI exceeds {MAX_URI_LENGTH} bytes"
        )));
    }

    let mint = Keypair::new();
    let mint_pubkey = mint.pubkey();
    let (metadata_pda, _) = Metadata::find_pda(&mint_pubkey);
    let (master_edition_pda, _) = MasterEdition::find_pda(&mint_pubkey);

    let create = CreateV1Builder::new()
        .metadata(metadata_pda)
        .master_edition(Some(master_edition_pda))
        .mint(mint_pubkey, true)
        .authority(authority.pubkey())
        .payer(*recipient)
        .update_authority(authority.pubkey(), true)
        .is_mutable(true)
        .primary_sale_happened(false)
        .name(on_chain_name(&ticket.event_name))
        .symbol(ASSET_SYMBOL.to_string())
        .uri(metadata_uri.to_string())
        .seller_fee_basis_points(0)
        .token_standard(TokenStandard::NonFungible)
        .print_supply(PrintSupply::Zero)
        .instruction();

    let token_account = get_associated_token_address(recipient, &mint_pubkey);
    let mint_to = MintV1Builder::new()
        .token(token_account)
        .token_owner(Some(*recipient))
        .metadata(metadata_pda)
        .master_edition(Some(master_edition_pda))
        .mint(mint_pubkey)
        .authority(authority.pubkey())
        .payer(*recipient)
        .amount(NFT_SUPPLY)
        .instruction();

    Ok(AssembledMint {
        instructions: vec![create, mint_to],
        mint,
    })
}
