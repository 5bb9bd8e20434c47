//! Partially signed transaction assembly.
//!
//! Compiles the assembled instructions into a v0 versioned message with the
//! recipient wallet as fee payer, then fills exactly two signature slots:
//! the mint authority's and the one-time mint keypair's. The fee payer slot
//! is left empty for the wallet to fill; nothing else may change afterwards,
//! since re-signing a mutated transaction invalidates the embedded
//! signatures.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use solana_sdk::hash::Hash;
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::authority::MintAuthority;
use crate::errors::{AftershowError, Result};
use crate::mint::instructions::AssembledMint;

/// A compiled transaction carrying the service-side signatures, ready for
/// transport. Only the fee payer's signature is missing.
#[derive(Debug)]
pub struct PartiallySignedTransaction {
    transaction: VersionedTransaction,
}

impl PartiallySignedTransaction {
    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    /// Number of signature slots already filled.
    pub fn signature_count(&self) -> usize {
        self.transaction
            .signatures
            .iter()
            .filter(|sig| **sig != Signature::default())
            .count()
    }

    /// Transport encoding: base64 over the wire serialization. The caller
    /// must deserialize, add the missing signature, and re-serialize
    /// unchanged.
    pub fn to_base64(&self) -> Result<String> {
        Ok(BASE64.encode(bincode::serialize(&self.transaction)?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|err| AftershowError::Parse(err.to_string()))?;
        Ok(Self {
            transaction: bincode::deserialize(&bytes)?,
        })
    }
}

/// Compiles and partially signs the mint transaction.
///
/// `recent_blockhash` must be freshly fetched: a stale hash is rejected at
/// broadcast time by the network, not here. The authority is never the fee
/// payer.
pub fn build_partially_signed(
    authority: &MintAuthority,
    assembled: &AssembledMint,
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
) -> Result<PartiallySignedTransaction> {
    if *fee_payer == authority.pubkey() {
        return Err(AftershowError::StateConflict(
            "the mint authority must not pay transaction fees".to_string(),
        ));
    }

    let message = v0::Message::try_compile(
        fee_payer,
        &assembled.instructions,
        &[],
        recent_blockhash,
    )
    .map_err(|err| AftershowError::Parse(format!("message compilation failed: {err}")))?;
    let message = VersionedMessage::V0(message);

    let required = message.header().num_required_signatures as usize;
    let payload = message.serialize();
    let mint_pubkey = assembled.mint.pubkey();

    let mut signatures = vec![Signature::default(); required];
    for (slot, key) in message.static_account_keys().iter().take(required).enumerate() {
        if *key == authority.pubkey() {
            signatures[slot] = authority.sign_message(&payload);
        } else if *key == mint_pubkey {
            signatures[slot] = assembled.mint.sign_message(&payload);
        }
        // Any remaining slot (the fee payer's) stays empty for the wallet.
    }

    Ok(PartiallySignedTransaction {
        transaction: VersionedTransaction {
            signatures,
            message,
        },
    })
}
