use serde::{Deserialize, Serialize};

/// A verified event-attendance record from the ticket directory.
///
/// A ticket transitions `claimed: false -> true` exactly once and never
/// back; the directory enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTicket {
    pub ticket_id: String,
    pub event_name: String,
    pub artist: String,
    pub venue: String,
    pub city: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub verified: bool,
    pub claimed: bool,
}

/// A collectible reconstructed from ledger state plus off-chain metadata.
/// Only built for mints whose symbol matches the asset family tag and whose
/// on-chain shape is exactly one indivisible unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AftershowNft {
    pub mint_address: String,
    pub ticket_id: String,
    pub event_name: String,
    pub artist: String,
    pub venue: String,
    pub city: String,
    pub date: String,
    /// Regenerated deterministically from the recovered ticket fields,
    /// never stored.
    pub artwork_svg: String,
    pub owner_wallet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanProfile {
    pub wallet: String,
    pub total_events: usize,
    pub nfts: Vec<AftershowNft>,
}

/// Result of building a claim: the partially signed transaction in its
/// transport encoding plus the mint address it will create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimTransaction {
    pub transaction_base64: String,
    pub mint_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedTicket {
    pub ticket_id: String,
    pub event_name: String,
    pub artist: String,
    pub venue: String,
    pub city: String,
    pub date: String,
    pub artwork_svg: String,
    pub claimed: bool,
    /// Unix timestamp of the claim confirmation.
    pub claimed_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityBalance {
    pub public_key: String,
    pub lamports: u64,
    pub sol: f64,
}
