//! Aftershow: verified event attendance as NFTs on Solana.
//!
//! Two coupled pieces of machinery live here. The mint path assembles a
//! dual-authority transaction: the service-held mint authority authorizes
//! token creation and minting while the fan's wallet pays fees and receives
//! the asset, so the transaction leaves this crate partially signed with
//! only the wallet's signature missing. The scan path walks the other
//! direction, reconstructing a wallet's collection purely from ledger state
//! plus off-chain metadata, tolerant of foreign and malformed tokens.

pub mod artwork;
pub mod authority;
pub mod config;
pub mod constants;
pub mod errors;
pub mod metadata;
pub mod mint;
pub mod rpc;
pub mod scan;
pub mod service;
pub mod state;
pub mod tickets;

pub use authority::{AuthorityKeyManager, MintAuthority};
pub use config::Config;
pub use errors::{AftershowError, Result};
pub use mint::{build_create_and_mint, build_partially_signed, PartiallySignedTransaction};
pub use rpc::{DocumentFetcher, HttpFetcher, LedgerRpc, SolanaRpc};
pub use service::MintService;
pub use state::{AftershowNft, ClaimTransaction, ClaimedTicket, EventTicket, FanProfile};
pub use tickets::TicketStore;
