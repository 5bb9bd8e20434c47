//! Per-candidate metadata resolution.
//!
//! Each candidate mint resolves independently to either a reconstructed
//! collectible or a skip reason. Failures are isolated: one malformed or
//! foreign token never blocks enumeration of the rest, so nothing here
//! returns a crate-level error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::artwork::generate_artwork;
use crate::constants::{ASSET_SYMBOL, EMBEDDED_JSON_PREFIX};
use crate::metadata::{strip_display_prefix, MetadataDocument};
use crate::rpc::{DocumentFetcher, LedgerRpc};
use crate::state::{AftershowNft, EventTicket};

/// Why a candidate mint was left out of the reconstructed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No metadata account, or it could not be read.
    NoMetadata,
    /// Symbol does not match the asset family tag; somebody else's token,
    /// not an error.
    ForeignAsset,
    EmptyUri,
    UnsupportedUriScheme,
    FetchFailed,
    MalformedDocument,
}

pub enum Resolution {
    Minted(Box<AftershowNft>),
    Skipped(SkipReason),
}

/// Resolves one candidate mint into a collectible.
pub async fn resolve<R, F>(rpc: &R, fetcher: &F, mint: &Pubkey, owner: &Pubkey) -> Resolution
where
    R: LedgerRpc + ?Sized,
    F: DocumentFetcher + ?Sized,
{
    let metadata = match rpc.mint_metadata(mint).await {
        Ok(Some(metadata)) => metadata,
        Ok(None) => return Resolution::Skipped(SkipReason::NoMetadata),
        Err(err) => {
            debug!(%mint, %err, "metadata lookup failed");
            return Resolution::Skipped(SkipReason::NoMetadata);
        }
    };

    if metadata.symbol != ASSET_SYMBOL {
        return Resolution::Skipped(SkipReason::ForeignAsset);
    }

    let document = match dereference_uri(fetcher, &metadata.uri).await {
        Ok(document) => document,
        Err(reason) => return Resolution::Skipped(reason),
    };

    let field = |name: &str| document.attribute(name).unwrap_or_default().to_string();
    let ticket = EventTicket {
        ticket_id: field("Ticket ID"),
        event_name: strip_display_prefix(&document.name).to_string(),
        artist: field("Artist"),
        venue: field("Venue"),
        city: field("City"),
        date: field("Date"),
        seat: None,
        verified: true,
        claimed: true,
    };

    // The artwork is re-derived from the recovered fields, never stored.
    let artwork_svg = generate_artwork(&ticket);

    Resolution::Minted(Box::new(AftershowNft {
        mint_address: mint.to_string(),
        ticket_id: ticket.ticket_id,
        event_name: ticket.event_name,
        artist: ticket.artist,
        venue: ticket.venue,
        city: ticket.city,
        date: ticket.date,
        artwork_svg,
        owner_wallet: owner.to_string(),
    }))
}

/// Dereferences a metadata URI: embedded base64 documents decode inline,
/// http(s) documents are fetched, anything else is skipped.
async fn dereference_uri<F: DocumentFetcher + ?Sized>(
    fetcher: &F,
    uri: &str,
) -> std::result::Result<MetadataDocument, SkipReason> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(SkipReason::EmptyUri);
    }
    if let Some(encoded) = uri.strip_prefix(EMBEDDED_JSON_PREFIX) {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| SkipReason::MalformedDocument)?;
        return serde_json::from_slice(&bytes).map_err(|_| SkipReason::MalformedDocument);
    }
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return fetcher.fetch_document(uri).await.map_err(|err| {
            debug!(%uri, %err, "metadata document fetch failed");
            match err {
                crate::errors::AftershowError::Parse(_) => SkipReason::MalformedDocument,
                _ => SkipReason::FetchFailed,
            }
        });
    }
    Err(SkipReason::UnsupportedUriScheme)
}
