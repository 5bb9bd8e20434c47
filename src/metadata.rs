//! Off-chain metadata documents.
//!
//! The same document shape is produced for freshly claimed tickets (served
//! by the surrounding service at the metadata URI, and consumed by ledger
//! indexers) and parsed back when reconstructing a wallet's collection.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ASSET_SYMBOL, COLLECTIBLE_TYPE, EMBEDDED_JSON_PREFIX, MAX_NAME_LENGTH, NAME_PREFIX,
};
use crate::errors::Result;
use crate::state::EventTicket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// JSON metadata document referenced by a mint's on-chain URI. Parsing is
/// lenient: foreign documents routinely omit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl MetadataDocument {
    /// The canonical document for a ticket: display name, asset family
    /// symbol, and the six fixed attributes.
    pub fn for_ticket(ticket: &EventTicket) -> Self {
        let attr = |trait_type: &str, value: &str| Attribute {
            trait_type: trait_type.to_string(),
            value: value.to_string(),
        };
        Self {
            name: display_name(&ticket.event_name),
            symbol: Some(ASSET_SYMBOL.to_string()),
            description: Some(format!(
                "Verifiable proof that you attended {} on {} at {}, {}.",
                ticket.event_name, ticket.date, ticket.venue, ticket.city
            )),
            attributes: vec![
                attr("Artist", &ticket.artist),
                attr("Venue", &ticket.venue),
                attr("City", &ticket.city),
                attr("Date", &ticket.date),
                attr("Ticket ID", &ticket.ticket_id),
                attr("Type", COLLECTIBLE_TYPE),
            ],
        }
    }

    pub fn attribute(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| a.value.as_str())
    }
}

/// Full display name of a collectible, e.g. `Aftershow: Charli XCX: BRAT Tour`.
pub fn display_name(event_name: &str) -> String {
    format!("{NAME_PREFIX}{event_name}")
}

/// Display name truncated to the ledger's 32-byte metadata name field,
/// always on a char boundary so multi-byte names are never split.
pub fn on_chain_name(event_name: &str) -> String {
    truncate_at_boundary(&display_name(event_name), MAX_NAME_LENGTH).to_string()
}

/// Display name with the fixed prefix stripped, used when reconstructing
/// the event name from on-chain metadata.
pub fn strip_display_prefix(name: &str) -> &str {
    name.strip_prefix(NAME_PREFIX).unwrap_or(name)
}

/// The network-addressable metadata URI served by the surrounding service.
pub fn metadata_uri(base_url: &str, ticket_id: &str) -> String {
    format!("{}/api/metadata/{}", base_url.trim_end_matches('/'), ticket_id)
}

/// Encodes a document as a self-contained data URI that resolvers can
/// decode without a network round trip.
pub fn embedded_uri(document: &MetadataDocument) -> Result<String> {
    let bytes = serde_json::to_vec(document)?;
    Ok(format!("{EMBEDDED_JSON_PREFIX}{}", BASE64.encode(bytes)))
}

/// On-chain string fields are NUL-padded to their fixed length.
pub fn trim_padding(s: &str) -> &str {
    s.trim_matches(char::from(0)).trim()
}

pub fn truncate_at_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> EventTicket {
        EventTicket {
            ticket_id: "KYD-2026-003".to_string(),
            event_name: "Dillon Francis: IDGAFOS Night".to_string(),
            artist: "Dillon Francis".to_string(),
            venue: "Brooklyn Mirage".to_string(),
            city: "New York".to_string(),
            date: "2026-02-05".to_string(),
            seat: Some("VIP".to_string()),
            verified: true,
            claimed: false,
        }
    }

    #[test]
    fn document_carries_all_six_attributes() {
        let doc = MetadataDocument::for_ticket(&ticket());
        assert_eq!(doc.name, "Aftershow: Dillon Francis: IDGAFOS Night");
        assert_eq!(doc.symbol.as_deref(), Some("AFTER"));
        assert_eq!(doc.attribute("Artist"), Some("Dillon Francis"));
        assert_eq!(doc.attribute("Venue"), Some("Brooklyn Mirage"));
        assert_eq!(doc.attribute("City"), Some("New York"));
        assert_eq!(doc.attribute("Date"), Some("2026-02-05"));
        assert_eq!(doc.attribute("Ticket ID"), Some("KYD-2026-003"));
        assert_eq!(doc.attribute("Type"), Some("Aftershow Collectible"));
    }

    #[test]
    fn on_chain_name_respects_field_limit() {
        let name = on_chain_name("Dillon Francis: IDGAFOS Night Extended Edition");
        assert!(name.len() <= MAX_NAME_LENGTH);
        assert!(name.starts_with("Aftershow: "));
    }

    #[test]
    fn truncation_never_splits_a_multibyte_char() {
        // 11-byte prefix plus two-byte chars lands the 32-byte cut mid-char.
        let name = on_chain_name("ééééééééééééééééééé");
        assert!(name.len() <= MAX_NAME_LENGTH);
        assert!(name.is_char_boundary(name.len()));
        assert!(std::str::from_utf8(name.as_bytes()).is_ok());
    }

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(on_chain_name("BRAT"), "Aftershow: BRAT");
    }

    #[test]
    fn prefix_strip_recovers_event_name() {
        assert_eq!(strip_display_prefix("Aftershow: BRAT Tour"), "BRAT Tour");
        assert_eq!(strip_display_prefix("Foreign Name"), "Foreign Name");
    }

    #[test]
    fn embedded_uri_round_trips() {
        let doc = MetadataDocument::for_ticket(&ticket());
        let uri = embedded_uri(&doc).unwrap();
        let encoded = uri.strip_prefix(EMBEDDED_JSON_PREFIX).unwrap();
        let decoded: MetadataDocument =
            serde_json::from_slice(&BASE64.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded.name, doc.name);
        assert_eq!(decoded.attributes, doc.attributes);
    }

    #[test]
    fn metadata_uri_normalizes_trailing_slash() {
        assert_eq!(
            metadata_uri("https://aftershow.example/", "KYD-2026-001"),
            "https://aftershow.example/api/metadata/KYD-2026-001"
        );
    }

    #[test]
    fn padding_trim_removes_nuls_and_whitespace() {
        assert_eq!(trim_padding("AFTER\0\0\0\0\0"), "AFTER");
        assert_eq!(trim_padding(" OTHER \0"), "OTHER");
    }
}
