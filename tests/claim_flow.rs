//! End-to-end claim scenarios over mock ports: build a partially signed
//! mint transaction, confirm the claim, and observe the claim-once rule.

mod common;

use aftershow::errors::AftershowError;
use aftershow::{EventTicket, PartiallySignedTransaction, TicketStore};
use common::{authority_secret, service_with, MockLedger};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;

const TICKET: &str = "KYD-2026-001";

#[tokio::test]
async fn claim_builds_a_dual_signed_transaction_and_claims_once() {
    let (authority_keypair, secret) = authority_secret();
    let service = service_with(MockLedger::default(), Some(secret));
    let wallet = Pubkey::new_unique();

    let claim = service
        .build_claim_transaction(TICKET, &wallet.to_string())
        .await
        .unwrap();

    let decoded = PartiallySignedTransaction::from_base64(&claim.transaction_base64).unwrap();
    let tx = decoded.transaction();

    // The fan's wallet pays fees; its signature slot is still open.
    assert_eq!(tx.message.static_account_keys()[0], wallet);
    assert_eq!(tx.signatures[0], Signature::default());
    assert_eq!(decoded.signature_count(), 2);

    // The embedded signatures are the authority's and the one-time mint's.
    let keys = tx.message.static_account_keys();
    let signed: Vec<&Pubkey> = tx
        .signatures
        .iter()
        .enumerate()
        .filter(|(_, sig)| **sig != Signature::default())
        .map(|(slot, _)| &keys[slot])
        .collect();
    assert!(signed.contains(&&authority_keypair.pubkey()));
    assert!(signed
        .contains(&&claim.mint_address.parse::<Pubkey>().unwrap()));

    // After the wallet signs and broadcasts, the claim is confirmed.
    let claimed = service.confirm_claim(TICKET).unwrap();
    assert!(claimed.claimed);
    assert!(!claimed.artwork_svg.is_empty());

    // A second build attempt for the same ticket is a state conflict.
    let err = service
        .build_claim_transaction(TICKET, &wallet.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::StateConflict(_)));
}

#[tokio::test]
async fn broadcast_submits_the_transaction_bytes_unchanged() {
    let (_, secret) = authority_secret();
    let ledger = MockLedger::default();
    let sent = ledger.sent.clone();
    let service = service_with(ledger, Some(secret));
    let wallet = Pubkey::new_unique();

    let claim = service
        .build_claim_transaction(TICKET, &wallet.to_string())
        .await
        .unwrap();
    let signature = service
        .broadcast_claim(&claim.transaction_base64)
        .await
        .unwrap();
    assert!(!signature.is_empty());

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let original = PartiallySignedTransaction::from_base64(&claim.transaction_base64).unwrap();
    assert_eq!(
        sent[0].message.serialize(),
        original.transaction().message.serialize()
    );
    assert_eq!(sent[0].signatures, original.transaction().signatures);
}

#[tokio::test]
async fn broadcast_rejects_garbled_transport_bytes() {
    let (_, secret) = authority_secret();
    let service = service_with(MockLedger::default(), Some(secret));

    let err = service.broadcast_claim("not base64 at all").await.unwrap_err();
    assert!(matches!(err, AftershowError::Parse(_)));
}

#[tokio::test]
async fn eligibility_is_checked_before_any_network_or_signing_work() {
    let (_, secret) = authority_secret();
    // Blockhash fetch always fails; a claimed ticket must still surface the
    // state conflict, proving the check happens before network work.
    let ledger = MockLedger {
        blockhash_fails: true,
        ..MockLedger::default()
    };
    let service = service_with(ledger, Some(secret));
    service.confirm_claim(TICKET).unwrap();

    let err = service
        .build_claim_transaction(TICKET, &Pubkey::new_unique().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::StateConflict(_)));
}

#[tokio::test]
async fn network_failure_during_build_is_fatal_to_the_call() {
    let (_, secret) = authority_secret();
    let ledger = MockLedger {
        blockhash_fails: true,
        ..MockLedger::default()
    };
    let service = service_with(ledger, Some(secret));

    let err = service
        .build_claim_transaction(TICKET, &Pubkey::new_unique().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::Network(_)));
}

#[tokio::test]
async fn missing_authority_secret_fails_closed() {
    let service = service_with(MockLedger::default(), None);

    let err = service
        .build_claim_transaction(TICKET, &Pubkey::new_unique().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::Config(_)));
}

#[tokio::test]
async fn malformed_wallet_address_is_rejected() {
    let (_, secret) = authority_secret();
    let service = service_with(MockLedger::default(), Some(secret));

    let err = service
        .build_claim_transaction(TICKET, "not-a-wallet")
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::MalformedAddress(_)));
}

#[tokio::test]
async fn unknown_and_unverified_tickets_cannot_be_claimed() {
    let (_, secret) = authority_secret();
    let unverified = EventTicket {
        ticket_id: "KYD-2026-099".to_string(),
        event_name: "Secret Show".to_string(),
        artist: "Nobody".to_string(),
        venue: "Undisclosed".to_string(),
        city: "Nowhere".to_string(),
        date: "2026-03-01".to_string(),
        seat: None,
        verified: false,
        claimed: false,
    };
    let service = service_with(MockLedger::default(), Some(secret))
        .with_ticket_store(TicketStore::with_tickets(vec![unverified]));
    let wallet = Pubkey::new_unique().to_string();

    let err = service
        .build_claim_transaction("KYD-2026-001", &wallet)
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::NotFound(_)));

    let err = service
        .build_claim_transaction("KYD-2026-099", &wallet)
        .await
        .unwrap_err();
    assert!(matches!(err, AftershowError::StateConflict(_)));
}

#[tokio::test]
async fn ticket_metadata_document_matches_the_catalog_entry() {
    let (_, secret) = authority_secret();
    let service = service_with(MockLedger::default(), Some(secret));

    let doc = service.ticket_metadata(TICKET).unwrap();
    assert_eq!(doc.name, "Aftershow: Charli XCX: BRAT Tour");
    assert_eq!(doc.attribute("Ticket ID"), Some(TICKET));
    assert_eq!(doc.attribute("Type"), Some("Aftershow Collectible"));
}
