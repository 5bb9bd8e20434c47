use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{AftershowError, Result};
use crate::state::EventTicket;

/// In-memory ticket directory. Stands in for the venue's ticketing backend:
/// the core never creates or deletes tickets, it only looks them up and
/// marks them claimed.
pub struct TicketStore {
    inner: Mutex<Vec<EventTicket>>,
}

impl TicketStore {
    /// Directory seeded with the demo catalog.
    pub fn new() -> Self {
        Self::with_tickets(seed_catalog())
    }

    pub fn with_tickets(tickets: Vec<EventTicket>) -> Self {
        Self {
            inner: Mutex::new(tickets),
        }
    }

    // Every mutation is a single field write, so a panic mid-update cannot
    // leave the catalog half-changed; a poisoned lock is safe to recover.
    fn tickets(&self) -> MutexGuard<'_, Vec<EventTicket>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lookup(&self, ticket_id: &str) -> Option<EventTicket> {
        self.tickets()
            .iter()
            .find(|t| t.ticket_id == ticket_id)
            .cloned()
    }

    pub fn all(&self) -> Vec<EventTicket> {
        self.tickets().clone()
    }

    /// Marks a ticket claimed. A ticket can make this transition exactly
    /// once; a second attempt is a state conflict, not a silent no-op.
    pub fn mark_claimed(&self, ticket_id: &str) -> Result<()> {
        let mut tickets = self.tickets();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.ticket_id == ticket_id)
            .ok_or_else(|| AftershowError::NotFound(format!("ticket {ticket_id}")))?;
        if ticket.claimed {
            return Err(AftershowError::StateConflict(format!(
                "ticket {ticket_id} has already been claimed"
            )));
        }
        ticket.claimed = true;
        Ok(())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ticket(
    ticket_id: &str,
    event_name: &str,
    artist: &str,
    venue: &str,
    city: &str,
    date: &str,
    seat: &str,
) -> EventTicket {
    EventTicket {
        ticket_id: ticket_id.to_string(),
        event_name: event_name.to_string(),
        artist: artist.to_string(),
        venue: venue.to_string(),
        city: city.to_string(),
        date: date.to_string(),
        seat: Some(seat.to_string()),
        verified: true,
        claimed: false,
    }
}

fn seed_catalog() -> Vec<EventTicket> {
    vec![
        ticket(
            "KYD-2026-001",
            "Charli XCX: BRAT Tour",
            "Charli XCX",
            "Le Poisson Rouge",
            "New York",
            "2026-01-15",
            "General Admission",
        ),
        ticket(
            "KYD-2026-002",
            "Travis Scott: Utopia Live",
            "Travis Scott",
            "Le Poisson Rouge",
            "New York",
            "2026-01-28",
            "Floor - Section A",
        ),
        ticket(
            "KYD-2026-003",
            "Dillon Francis: IDGAFOS Night",
            "Dillon Francis",
            "Brooklyn Mirage",
            "New York",
            "2026-02-05",
            "VIP",
        ),
        ticket(
            "KYD-2026-004",
            "Robert Plant: Saving Grace Tour",
            "Robert Plant",
            "Radio City Music Hall",
            "New York",
            "2026-02-10",
            "Orchestra - Row 8",
        ),
        ticket(
            "KYD-2026-005",
            "Charli XCX: BRAT Tour",
            "Charli XCX",
            "The Fonda Theatre",
            "Los Angeles",
            "2026-02-18",
            "General Admission",
        ),
        ticket(
            "KYD-2026-006",
            "Dillon Francis: Spring Residency",
            "Dillon Francis",
            "Exchange LA",
            "Los Angeles",
            "2026-02-22",
            "VIP Table",
        ),
    ]
}
