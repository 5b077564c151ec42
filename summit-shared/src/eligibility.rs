/// Hotel access eligibility
///
/// Every hotel read is gated by the same chain, walked in a fixed order:
///
/// 1. the user has an enrollment, otherwise the hotel data does not exist for
///    them (`EnrollmentNotFound`);
/// 2. the enrollment holds a ticket (`TicketNotFound`);
/// 3. the ticket has a payment row (`TicketNotPaid`);
/// 4. the ticket type is not remote (`RemoteTicket`);
/// 5. the ticket type includes hotel accommodation (`HotelNotIncluded`).
///
/// Steps 1–2 surface as 404, steps 3–5 as 402 with the matching message. The
/// order matters: a missing payment is reported before the remote/hotel flags
/// even when several conditions fail at once.
///
/// # Example
///
/// ```no_run
/// use summit_shared::eligibility::check_hotel_access;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// check_hotel_access(&pool, user_id).await?;
/// // user may see hotels
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::enrollment::Enrollment;
use crate::models::payment::Payment;
use crate::models::ticket::{Ticket, TicketWithType};

/// Reasons a user is denied access to hotel data
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    /// User has no enrollment
    #[error("Enrollment not found")]
    EnrollmentNotFound,

    /// Enrollment has no ticket
    #[error("Ticket not found")]
    TicketNotFound,

    /// Ticket has no payment
    #[error("Ticket not paid")]
    TicketNotPaid,

    /// Ticket type is remote
    #[error("The ticket is remote")]
    RemoteTicket,

    /// Ticket type does not include hotel accommodation
    #[error("Hotel not included")]
    HotelNotIncluded,

    /// Database error while walking the chain
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Evaluates the payment and ticket-type rules for an already-fetched ticket
///
/// Split out from [`check_hotel_access`] so the rule order is testable without
/// a database.
pub fn evaluate(ticket: &TicketWithType, payment: Option<&Payment>) -> Result<(), EligibilityError> {
    if payment.is_none() {
        return Err(EligibilityError::TicketNotPaid);
    }

    if ticket.is_remote {
        return Err(EligibilityError::RemoteTicket);
    }

    if !ticket.includes_hotel {
        return Err(EligibilityError::HotelNotIncluded);
    }

    Ok(())
}

/// Walks the enrollment → ticket → payment → ticket-type chain for a user
///
/// # Errors
///
/// Returns the first failing [`EligibilityError`] in chain order, or
/// `EligibilityError::Database` if a query fails.
pub async fn check_hotel_access(pool: &PgPool, user_id: Uuid) -> Result<(), EligibilityError> {
    let enrollment = Enrollment::find_by_user_id(pool, user_id)
        .await?
        .ok_or(EligibilityError::EnrollmentNotFound)?;

    let ticket = Ticket::find_by_enrollment_id(pool, enrollment.id)
        .await?
        .ok_or(EligibilityError::TicketNotFound)?;

    let payment = Payment::find_by_ticket_id(pool, ticket.id).await?;

    evaluate(&ticket, payment.as_ref())
}
