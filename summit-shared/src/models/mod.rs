/// Persisted entities
///
/// One module per table. Each entity is a `sqlx::FromRow` struct with
/// associated async functions for the queries the API needs; inserts use
/// `RETURNING` so the caller gets the stored row back, defaults included.
///
/// The eligibility chain runs through four of them: `enrollment` (1:1 with
/// users) → `ticket` (1:1 with enrollments, references `ticket_type`) →
/// `payment` (1:1 with tickets). `hotel` and `room` are the gated data,
/// `session` backs bearer tokens, `user` owns the account.

pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod room;
pub mod session;
pub mod ticket;
pub mod ticket_type;
pub mod user;
