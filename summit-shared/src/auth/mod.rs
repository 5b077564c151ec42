/// Authentication building blocks
///
/// `jwt` signs and validates access tokens, `password` owns Argon2id hashing,
/// and `middleware` ties both to the sessions table for the gated routes.

pub mod jwt;
pub mod middleware;
pub mod password;
