/// Database plumbing
///
/// `pool` builds and probes the PostgreSQL connection pool; `migrations`
/// applies the embedded schema. The entity modules live under `models` at the
/// crate root.

pub mod migrations;
pub mod pool;
