//! # Low-level SQLite database methods
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that
//! accept a `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or
//! create an atomic transaction as the need arises and call through to the functions without any
//! other changes. [`super::SqliteDatabase`] composes them into the transactional operations the
//! engine traits require.

pub mod donations;
pub mod volunteers;
