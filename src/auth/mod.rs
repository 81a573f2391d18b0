//! Mock authentication store
//!
//! Credentials persist as plaintext JSON in a single well-known file. This
//! is a simulation only - explicitly insecure and out of scope for
//! hardening. A real deployment would authenticate against a backend.

mod store;

pub use store::{AuthError, AuthOutcome, AuthStore};
