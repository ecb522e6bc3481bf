//! Ledger operations.
//!
//! Each operation takes the [`Session`](crate::session::Session) plus plain
//! parameters, derives the PDAs it needs, builds the instruction, submits it
//! as one transaction and returns the confirmed signature.

pub mod accounts;
pub mod bridge;
pub mod wpokt;
