//! WPOKT bridge harness - drives the bridge and WPOKT programs on a ledger.
//!
//! This crate is the I/O half of the client. It submits the instructions
//! built by `wpokt-bridge-sdk`, waits for confirmation and checks the
//! resulting account state.
//!
//! # Components
//!
//! - [`config`]: Harness configuration
//! - [`ledger`]: Ledger capability used by everything else
//! - [`rpc`]: RPC ledger client
//! - [`programs`]: Program id discovery and deployment checks
//! - [`submitter`]: Transaction signing and confirmation
//! - [`session`]: Ledger, payer and configuration passed to every operation
//! - [`operations`]: One function per program instruction
//! - [`verify`]: Fetch-and-check helpers
//! - [`scenario`]: End-to-end flows

pub mod config;
pub mod error;
pub mod ledger;
pub mod operations;
pub mod programs;
pub mod rpc;
pub mod scenario;
pub mod session;
pub mod submitter;
pub mod verify;

pub use config::{Commitment, ConfigError, HarnessConfig};
pub use error::HarnessError;
pub use ledger::{AccountData, Ledger, SignatureStatus};
pub use rpc::RpcLedger;
pub use session::{load_keypair, Session};
pub use submitter::{Confirmed, SubmitterConfig, TransactionSubmitter};
