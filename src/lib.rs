//! WPOKT bridge client.
//!
//! Facade over the workspace crates:
//!
//! - [`sdk`]: PDA derivation, instruction codec, account layouts and state
//!   checks, free of I/O
//! - [`harness`]: ledger client, operations, ledger-backed verification and
//!   end-to-end scenarios

pub use wpokt_bridge_harness as harness;
pub use wpokt_bridge_sdk as sdk;
