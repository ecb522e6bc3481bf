#![allow(dead_code)]

pub mod fixtures;
pub mod mock_ledger;
pub mod programs;

pub use fixtures::*;
pub use mock_ledger::*;
pub use programs::*;
