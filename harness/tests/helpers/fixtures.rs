use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use wpokt_bridge_harness::{HarnessConfig, Session};

use super::mock_ledger::MockLedger;
use super::programs::{Fault, SimulatedPrograms};

pub struct Fixture {
    pub ledger: MockLedger,
    pub session: Session<MockLedger>,
    pub bridge_program_id: Pubkey,
    pub wpokt_program_id: Pubkey,
}

pub fn test_config(bridge: &Pubkey, wpokt: &Pubkey) -> HarnessConfig {
    HarnessConfig::with_rpc_url("http://localhost:8899")
        .with_program_ids(bridge, wpokt)
        .with_confirmation(200, 10)
        .with_bridge_params(1, 10)
}

pub fn create_fixture() -> Fixture {
    let bridge_program_id = Pubkey::new_unique();
    let wpokt_program_id = Pubkey::new_unique();
    let ledger = MockLedger::new();
    let session = Session::new(
        ledger.clone(),
        Keypair::new(),
        test_config(&bridge_program_id, &wpokt_program_id),
    )
    .expect("session");

    Fixture {
        ledger,
        session,
        bridge_program_id,
        wpokt_program_id,
    }
}

pub fn create_fixture_without_programs() -> (MockLedger, Session<MockLedger>) {
    let ledger = MockLedger::new();
    let session = Session::new(
        ledger.clone(),
        Keypair::new(),
        HarnessConfig::with_rpc_url("http://localhost:8899"),
    )
    .expect("session");
    (ledger, session)
}

/// Fixture whose ledger runs the scenario instructions against in-memory
/// programs.
pub async fn create_simulated_fixture(fault: Fault) -> Fixture {
    let fixture = create_fixture();
    let mut programs =
        SimulatedPrograms::new(fixture.bridge_program_id, fixture.wpokt_program_id);
    programs.fault = fault;
    fixture.ledger.simulate(programs).await;
    fixture
}
