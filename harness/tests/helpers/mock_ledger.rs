use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use solana_program_pack::Pack;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use tokio::sync::RwLock;
use wpokt_bridge_harness::{AccountData, Commitment, HarnessError, Ledger, SignatureStatus};
use wpokt_bridge_sdk::instructions::TOKEN_PROGRAM_ID;
use wpokt_bridge_sdk::AccountLayout;

use super::programs::SimulatedPrograms;

/// How the mock answers status queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Confirmed,
    Failed(String),
    Pending,
}

#[derive(Clone)]
pub struct MockLedger {
    accounts: Arc<RwLock<HashMap<Pubkey, AccountData>>>,
    sent: Arc<RwLock<Vec<Transaction>>>,
    airdrops: Arc<RwLock<Vec<(Pubkey, u64)>>>,
    outcome: Arc<RwLock<Outcome>>,
    slot: Arc<AtomicU64>,
    programs: Arc<RwLock<Option<SimulatedPrograms>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            sent: Arc::new(RwLock::new(Vec::new())),
            airdrops: Arc::new(RwLock::new(Vec::new())),
            outcome: Arc::new(RwLock::new(Outcome::Confirmed)),
            slot: Arc::new(AtomicU64::new(100)),
            programs: Arc::new(RwLock::new(None)),
        }
    }

    /// Deploys `programs` and applies their effects to every sent transaction.
    pub async fn simulate(&self, programs: SimulatedPrograms) {
        self.put_program(programs.bridge).await;
        self.put_program(programs.wpokt).await;
        *self.programs.write().await = Some(programs);
    }

    pub async fn put_program(&self, address: Pubkey) {
        self.accounts.write().await.insert(
            address,
            AccountData {
                lamports: 1_000_000,
                owner: Pubkey::default(),
                data: Vec::new(),
                executable: true,
            },
        );
    }

    pub async fn put_packed<T: Pack>(&self, address: Pubkey, record: T) {
        let mut data = vec![0u8; T::LEN];
        T::pack(record, &mut data).expect("pack");
        self.put_account(address, TOKEN_PROGRAM_ID, data).await;
    }

    pub async fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.write().await = outcome;
    }

    pub async fn put_account(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.accounts.write().await.insert(
            address,
            AccountData {
                lamports: 1_000_000,
                owner,
                data,
                executable: false,
            },
        );
    }

    pub async fn put_record<T: AccountLayout>(&self, address: Pubkey, owner: Pubkey, record: &T) {
        let data = record.pack().expect("pack");
        self.put_account(address, owner, data).await;
    }

    pub async fn set_balance(&self, address: Pubkey, lamports: u64) {
        self.accounts
            .write()
            .await
            .entry(address)
            .or_insert_with(|| AccountData {
                lamports: 0,
                owner: Pubkey::default(),
                data: Vec::new(),
                executable: false,
            })
            .lamports = lamports;
    }

    pub async fn sent(&self) -> Vec<Transaction> {
        self.sent.read().await.clone()
    }

    pub async fn airdrops(&self) -> Vec<(Pubkey, u64)> {
        self.airdrops.read().await.clone()
    }

    fn next_signature(&self) -> Signature {
        let n = self.slot.fetch_add(1, Ordering::SeqCst);
        let mut bytes = [0u8; 64];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Signature::from(bytes)
    }
}

impl Ledger for MockLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<AccountData>, HarnessError> {
        Ok(self.accounts.read().await.get(address).cloned())
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, HarnessError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(address)
            .map_or(0, |a| a.lamports))
    }

    async fn latest_blockhash(&self) -> Result<Hash, HarnessError> {
        Ok(Hash::default())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, HarnessError> {
        if tx.verify().is_err() {
            return Err(HarnessError::Rpc {
                code: -32003,
                message: "Transaction signature verification failure".to_string(),
            });
        }
        if let Some(programs) = &*self.programs.read().await {
            programs
                .execute(tx, &mut *self.accounts.write().await)
                .map_err(|message| HarnessError::Rpc {
                    code: -32002,
                    message,
                })?;
        }
        self.sent.write().await.push(tx.clone());
        Ok(tx.signatures[0])
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
    ) -> Result<Option<SignatureStatus>, HarnessError> {
        let slot = self.slot.load(Ordering::SeqCst);
        Ok(match &*self.outcome.read().await {
            Outcome::Confirmed => Some(SignatureStatus {
                slot,
                err: None,
                confirmation: Some(Commitment::Finalized),
            }),
            Outcome::Failed(message) => Some(SignatureStatus {
                slot,
                err: Some(message.clone()),
                confirmation: Some(Commitment::Processed),
            }),
            Outcome::Pending => None,
        })
    }

    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> Result<Signature, HarnessError> {
        self.airdrops.write().await.push((*to, lamports));
        let balance = self.get_balance(to).await?;
        self.set_balance(*to, balance + lamports).await;
        Ok(self.next_signature())
    }

    async fn get_slot(&self) -> Result<u64, HarnessError> {
        Ok(self.slot.load(Ordering::SeqCst))
    }

    async fn minimum_balance_for_rent_exemption(&self, space: usize) -> Result<u64, HarnessError> {
        Ok((128 + space as u64) * 6_960)
    }
}
