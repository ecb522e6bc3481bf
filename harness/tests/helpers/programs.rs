//! In-memory stand-ins for the programs the scenarios call.
//!
//! Each supported instruction writes the account state the deployed program
//! would leave behind, so the harness verifiers see realistic records.

use std::collections::HashMap;

use solana_program_pack::Pack;
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use wpokt_bridge_harness::AccountData;
use wpokt_bridge_sdk::instructions::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use wpokt_bridge_sdk::{
    unpack_token_record, AccountLayout, AuthorizationState, BridgeInstruction, BridgeState,
    ClaimedMarker, DailyTokenClaims, MintAccount, NonceEntry, TokenAccount, TokenAccountState,
    TokenAddedMarker, TokenListEntry, WpoktInstruction, WpoktState,
};

type Accounts = HashMap<Pubkey, AccountData>;

/// Deviation injected into the simulated programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    None,
    /// WPOKT mint credits this many tokens less than requested.
    MintShortBy(u64),
}

#[derive(Clone, Debug)]
pub struct SimulatedPrograms {
    pub bridge: Pubkey,
    pub wpokt: Pubkey,
    pub fault: Fault,
}

impl SimulatedPrograms {
    pub fn new(bridge: Pubkey, wpokt: Pubkey) -> Self {
        Self {
            bridge,
            wpokt,
            fault: Fault::None,
        }
    }

    /// Applies every instruction of `tx`, all or nothing.
    pub fn execute(&self, tx: &Transaction, accounts: &mut Accounts) -> Result<(), String> {
        let mut staged = accounts.clone();
        let keys = &tx.message.account_keys;
        for ix in &tx.message.instructions {
            let program = keys[usize::from(ix.program_id_index)];
            let metas: Vec<Pubkey> = ix.accounts.iter().map(|i| keys[usize::from(*i)]).collect();
            if program == SYSTEM_PROGRAM_ID {
                system(&ix.data, &metas, &mut staged)?;
            } else if program == TOKEN_PROGRAM_ID {
                token(&ix.data, &metas, &mut staged)?;
            } else if program == self.wpokt {
                self.wpokt(&ix.data, &metas, &mut staged)?;
            } else if program == self.bridge {
                self.bridge(&ix.data, &metas, &mut staged)?;
            } else {
                return Err(format!("unknown program {program}"));
            }
        }
        *accounts = staged;
        Ok(())
    }

    fn wpokt(&self, data: &[u8], metas: &[Pubkey], accounts: &mut Accounts) -> Result<(), String> {
        let ix = WpoktInstruction::decode(data).map_err(|e| e.to_string())?;
        match ix {
            WpoktInstruction::Construct { initial_minter } => {
                let (mint, wpokt) = (metas[1], metas[2]);
                let state = WpoktState {
                    is_initialized: true,
                    minter: initial_minter,
                    mint,
                    ..WpoktState::default()
                };
                write_record(accounts, wpokt, self.wpokt, &state);
                update_packed(accounts, mint, |m: &mut MintAccount| {
                    m.mint_authority = Some(wpokt).into();
                    m.is_initialized = true;
                })
            }
            WpoktInstruction::Mint { to, value } => {
                let credited = match self.fault {
                    Fault::MintShortBy(short) => value - short,
                    Fault::None => value,
                };
                update_packed(accounts, metas[2], |m: &mut MintAccount| m.supply += credited)?;
                update_packed(accounts, to, |a: &mut TokenAccount| a.amount += credited)
            }
            WpoktInstruction::ChangeMinter { new_minter } => {
                let (wpokt, mint) = (metas[1], metas[2]);
                update_record(accounts, wpokt, |s: &mut WpoktState| s.minter = new_minter)?;
                update_packed(accounts, mint, |m: &mut MintAccount| {
                    m.mint_authority = Some(new_minter).into();
                })
            }
            WpoktInstruction::InitializeNonceAccount { owner } => {
                write_record(accounts, metas[2], self.wpokt, &NonceEntry { owner, nonce: 0 });
                Ok(())
            }
            WpoktInstruction::Permit { value, .. } => {
                let (nonce_account, source, delegate) = (metas[2], metas[3], metas[4]);
                update_record(accounts, nonce_account, |e: &mut NonceEntry| e.nonce += 1)?;
                update_packed(accounts, source, |a: &mut TokenAccount| {
                    a.delegate = Some(delegate).into();
                    a.delegated_amount = value;
                })
            }
            WpoktInstruction::InitializeAuthorizationState { from, nonce } => {
                let state = AuthorizationState {
                    from,
                    nonce,
                    authorization: false,
                };
                write_record(accounts, metas[2], self.wpokt, &state);
                Ok(())
            }
            WpoktInstruction::TransferWithAuthorization { value, .. } => {
                let (authorization, source, destination) = (metas[0], metas[2], metas[4]);
                update_record(accounts, authorization, |s: &mut AuthorizationState| {
                    s.authorization = true;
                })?;
                move_tokens(accounts, source, destination, value)
            }
        }
    }

    fn bridge(&self, data: &[u8], metas: &[Pubkey], accounts: &mut Accounts) -> Result<(), String> {
        let ix = BridgeInstruction::decode(data).map_err(|e| e.to_string())?;
        match ix {
            BridgeInstruction::Construct {
                wpokt_mint,
                verify_address,
                chain_id,
                stable_fee,
            } => {
                let (owner, bridge, token_added, token_list, bridge_token) =
                    (metas[0], metas[1], metas[2], metas[3], metas[6]);
                let state = BridgeState {
                    is_initialized: true,
                    owner,
                    verify_address,
                    current_index: 1,
                    chain_id,
                    stable_fee,
                    ..BridgeState::default()
                };
                write_record(accounts, bridge, self.bridge, &state);
                let entry = TokenListEntry {
                    is_initialized: true,
                    token_address: wpokt_mint,
                    exists: true,
                    ..TokenListEntry::default()
                };
                write_record(accounts, token_list, self.bridge, &entry);
                write_record(
                    accounts,
                    token_added,
                    self.bridge,
                    &TokenAddedMarker { token_added: true },
                );
                let vault = TokenAccount {
                    mint: wpokt_mint,
                    owner: bridge,
                    state: TokenAccountState::Initialized,
                    ..TokenAccount::default()
                };
                write_packed(accounts, bridge_token, vault);
                Ok(())
            }
            BridgeInstruction::TransferRequest { amount, .. } => {
                let (bridge, source, bridge_token) = (metas[0], metas[3], metas[5]);
                update_record(accounts, bridge, |s: &mut BridgeState| s.current_index += 1)?;
                move_tokens(accounts, source, bridge_token, amount)
            }
            BridgeInstruction::CreateDailyTokenClaims { .. } => {
                write_record(accounts, metas[1], self.bridge, &DailyTokenClaims::default());
                Ok(())
            }
            BridgeInstruction::CreateClaimedMarker { .. } => {
                write_record(accounts, metas[1], self.bridge, &ClaimedMarker::default());
                Ok(())
            }
            BridgeInstruction::TransferReceipt { amount, .. } => {
                let (claimed, daily, source, destination) = (metas[2], metas[4], metas[6], metas[7]);
                update_record(accounts, claimed, |m: &mut ClaimedMarker| m.claimed = true)?;
                update_record(accounts, daily, |c: &mut DailyTokenClaims| {
                    c.daily_token_claims += amount;
                })?;
                move_tokens(accounts, source, destination, amount)
            }
            other => Err(format!("unsupported bridge instruction {other:?}")),
        }
    }
}

fn system(data: &[u8], metas: &[Pubkey], accounts: &mut Accounts) -> Result<(), String> {
    if data.len() != 52 || data[..4] != [0, 0, 0, 0] {
        return Err("unsupported system instruction".to_string());
    }
    let lamports = u64::from_le_bytes(data[4..12].try_into().expect("lamports"));
    let space = u64::from_le_bytes(data[12..20].try_into().expect("space"));
    let owner = Pubkey::try_from(&data[20..52]).expect("owner");
    let address = metas[1];
    if accounts.contains_key(&address) {
        return Err(format!("account {address} already in use"));
    }
    accounts.insert(
        address,
        AccountData {
            lamports,
            owner,
            data: vec![0u8; usize::try_from(space).expect("space")],
            executable: false,
        },
    );
    Ok(())
}

fn token(data: &[u8], metas: &[Pubkey], accounts: &mut Accounts) -> Result<(), String> {
    if data != [1] {
        return Err("unsupported token instruction".to_string());
    }
    let (mint, owner) = (metas[1], metas[2]);
    update_packed(accounts, metas[0], |a: &mut TokenAccount| {
        a.mint = mint;
        a.owner = owner;
        a.state = TokenAccountState::Initialized;
    })
}

fn move_tokens(
    accounts: &mut Accounts,
    source: Pubkey,
    destination: Pubkey,
    amount: u64,
) -> Result<(), String> {
    let mut result = Ok(());
    update_packed(accounts, source, |a: &mut TokenAccount| {
        match a.amount.checked_sub(amount) {
            Some(left) => a.amount = left,
            None => result = Err("insufficient funds".to_string()),
        }
    })?;
    result?;
    update_packed(accounts, destination, |a: &mut TokenAccount| a.amount += amount)
}

fn write_record<T: AccountLayout>(accounts: &mut Accounts, address: Pubkey, owner: Pubkey, record: &T) {
    accounts.insert(
        address,
        AccountData {
            lamports: 1_000_000,
            owner,
            data: record.pack().expect("pack"),
            executable: false,
        },
    );
}

fn update_record<T: AccountLayout>(
    accounts: &mut Accounts,
    address: Pubkey,
    update: impl FnOnce(&mut T),
) -> Result<(), String> {
    let account = accounts
        .get_mut(&address)
        .ok_or_else(|| format!("account {address} not found"))?;
    let mut record = T::unpack(&account.data).map_err(|e| e.to_string())?;
    update(&mut record);
    account.data = record.pack().map_err(|e| e.to_string())?;
    Ok(())
}

fn write_packed<T: Pack>(accounts: &mut Accounts, address: Pubkey, record: T) {
    let mut data = vec![0u8; T::LEN];
    T::pack(record, &mut data).expect("pack");
    accounts.insert(
        address,
        AccountData {
            lamports: 1_000_000,
            owner: TOKEN_PROGRAM_ID,
            data,
            executable: false,
        },
    );
}

fn update_packed<T: Pack>(
    accounts: &mut Accounts,
    address: Pubkey,
    update: impl FnOnce(&mut T),
) -> Result<(), String> {
    let account = accounts
        .get_mut(&address)
        .ok_or_else(|| format!("account {address} not found"))?;
    if account.owner != TOKEN_PROGRAM_ID {
        return Err(format!("account {address} is not a token account"));
    }
    let mut record: T = unpack_token_record(&account.data).map_err(|e| e.to_string())?;
    update(&mut record);
    T::pack(record, &mut account.data).map_err(|e| e.to_string())
}
