//! Program discovery.
//!
//! Program ids come from the configuration or from the
//! `<lib>-keypair.json` files the program build writes into the program
//! directory. A scenario refuses to start unless its program account exists
//! on the ledger and is executable.

use std::path::{Path, PathBuf};

use solana_sdk::{pubkey::Pubkey, signature::Signer};
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::ledger::Ledger;
use crate::session::load_keypair;

/// Library name of the bridge program.
pub const BRIDGE_LIB_NAME: &str = "bridge";

/// Library name of the WPOKT program.
pub const WPOKT_LIB_NAME: &str = "wpokt";

/// Returns the keypair file of `lib_name` under `dir`.
#[must_use]
pub fn program_keypair_path(dir: &Path, lib_name: &str) -> PathBuf {
    dir.join(format!("{lib_name}-keypair.json"))
}

/// Reads the program id of `lib_name` from its keypair file.
///
/// # Errors
///
/// Returns [`HarnessError::Keypair`] if the file is missing or malformed.
pub fn program_id_from_keypair(dir: &Path, lib_name: &str) -> Result<Pubkey, HarnessError> {
    Ok(load_keypair(program_keypair_path(dir, lib_name))?.pubkey())
}

fn locate(dir: &Path, lib_name: &str) -> Result<Option<String>, HarnessError> {
    let path = program_keypair_path(dir, lib_name);
    if !path.exists() {
        debug!("no program keypair at {}", path.display());
        return Ok(None);
    }
    let id = program_id_from_keypair(dir, lib_name)?;
    info!("{} program {} from {}", lib_name, id, path.display());
    Ok(Some(id.to_string()))
}

/// Fills unset program ids from keypair files in the program directory.
///
/// Configured ids are kept. An id whose keypair file does not exist stays
/// unset.
///
/// # Errors
///
/// Returns an error if a keypair file exists but cannot be loaded.
pub fn locate_programs(mut config: HarnessConfig) -> Result<HarnessConfig, HarnessError> {
    let dir = config.resolved_program_dir();
    if config.bridge_program_id.is_none() {
        config.bridge_program_id = locate(&dir, BRIDGE_LIB_NAME)?;
    }
    if config.wpokt_program_id.is_none() {
        config.wpokt_program_id = locate(&dir, WPOKT_LIB_NAME)?;
    }
    Ok(config)
}

/// Checks that `program_id` is deployed and executable.
///
/// # Errors
///
/// Returns [`HarnessError::ProgramNotDeployed`] if no account exists and
/// [`HarnessError::ProgramNotExecutable`] if the account holds no program.
pub async fn ensure_deployed<L: Ledger>(
    ledger: &L,
    program_id: &Pubkey,
) -> Result<(), HarnessError> {
    let account = ledger
        .get_account(program_id)
        .await?
        .ok_or(HarnessError::ProgramNotDeployed(*program_id))?;
    if !account.executable {
        return Err(HarnessError::ProgramNotExecutable(*program_id));
    }
    debug!("program {} is deployed", program_id);
    Ok(())
}
