//! Harness configuration.
//!
//! Provides configuration options for the harness. Values come from a TOML
//! file, or from the Solana CLI config overlaid with environment variables,
//! falling back to local-validator defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_cli_config::CONFIG_FILE;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

/// Default RPC endpoint of a local validator.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

/// Default Solana CLI keypair location.
pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

/// Default directory holding `<lib>-keypair.json` files of built programs.
pub const DEFAULT_PROGRAM_DIR: &str = "target/deploy";

/// Commitment level a transaction must reach to count as confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Processed by the connected node.
    Processed,
    /// Voted on by a supermajority.
    #[default]
    Confirmed,
    /// Rooted.
    Finalized,
}

impl Commitment {
    /// Returns the JSON-RPC name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    /// Returns true if `self` is at least as strong as `required`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }

    /// Returns the RPC client setting for the level.
    #[must_use]
    pub fn config(self) -> CommitmentConfig {
        match self {
            Self::Processed => CommitmentConfig::processed(),
            Self::Confirmed => CommitmentConfig::confirmed(),
            Self::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(ConfigError::InvalidCommitment(other.to_string())),
        }
    }
}

/// Configuration for the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,

    /// Payer keypair file (Solana CLI JSON format).
    pub keypair_path: String,

    /// Bridge program id (base58).
    pub bridge_program_id: Option<String>,

    /// WPOKT program id (base58).
    pub wpokt_program_id: Option<String>,

    /// Directory searched for program keypairs when an id is not set.
    pub program_dir: String,

    /// Commitment required before a transaction counts as confirmed.
    pub commitment: Commitment,

    /// Confirmation timeout in milliseconds.
    pub confirmation_timeout_ms: u64,

    /// Signature status poll interval in milliseconds.
    pub poll_interval_ms: u64,

    /// HTTP request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Payer balance below which an airdrop is requested.
    pub min_payer_balance: u64,

    /// Lamports requested per airdrop.
    pub airdrop_lamports: u64,

    /// Chain id the bridge is constructed with.
    pub chain_id: u64,

    /// Stable fee the bridge is constructed with.
    pub stable_fee: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            keypair_path: DEFAULT_KEYPAIR_PATH.to_string(),
            bridge_program_id: None,
            wpokt_program_id: None,
            program_dir: DEFAULT_PROGRAM_DIR.to_string(),
            commitment: Commitment::Confirmed,
            confirmation_timeout_ms: 60_000,
            poll_interval_ms: 500,
            request_timeout_ms: 30_000,
            min_payer_balance: 1_000_000_000,
            airdrop_lamports: 2_000_000_000,
            chain_id: 1,
            stable_fee: 0,
        }
    }
}

impl HarnessConfig {
    /// Creates a new configuration with the given RPC endpoint.
    #[must_use]
    pub fn with_rpc_url(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Sets the payer keypair path.
    #[must_use]
    pub fn with_keypair_path(mut self, path: impl Into<String>) -> Self {
        self.keypair_path = path.into();
        self
    }

    /// Sets both program ids.
    #[must_use]
    pub fn with_program_ids(mut self, bridge: &Pubkey, wpokt: &Pubkey) -> Self {
        self.bridge_program_id = Some(bridge.to_string());
        self.wpokt_program_id = Some(wpokt.to_string());
        self
    }

    /// Sets the required commitment.
    #[must_use]
    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// Sets the confirmation timeout and poll interval.
    #[must_use]
    pub fn with_confirmation(mut self, timeout_ms: u64, poll_interval_ms: u64) -> Self {
        self.confirmation_timeout_ms = timeout_ms;
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Sets the airdrop threshold and amount.
    #[must_use]
    pub fn with_airdrop(mut self, min_payer_balance: u64, airdrop_lamports: u64) -> Self {
        self.min_payer_balance = min_payer_balance;
        self.airdrop_lamports = airdrop_lamports;
        self
    }

    /// Sets the bridge chain id and stable fee.
    #[must_use]
    pub fn with_bridge_params(mut self, chain_id: u64, stable_fee: u64) -> Self {
        self.chain_id = chain_id;
        self.stable_fee = stable_fee;
        self
    }

    /// Sets the directory searched for program keypairs.
    #[must_use]
    pub fn with_program_dir(mut self, dir: impl Into<String>) -> Self {
        self.program_dir = dir.into();
        self
    }

    /// Applies the endpoint, keypair and commitment of a Solana CLI config.
    ///
    /// Empty fields and unknown commitment levels keep the current values.
    #[must_use]
    pub fn with_cli_config(mut self, cli: &solana_cli_config::Config) -> Self {
        if !cli.json_rpc_url.is_empty() {
            self.rpc_url = cli.json_rpc_url.clone();
        }
        if !cli.keypair_path.is_empty() {
            self.keypair_path = cli.keypair_path.clone();
        }
        match cli.commitment.parse() {
            Ok(commitment) => self.commitment = commitment,
            Err(_) => debug!("cli commitment {:?} ignored", cli.commitment),
        }
        self
    }

    /// Loads the Solana CLI config at `path` and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn with_cli_config_file(self, path: &str) -> Result<Self, ConfigError> {
        let cli = solana_cli_config::Config::load(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
        Ok(self.with_cli_config(&cli))
    }

    /// Builds a configuration from the Solana CLI config and environment
    /// variables.
    ///
    /// The CLI config is read from `SOLANA_CLI_CONFIG` or the CLI's default
    /// location when present. Environment variables override it. Unset
    /// variables keep their defaults. Variables that fail to parse are logged
    /// and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let cli_path = std::env::var("SOLANA_CLI_CONFIG")
            .ok()
            .or_else(|| CONFIG_FILE.as_deref().map(str::to_string));
        if let Some(path) = cli_path.filter(|p| Path::new(p).exists()) {
            config = match config.clone().with_cli_config_file(&path) {
                Ok(loaded) => loaded,
                Err(e) => {
                    warn!("ignoring solana cli config: {}", e);
                    config
                }
            };
        }

        if let Ok(url) = std::env::var("SOLANA_RPC_URL") {
            config.rpc_url = url;
        }
        if let Ok(path) = std::env::var("SOLANA_KEYPAIR") {
            config.keypair_path = path;
        }
        if let Ok(id) = std::env::var("BRIDGE_PROGRAM_ID") {
            config.bridge_program_id = Some(id);
        }
        if let Ok(id) = std::env::var("WPOKT_PROGRAM_ID") {
            config.wpokt_program_id = Some(id);
        }
        if let Ok(dir) = std::env::var("PROGRAM_DIR") {
            config.program_dir = dir;
        }
        if let Ok(level) = std::env::var("COMMITMENT") {
            match level.parse() {
                Ok(commitment) => config.commitment = commitment,
                Err(_) => warn!("COMMITMENT={} is not a commitment level, using default", level),
            }
        }

        env_u64("CONFIRMATION_TIMEOUT_MS", &mut config.confirmation_timeout_ms);
        env_u64("POLL_INTERVAL_MS", &mut config.poll_interval_ms);
        env_u64("REQUEST_TIMEOUT_MS", &mut config.request_timeout_ms);
        env_u64("MIN_PAYER_BALANCE", &mut config.min_payer_balance);
        env_u64("AIRDROP_LAMPORTS", &mut config.airdrop_lamports);
        env_u64("BRIDGE_CHAIN_ID", &mut config.chain_id);
        env_u64("BRIDGE_STABLE_FEE", &mut config.stable_fee);

        config
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl(self.rpc_url.clone()));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        if self.confirmation_timeout_ms < self.poll_interval_ms {
            return Err(ConfigError::InvalidConfirmationTimeout);
        }

        // outbound transfers target chain_id + 1
        if self.chain_id == u64::MAX {
            return Err(ConfigError::InvalidChainId(self.chain_id));
        }

        if let Some(id) = &self.bridge_program_id {
            parse_program_id(id)?;
        }
        if let Some(id) = &self.wpokt_program_id {
            parse_program_id(id)?;
        }

        Ok(())
    }

    /// Returns the bridge program id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is missing or invalid.
    pub fn bridge_program_id(&self) -> Result<Pubkey, ConfigError> {
        self.bridge_program_id
            .as_deref()
            .ok_or(ConfigError::MissingProgramId("bridge_program_id"))
            .and_then(parse_program_id)
    }

    /// Returns the WPOKT program id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is missing or invalid.
    pub fn wpokt_program_id(&self) -> Result<Pubkey, ConfigError> {
        self.wpokt_program_id
            .as_deref()
            .ok_or(ConfigError::MissingProgramId("wpokt_program_id"))
            .and_then(parse_program_id)
    }

    /// Returns the keypair path with a leading `~` expanded.
    #[must_use]
    pub fn resolved_keypair_path(&self) -> PathBuf {
        expand_home(&self.keypair_path)
    }

    /// Returns the program keypair directory with a leading `~` expanded.
    #[must_use]
    pub fn resolved_program_dir(&self) -> PathBuf {
        expand_home(&self.program_dir)
    }
}

/// Expands `~` and `~/...` against `HOME`.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => None,
        Some(rest) if rest.starts_with('/') => Some(rest.trim_start_matches('/')),
        _ => return PathBuf::from(path),
    };
    match std::env::var("HOME") {
        Ok(home) => match rest {
            Some(rest) => Path::new(&home).join(rest),
            None => PathBuf::from(home),
        },
        Err(_) => {
            warn!("HOME is not set, using {} as given", path);
            PathBuf::from(path)
        }
    }
}

fn env_u64(var: &str, target: &mut u64) {
    if let Ok(raw) = std::env::var(var) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!("{}={} is not a number, using default {}", var, raw, target),
        }
    }
}

/// Parses a base58 program id.
///
/// # Errors
///
/// Returns an error if the text is not a 32-byte base58 key.
pub fn parse_program_id(s: &str) -> Result<Pubkey, ConfigError> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|_| ConfigError::InvalidProgramId(s.to_string()))?;

    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| ConfigError::InvalidProgramId(s.to_string()))?;
    Ok(Pubkey::new_from_array(arr))
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// RPC URL without an HTTP scheme.
    #[error("invalid rpc url: {0}")]
    InvalidRpcUrl(String),

    /// Invalid poll interval.
    #[error("poll_interval_ms must be > 0")]
    InvalidPollInterval,

    /// Timeout shorter than one poll.
    #[error("confirmation_timeout_ms must be >= poll_interval_ms")]
    InvalidConfirmationTimeout,

    /// Chain id with no room for the remote chain id.
    #[error("invalid chain id: {0}")]
    InvalidChainId(u64),

    /// Unknown commitment level.
    #[error("invalid commitment: {0}")]
    InvalidCommitment(String),

    /// Invalid program id.
    #[error("invalid program id: {0}")]
    InvalidProgramId(String),

    /// Program id needed but not configured.
    #[error("{0} is not configured")]
    MissingProgramId(&'static str),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),

    /// Config file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}
