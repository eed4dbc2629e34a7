//! Settings read from the environment.

use alloy_primitives::Address;
use anyhow::{Context, Result, anyhow};
use lpdapp_data::FileDiscoveryLog;
use lpdapp_data::discovery::DEFAULT_LOG_KEY;
use lpdapp_execution::config::ProvisionConfig;
use lpdapp_protocols::addresses::ContractAddresses;
use lpdapp_protocols::config::ClientConfig;
use std::env;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_DISCOVERY_DIR: &str = ".lpdapp";

/// Everything the CLI reads from `.env` or the process environment.
#[derive(Clone)]
pub struct Settings {
    pub rpc_url: Option<String>,
    private_key: Option<String>,
    pub addresses: ContractAddresses,
    pub discovery_dir: PathBuf,
    pub provision: ProvisionConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut addresses = ContractAddresses::default();
        for (key, slot) in [
            ("FACTORY_ADDRESS", &mut addresses.factory),
            ("POSITION_MANAGER_ADDRESS", &mut addresses.position_manager),
            ("LEDGER_ADDRESS", &mut addresses.ledger),
            ("SALE_ADDRESS", &mut addresses.sale),
            ("TOKEN_ADDRESS", &mut addresses.token),
        ] {
            if let Some(value) = parse_var::<Address>(key, get(key))? {
                *slot = value;
            }
        }

        let mut provision = ProvisionConfig::default();
        if let Some(bps) = parse_var::<u16>("SLIPPAGE_BPS", get("SLIPPAGE_BPS"))? {
            provision.slippage_bps = bps;
        }
        if let Some(secs) = parse_var::<u64>("STAGE_TIMEOUT_SECS", get("STAGE_TIMEOUT_SECS"))? {
            provision.stage_timeout_secs = secs;
        }

        Ok(Self {
            rpc_url: get("RPC_URL"),
            private_key: get("PRIVATE_KEY"),
            addresses,
            discovery_dir: get("DISCOVERY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DISCOVERY_DIR)),
            provision,
        })
    }

    /// Connection settings; fails if the endpoint or key is missing.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let rpc_url = self
            .rpc_url
            .clone()
            .ok_or_else(|| anyhow!("RPC_URL must be set in .env or environment"))?;
        let private_key = self
            .private_key
            .clone()
            .ok_or_else(|| anyhow!("PRIVATE_KEY must be set in .env or environment"))?;
        Ok(ClientConfig::new(rpc_url, private_key).with_addresses(self.addresses))
    }

    #[must_use]
    pub fn discovery_log(&self) -> FileDiscoveryLog {
        FileDiscoveryLog::in_dir(&self.discovery_dir, DEFAULT_LOG_KEY)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("addresses", &self.addresses)
            .field("discovery_dir", &self.discovery_dir)
            .field("provision", &self.provision)
            .finish()
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("{e}"))
                .with_context(|| format!("{key} has an invalid value '{raw}'"))
        })
        .transpose()
}
