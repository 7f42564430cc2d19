use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BOOTSTRAP_STAKE;
use crate::errors::{GaugeError, GaugeResult};
use crate::fees::FeeSchedule;
use crate::types::Address;

/// Gauge configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GaugeConfig {
    /// Identity holding staked and bid tokens
    pub gauge: Address,

    /// Role allowed to change the mint rate, fee tiers and internal identities
    pub admin: Address,

    /// Hook layer allowed to report liquidity events
    pub hook: Address,

    /// Recipient of the developer share
    pub developer: Address,

    /// Emission token contract
    pub emission_token: Address,

    /// Initial emission units minted per second
    pub mint_rate: u64,

    /// Genesis stake pulled from the admin at initialization
    #[serde(default = "default_bootstrap_stake")]
    pub bootstrap_stake: u64,

    /// Identities charged the internal fee tier from the start
    #[serde(default)]
    pub internal_identities: Vec<Address>,

    /// Initial fee schedule
    #[serde(default)]
    pub fees: FeeSchedule,
}

fn default_bootstrap_stake() -> u64 {
    DEFAULT_BOOTSTRAP_STAKE as u64
}

impl GaugeConfig {
    /// Configuration with default rate, fees and bootstrap stake
    pub fn new(gauge: Address, admin: Address, hook: Address, developer: Address, emission_token: Address) -> Self {
        Self {
            gauge,
            admin,
            hook,
            developer,
            emission_token,
            mint_rate: 0,
            bootstrap_stake: default_bootstrap_stake(),
            internal_identities: Vec::new(),
            fees: FeeSchedule::default(),
        }
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> GaugeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| GaugeError::Io(format!("Failed to read config file {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded gauge configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> GaugeResult<Self> {
        let config: GaugeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> GaugeResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> GaugeResult<()> {
        let roles = [
            ("gauge", self.gauge),
            ("admin", self.admin),
            ("hook", self.hook),
            ("developer", self.developer),
            ("emission_token", self.emission_token),
        ];
        for (name, address) in roles {
            if address.is_zero() {
                return Err(GaugeError::ZeroAddress(name));
            }
        }

        if self.bootstrap_stake == 0 {
            return Err(GaugeError::invalid_config("bootstrap_stake must be at least 1"));
        }

        self.fees.validate()?;

        if self.internal_identities.iter().any(Address::is_zero) {
            return Err(GaugeError::ZeroAddress("internal_identities"));
        }

        Ok(())
    }
}
