//! In-memory collaborators

use std::collections::{HashMap, HashSet};

use gauge_core::{Address, EmissionToken, ExternalCallError, ListingOracle, LiquidityPool, PoolKey};

/// Emission token with switchable mint and transfer failures
#[derive(Debug, Clone)]
pub struct MockToken {
    pub address: Address,
    pub balances: HashMap<Address, u128>,
    pub total_supply: u128,
    pub mint_paused: bool,
    pub transfers_paused: bool,
    /// Mints to these recipients are refused
    pub blocked_recipients: HashSet<Address>,
    pub mints: Vec<(Address, u128)>,
}

impl MockToken {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balances: HashMap::new(),
            total_supply: 0,
            mint_paused: false,
            transfers_paused: false,
            blocked_recipients: HashSet::new(),
            mints: Vec::new(),
        }
    }

    pub fn credit(&mut self, owner: Address, amount: u128) {
        *self.balances.entry(owner).or_insert(0) += amount;
        self.total_supply += amount;
    }

    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn minted_to(&self, to: &Address) -> u128 {
        self.mints.iter().filter(|(dest, _)| dest == to).map(|(_, amount)| amount).sum()
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> Result<(), ExternalCallError> {
        if self.transfers_paused {
            return Err(ExternalCallError::Paused);
        }
        let available = self.balance_of(&from);
        if available < amount {
            return Err(ExternalCallError::InsufficientBalance);
        }
        self.balances.insert(from, available - amount);
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

impl EmissionToken for MockToken {
    fn address(&self) -> Address {
        self.address
    }

    fn transfer_from(
        &mut self,
        _spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), ExternalCallError> {
        self.move_balance(from, to, amount)
    }

    fn transfer(&mut self, sender: Address, to: Address, amount: u128) -> Result<(), ExternalCallError> {
        self.move_balance(sender, to, amount)
    }

    fn mint(&mut self, to: Address, amount: u128) -> Result<(), ExternalCallError> {
        if self.mint_paused {
            return Err(ExternalCallError::Paused);
        }
        if self.blocked_recipients.contains(&to) {
            return Err(ExternalCallError::Rejected(format!("recipient {} blocked", to)));
        }
        self.credit(to, amount);
        self.mints.push((to, amount));
        Ok(())
    }
}

/// Recorded donation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub key: PoolKey,
    pub amount0: u128,
    pub amount1: u128,
    pub data: Vec<u8>,
}

/// Pool manager recording sync/donate/settle calls
#[derive(Debug, Clone)]
pub struct MockPool {
    pub custody: Address,
    pub liquidity: HashMap<PoolKey, u128>,
    pub synced: Vec<Address>,
    pub donations: Vec<Donation>,
    pub settled: Vec<u128>,
    pub fail_donate: bool,
    unsettled: u128,
}

impl MockPool {
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            liquidity: HashMap::new(),
            synced: Vec::new(),
            donations: Vec::new(),
            settled: Vec::new(),
            fail_donate: false,
            unsettled: 0,
        }
    }

    pub fn set_liquidity(&mut self, key: PoolKey, liquidity: u128) {
        self.liquidity.insert(key, liquidity);
    }
}

impl LiquidityPool for MockPool {
    fn custody_address(&self) -> Address {
        self.custody
    }

    fn liquidity(&self, key: &PoolKey) -> u128 {
        self.liquidity.get(key).copied().unwrap_or(0)
    }

    fn sync(&mut self, currency: Address) -> Result<(), ExternalCallError> {
        self.synced.push(currency);
        Ok(())
    }

    fn donate(&mut self, key: &PoolKey, amount0: u128, amount1: u128, data: &[u8]) -> Result<(), ExternalCallError> {
        if self.fail_donate {
            return Err(ExternalCallError::Rejected("donate disabled".to_string()));
        }
        self.donations.push(Donation {
            key: *key,
            amount0,
            amount1,
            data: data.to_vec(),
        });
        self.unsettled += amount0 + amount1;
        Ok(())
    }

    fn settle(&mut self) -> Result<u128, ExternalCallError> {
        let amount = std::mem::take(&mut self.unsettled);
        self.settled.push(amount);
        Ok(amount)
    }
}

/// Listing oracle backed by a set
#[derive(Debug, Clone, Default)]
pub struct MockListing {
    pub listed: HashSet<Address>,
}

impl MockListing {
    pub fn with_tokens(tokens: &[Address]) -> Self {
        Self {
            listed: tokens.iter().copied().collect(),
        }
    }
}

impl ListingOracle for MockListing {
    fn is_token_listed(&self, token: &Address) -> bool {
        self.listed.contains(token)
    }
}
