//! In-memory reference ledger.

use std::collections::{BTreeMap, HashMap};

use log::info;
use sha2::{Digest, Sha256};

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, U256};
use crate::traits::TokenLedger;

/// Domain separator for token address derivation.
const TOKEN_ADDRESS_TAG: &[u8] = b"uviswap.token";

/// Metadata of a token deployed on a [`MemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: Amount,
}

impl TokenInfo {
    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display decimals; amounts are always stored raw.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Raw units in existence.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }
}

/// A multi-token ledger held entirely in memory.
///
/// Each deployed token behaves like a plain fungible token: balances,
/// allowances, `transfer` and `transfer_from`.  Every call either applies
/// completely or returns an error with nothing changed.
///
/// # Examples
///
/// ```
/// use uviswap::domain::{Address, Amount};
/// use uviswap::ledger::MemoryLedger;
/// use uviswap::traits::TokenLedger;
///
/// let alice = Address::from_low_u64(1);
/// let bob = Address::from_low_u64(2);
/// let mut ledger = MemoryLedger::new();
/// let usdt = ledger.deploy_token("USDT", "USDT", 18, 1_000, alice).expect("deployed");
///
/// ledger.transfer(usdt, alice, bob, Amount::new(5)).expect("funded");
/// assert_eq!(ledger.balance_of(usdt, bob), Amount::new(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    tokens: BTreeMap<Address, TokenInfo>,
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
    nonce: u64,
}

impl MemoryLedger {
    /// Creates an empty ledger with no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a new token and credits `supply × 10^decimals` raw units to
    /// `owner`.
    ///
    /// Token addresses are derived from a per-ledger nonce, so a fresh
    /// ledger always hands out the same sequence of addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the raw supply exceeds 256 bits.
    pub fn deploy_token(
        &mut self,
        name: &str,
        symbol: &str,
        decimals: u8,
        supply: u128,
        owner: Address,
    ) -> Result<Address, AmmError> {
        let scale = U256::from(10u8)
            .checked_pow(U256::from(decimals))
            .ok_or(AmmError::Overflow("token decimals scale overflow"))?;
        let raw = U256::from(supply)
            .checked_mul(scale)
            .ok_or(AmmError::Overflow("token supply overflow"))?;
        let total_supply = Amount::from_u256(raw);

        self.nonce += 1;
        let address = Self::token_address(self.nonce);

        self.tokens.insert(
            address,
            TokenInfo {
                name: name.to_owned(),
                symbol: symbol.to_owned(),
                decimals,
                total_supply,
            },
        );
        if !total_supply.is_zero() {
            self.balances.insert((address, owner), total_supply);
        }

        info!("deployed token {symbol} at {address} with supply {total_supply} to {owner}");
        Ok(address)
    }

    /// Creates `amount` new units of `token` for `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TransferFailed`] if the token is unknown.
    /// - [`AmmError::Overflow`] if the supply or balance overflows.
    pub fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        let info = self
            .tokens
            .get(&token)
            .ok_or(AmmError::TransferFailed("unknown token"))?;
        let new_supply = info.total_supply.safe_add(&amount)?;
        let new_balance = self.balance_of(token, to).safe_add(&amount)?;

        if let Some(info) = self.tokens.get_mut(&token) {
            info.total_supply = new_supply;
        }
        self.balances.insert((token, to), new_balance);
        Ok(())
    }

    /// Returns the metadata of `token`, if deployed here.
    #[must_use]
    pub fn token_info(&self, token: Address) -> Option<&TokenInfo> {
        self.tokens.get(&token)
    }

    /// Iterates over every deployed token address in address order.
    pub fn tokens(&self) -> impl Iterator<Item = Address> + '_ {
        self.tokens.keys().copied()
    }

    fn token_address(nonce: u64) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(TOKEN_ADDRESS_TAG);
        hasher.update(nonce.to_be_bytes());
        Address::from_bytes(hasher.finalize().into())
    }

    fn ensure_token(&self, token: Address) -> Result<(), AmmError> {
        if self.tokens.contains_key(&token) {
            Ok(())
        } else {
            Err(AmmError::TransferFailed("unknown token"))
        }
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, token: Address, holder: Address) -> Amount {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.ensure_token(token)?;
        self.allowances.insert((token, owner, spender), amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.ensure_token(token)?;
        let from_balance = self.balance_of(token, from);
        let new_from = from_balance
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient balance"))?;
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(token, to)
            .checked_add(&amount)
            .ok_or(AmmError::TransferFailed("recipient balance overflow"))?;

        self.balances.insert((token, from), new_from);
        self.balances.insert((token, to), new_to);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.ensure_token(token)?;
        let remaining = self
            .allowance(token, from, spender)
            .checked_sub(&amount)
            .ok_or(AmmError::TransferFailed("insufficient allowance"))?;
        self.transfer(token, from, to, amount)?;
        self.allowances.insert((token, from, spender), remaining);
        Ok(())
    }
}
