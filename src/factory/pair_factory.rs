//! Registry that creates and indexes constant-product pairs.

use std::collections::BTreeMap;
use std::fmt;

use log::info;
use sha2::{Digest, Sha256};

use crate::config::PairConfig;
use crate::domain::{Address, TokenPair};
use crate::error::AmmError;
use crate::events::PairCreated;
use crate::pools::Pair;

/// Stable reference to a pair owned by a [`PairFactory`].
///
/// Handles are creation indices; they stay valid for the factory's
/// lifetime because pairs are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairHandle(usize);

impl PairHandle {
    /// Position of the pair in creation order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PairHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair#{}", self.0)
    }
}

/// Creates at most one [`Pair`] per unordered token pair and keeps them in
/// creation order.
///
/// Every pair is stamped from the factory's blueprint [`PairConfig`] and
/// initialised with its tokens in canonical order.  Lookups are symmetric:
/// `get_pair(a, b) == get_pair(b, a)`.
///
/// # Event Log
///
/// Each creation appends a [`PairCreated`] that stays in the log until
/// [`drain_events`](Self::drain_events) is called.  The log is unbounded.
///
/// # Example
///
/// ```rust
/// use uviswap::config::PairConfig;
/// use uviswap::domain::Address;
/// use uviswap::factory::PairFactory;
///
/// let mut factory = PairFactory::new(Address::from_low_u64(1), PairConfig::default())
///     .expect("valid blueprint");
/// let (a, b) = (Address::from_low_u64(10), Address::from_low_u64(20));
///
/// let handle = factory.create_pair(a, b).expect("new pair");
/// assert_eq!(factory.pairs_length(), 1);
/// assert_eq!(factory.get_pair(b, a), Some(handle));
/// assert_eq!(factory.all_pairs(0), Ok(handle));
/// ```
#[derive(Debug, Clone)]
pub struct PairFactory {
    address: Address,
    blueprint: PairConfig,
    pairs: Vec<Pair>,
    index: BTreeMap<TokenPair, PairHandle>,
    events: Vec<PairCreated>,
}

impl PairFactory {
    /// Creates an empty factory at `address` that stamps pairs from
    /// `blueprint`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PairConfig::validate`].
    pub fn new(address: Address, blueprint: PairConfig) -> Result<Self, AmmError> {
        blueprint.validate()?;
        Ok(Self {
            address,
            blueprint,
            pairs: Vec::new(),
            index: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    /// The factory's own identity, mixed into every pair address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The configuration every new pair is stamped from.
    #[must_use]
    pub const fn blueprint(&self) -> &PairConfig {
        &self.blueprint
    }

    /// Creates, initialises and registers the pair for `token_a` and
    /// `token_b`, in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalTokens`] if the tokens are equal.
    /// - [`AmmError::ZeroAddress`] if either token is the zero address.
    /// - [`AmmError::PairExists`] if the pair was already created.
    pub fn create_pair(&mut self, token_a: Address, token_b: Address) -> Result<PairHandle, AmmError> {
        let tokens = TokenPair::new(token_a, token_b)?;
        if tokens.token0().is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if self.index.contains_key(&tokens) {
            return Err(AmmError::PairExists);
        }

        let address = self.derive_address(&tokens);
        let mut pair = Pair::new(address, &self.blueprint)?;
        pair.initialize(tokens.token0(), tokens.token1())?;

        let handle = PairHandle(self.pairs.len());
        self.pairs.push(pair);
        self.index.insert(tokens, handle);

        let event = PairCreated {
            token0: tokens.token0(),
            token1: tokens.token1(),
            pair: address,
            handle,
            index: handle.index(),
        };
        info!("factory {}: {event}", self.address);
        self.events.push(event);
        Ok(handle)
    }

    /// The pair registered for the two tokens, in either order.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<PairHandle> {
        let tokens = TokenPair::new(token_a, token_b).ok()?;
        self.index.get(&tokens).copied()
    }

    /// The `i`-th pair in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IndexOutOfRange`] if `i >= pairs_length()`.
    pub fn all_pairs(&self, i: usize) -> Result<PairHandle, AmmError> {
        if i < self.pairs.len() {
            Ok(PairHandle(i))
        } else {
            Err(AmmError::IndexOutOfRange)
        }
    }

    /// Number of pairs created so far.
    #[must_use]
    pub fn pairs_length(&self) -> usize {
        self.pairs.len()
    }

    /// Borrows the pair behind `handle`.
    #[must_use]
    pub fn pair(&self, handle: PairHandle) -> Option<&Pair> {
        self.pairs.get(handle.0)
    }

    /// Mutably borrows the pair behind `handle`.
    pub fn pair_mut(&mut self, handle: PairHandle) -> Option<&mut Pair> {
        self.pairs.get_mut(handle.0)
    }

    /// All pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PairHandle, &Pair)> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| (PairHandle(i), pair))
    }

    /// Address the pair of `token_a` and `token_b` has, or would have,
    /// under this factory.  Argument order does not matter.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalTokens`] if the tokens are equal.
    pub fn pair_address_for(&self, token_a: Address, token_b: Address) -> Result<Address, AmmError> {
        Ok(self.derive_address(&TokenPair::new(token_a, token_b)?))
    }

    /// `SHA-256(factory ‖ token0 ‖ token1)`.
    fn derive_address(&self, tokens: &TokenPair) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(self.address.as_bytes());
        hasher.update(tokens.token0().as_bytes());
        hasher.update(tokens.token1().as_bytes());
        Address::from_bytes(hasher.finalize().into())
    }

    /// Creation events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[PairCreated] {
        &self.events
    }

    /// Takes all recorded creation events.
    pub fn drain_events(&mut self) -> Vec<PairCreated> {
        std::mem::take(&mut self.events)
    }
}
