//! Constant-product pair (Uniswap V2 style).
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two tokens.  The fee is taken from the input amount and stays in
//! the pool; no party skims it.
//!
//! # Swap Algorithm (token0 → token1)
//!
//! With `D = 10 000` and `W = D − fee_bps`:
//!
//! 1. `amount_in_with_fee = amount_in × W`
//! 2. `amount_out = reserve1 × amount_in_with_fee / (reserve0 × D + amount_in_with_fee)`
//! 3. `reserve0 += amount_in` (fee stays in the pool)
//! 4. `reserve1 -= amount_out`
//!
//! Rounding happens exactly once, on the final division.
//!
//! # Share Accounting
//!
//! - First deposit: `shares = ⌊√(amount0 × amount1)⌋`.
//! - Later deposits: `shares = min(amount0 × S / reserve0, amount1 × S / reserve1)`.
//! - Burn: `amount_i = shares × reserve_i / S`.
//!
//! # Invariants
//!
//! - `reserve0 == 0 && reserve1 == 0` ⇔ `total_supply == 0`.
//! - `Σ balance_of(h) == total_supply`.
//! - After every swap, `k_after ≥ k_before`, strictly for a non-zero fee.
//!
//! # Atomicity
//!
//! Each operation validates and computes every new value first, moves
//! funds through a [`TransferJournal`], and writes its own state only
//! after the journal commits.  Any error leaves the pair and the ledger
//! unchanged, provided the ledger accepts the compensating transfers; a
//! refused reversal surfaces as [`AmmError::InvariantViolation`].

use std::collections::HashMap;

use log::{debug, info};

use crate::config::PairConfig;
use crate::domain::{Address, Amount, FeeTier, Shares, SwapResult, TokenPair, Withdrawal};
use crate::error::AmmError;
use crate::events::PairEvent;
use crate::ledger::TransferJournal;
use crate::math::{isqrt, mul_div, CheckedArithmetic, U256};
use crate::traits::TokenLedger;

/// A constant-product liquidity pool over two tokens (`x · y = k`).
///
/// Created from a [`PairConfig`] blueprint, then bound to its tokens once
/// with [`initialize`](Self::initialize).  The pair owns its reserve
/// counters and share ledger; token balances live in a [`TokenLedger`]
/// passed to each mutating call.
///
/// # State
///
/// - `reserve0` / `reserve1` — pooled balances, fees included
/// - `total_supply` — outstanding liquidity shares
/// - `balances` — shares per holder (zero balances are pruned)
///
/// # Event Log
///
/// Every successful operation appends a [`PairEvent`].  The log is
/// unbounded and is only emptied by [`drain_events`](Self::drain_events);
/// hosts that keep a pair alive indefinitely must drain it periodically.
///
/// # Example
///
/// ```rust
/// use uviswap::config::PairConfig;
/// use uviswap::domain::{Address, Amount};
/// use uviswap::ledger::MemoryLedger;
/// use uviswap::pools::Pair;
/// use uviswap::traits::TokenLedger;
///
/// let lp = Address::from_low_u64(1);
/// let mut ledger = MemoryLedger::new();
/// let usdt = ledger.deploy_token("USDT", "USDT", 18, 1_000, lp).expect("deployed");
/// let usdc = ledger.deploy_token("USDC", "USDC", 18, 1_000, lp).expect("deployed");
///
/// let mut pair = Pair::new(Address::from_low_u64(99), &PairConfig::default()).expect("valid");
/// pair.initialize(usdt, usdc).expect("fresh pair");
///
/// let amount = Amount::new(500 * 10u128.pow(18));
/// ledger.approve(usdt, lp, pair.address(), amount).expect("approved");
/// ledger.approve(usdc, lp, pair.address(), amount).expect("approved");
///
/// let shares = pair.add_liquidity(&mut ledger, lp, amount, amount).expect("minted");
/// assert_eq!(shares.get(), amount.get());
/// assert_eq!(pair.reserves(), (amount, amount));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    address: Address,
    fee_tier: FeeTier,
    tokens: Option<TokenPair>,
    reserve0: Amount,
    reserve1: Amount,
    total_supply: Shares,
    balances: HashMap<Address, Shares>,
    events: Vec<PairEvent>,
}

/// Everything a swap will change, computed before any transfer.
#[derive(Debug, Clone, Copy)]
struct SwapPlan {
    token_in: Address,
    token_out: Address,
    amount_out: Amount,
    reserve0: Amount,
    reserve1: Amount,
}

impl Pair {
    /// Creates an empty, uninitialised pair living at `address`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PairConfig::validate`].
    pub fn new(address: Address, config: &PairConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            address,
            fee_tier: config.fee_tier(),
            tokens: None,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            total_supply: Shares::ZERO,
            balances: HashMap::new(),
            events: Vec::new(),
        })
    }

    /// Binds the pair to its two tokens.  Callable exactly once.
    ///
    /// The tokens are stored in canonical order regardless of argument
    /// order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] on a second call.
    /// - [`AmmError::IdenticalTokens`] if both tokens are equal.
    pub fn initialize(&mut self, token0: Address, token1: Address) -> Result<(), AmmError> {
        if self.tokens.is_some() {
            return Err(AmmError::AlreadyInitialized);
        }
        let tokens = TokenPair::new(token0, token1)?;
        self.tokens = Some(tokens);
        info!(
            "pair {} initialized with {} / {} at {}",
            self.address,
            tokens.token0(),
            tokens.token1(),
            self.fee_tier
        );
        Ok(())
    }

    // -- readers ------------------------------------------------------------

    /// The pair's own holder identity in the token ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// `true` once [`initialize`](Self::initialize) has succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.tokens.is_some()
    }

    /// The canonical token pair, if initialised.
    #[must_use]
    pub const fn token_pair(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    /// Lower-addressed token; the zero address before initialisation.
    #[must_use]
    pub fn token0(&self) -> Address {
        self.tokens.map_or_else(Address::zero, |t| t.token0())
    }

    /// Higher-addressed token; the zero address before initialisation.
    #[must_use]
    pub fn token1(&self) -> Address {
        self.tokens.map_or_else(Address::zero, |t| t.token1())
    }

    /// Pooled amount of token0.
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// Pooled amount of token1.
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }

    /// Both reserves, `(reserve0, reserve1)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    /// Outstanding liquidity shares.
    pub const fn total_supply(&self) -> Shares {
        self.total_supply
    }

    /// Shares held by `holder`.
    pub fn balance_of(&self, holder: Address) -> Shares {
        self.balances.get(&holder).copied().unwrap_or(Shares::ZERO)
    }

    /// The swap fee stamped from the blueprint.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// The constant product `reserve0 × reserve1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds 256 bits.
    pub fn k(&self) -> Result<U256, AmmError> {
        Ok(self.reserve0.safe_mul(&self.reserve1)?.get())
    }

    /// Events recorded since the last [`drain_events`](Self::drain_events).
    #[must_use]
    pub fn events(&self) -> &[PairEvent] {
        &self.events
    }

    /// Takes all recorded events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<PairEvent> {
        std::mem::take(&mut self.events)
    }

    fn tokens(&self) -> Result<TokenPair, AmmError> {
        self.tokens.ok_or(AmmError::NotInitialized)
    }

    // -- liquidity ----------------------------------------------------------

    /// Deposits `amount0` of token0 and `amount1` of token1 from `caller`
    /// and mints liquidity shares to `caller`.
    ///
    /// The caller must have approved the pair (as spender) for both
    /// amounts.  A deposit off the current reserve ratio is credited for
    /// the smaller of the two implied contributions; the surplus stays in
    /// the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before [`initialize`](Self::initialize).
    /// - [`AmmError::ZeroAmount`] if either amount is zero.
    /// - [`AmmError::InsufficientInitialLiquidity`] if the first deposit
    ///   mints zero shares.
    /// - [`AmmError::InsufficientLiquidityMinted`] if a later deposit mints
    ///   zero shares.
    /// - [`AmmError::TransferFailed`] if the ledger refuses a pull.
    /// - [`AmmError::InvariantViolation`] if the ledger then refuses to
    ///   reverse a completed leg.
    /// - [`AmmError::Overflow`] if any arithmetic overflows.
    pub fn add_liquidity<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares, AmmError> {
        let tokens = self.tokens()?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::ZeroAmount);
        }

        let minted = self.shares_for_deposit(amount0, amount1)?;
        let reserve0 = self.reserve0.safe_add(&amount0)?;
        let reserve1 = self.reserve1.safe_add(&amount1)?;
        let total_supply = self.total_supply.safe_add(&minted)?;
        let balance = self.balance_of(caller).safe_add(&minted)?;

        let mut journal = TransferJournal::new(ledger);
        let moved = journal
            .pull(tokens.token0(), self.address, caller, amount0)
            .and_then(|()| journal.pull(tokens.token1(), self.address, caller, amount1));
        journal.settle(moved)?;

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.total_supply = total_supply;
        self.balances.insert(caller, balance);
        self.events.push(PairEvent::Mint {
            sender: caller,
            amount0,
            amount1,
            shares: minted,
        });
        debug!(
            "pair {}: {caller} deposited {amount0} / {amount1}, minted {minted} (supply {total_supply})",
            self.address
        );
        Ok(minted)
    }

    /// Shares a deposit of `(amount0, amount1)` would mint right now.
    fn shares_for_deposit(&self, amount0: Amount, amount1: Amount) -> Result<Shares, AmmError> {
        if self.total_supply.is_zero() {
            let product = amount0.safe_mul(&amount1)?;
            let root = isqrt(product.get()).ok_or(AmmError::Overflow("isqrt overflow"))?;
            if root.is_zero() {
                return Err(AmmError::InsufficientInitialLiquidity);
            }
            return Ok(Shares::from_u256(root));
        }

        let supply = self.total_supply.get();
        let via0 = mul_div(amount0.get(), supply, self.reserve0.get())?;
        let via1 = mul_div(amount1.get(), supply, self.reserve1.get())?;
        let minted = via0.min(via1);
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        Ok(Shares::from_u256(minted))
    }

    /// Token amounts burning `shares` would pay out right now.
    ///
    /// Read-only preview of [`remove_liquidity`](Self::remove_liquidity);
    /// it does not check any holder's balance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before initialisation.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty.
    /// - [`AmmError::InsufficientShares`] if `shares` exceeds the supply.
    pub fn quote_remove(&self, shares: Shares) -> Result<Withdrawal, AmmError> {
        self.tokens()?;
        if self.total_supply.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if shares > self.total_supply {
            return Err(AmmError::InsufficientShares);
        }
        let supply = self.total_supply.get();
        let amount0 = mul_div(shares.get(), self.reserve0.get(), supply)?;
        let amount1 = mul_div(shares.get(), self.reserve1.get(), supply)?;
        Ok(Withdrawal::new(
            Amount::from_u256(amount0),
            Amount::from_u256(amount1),
        ))
    }

    /// Burns `shares` held by `caller` and pays out the proportional share
    /// of both reserves.
    ///
    /// Burning the entire supply pays out the reserves exactly and leaves
    /// the pool empty.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before initialisation.
    /// - [`AmmError::InsufficientShares`] if `shares` is zero or exceeds
    ///   the caller's balance.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    /// - [`AmmError::TransferFailed`] if the ledger refuses a payout.
    /// - [`AmmError::InvariantViolation`] if the ledger then refuses to
    ///   reverse a completed leg.
    pub fn remove_liquidity<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        shares: Shares,
    ) -> Result<Withdrawal, AmmError> {
        let tokens = self.tokens()?;
        let balance = self.balance_of(caller);
        if shares.is_zero() || shares > balance {
            return Err(AmmError::InsufficientShares);
        }

        let payout = self.quote_remove(shares)?;
        if payout.has_empty_side() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        let reserve0 = self.reserve0.safe_sub(&payout.amount0())?;
        let reserve1 = self.reserve1.safe_sub(&payout.amount1())?;
        let total_supply = self.total_supply.safe_sub(&shares)?;
        let remaining = balance.safe_sub(&shares)?;

        let mut journal = TransferJournal::new(ledger);
        let moved = journal
            .push(tokens.token0(), self.address, caller, payout.amount0())
            .and_then(|()| journal.push(tokens.token1(), self.address, caller, payout.amount1()));
        journal.settle(moved)?;

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.total_supply = total_supply;
        self.set_balance(caller, remaining);
        self.events.push(PairEvent::Burn {
            sender: caller,
            amount0: payout.amount0(),
            amount1: payout.amount1(),
            shares,
        });
        debug!(
            "pair {}: {caller} burned {shares} for {payout} (supply {total_supply})",
            self.address
        );
        Ok(payout)
    }

    /// Moves `shares` from `from` to `to`.  Zero is a no-op.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer than
    ///   `shares`.
    /// - [`AmmError::Overflow`] if the recipient balance overflows.
    pub fn transfer_shares(
        &mut self,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<(), AmmError> {
        if shares.is_zero() {
            return Ok(());
        }
        let from_balance = self.balance_of(from);
        if shares > from_balance {
            return Err(AmmError::InsufficientShares);
        }
        if from == to {
            return Ok(());
        }
        let new_from = from_balance.safe_sub(&shares)?;
        let new_to = self.balance_of(to).safe_add(&shares)?;

        self.set_balance(from, new_from);
        self.set_balance(to, new_to);
        self.events.push(PairEvent::Transfer { from, to, shares });
        Ok(())
    }

    fn set_balance(&mut self, holder: Address, shares: Shares) {
        if shares.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, shares);
        }
    }

    // -- swap ---------------------------------------------------------------

    /// Amount of the other token a swap of `amount_in` of `token_in` would
    /// pay out right now.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`swap`](Self::swap).
    pub fn quote_swap(&self, token_in: Address, amount_in: Amount) -> Result<Amount, AmmError> {
        Ok(self.plan_swap(token_in, amount_in)?.amount_out)
    }

    /// Sells `amount_in` of `token_in` from `caller` to the pool and pays
    /// out the other token to `caller`.
    ///
    /// The caller must have approved the pair for `amount_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before initialisation.
    /// - [`AmmError::UnknownToken`] if `token_in` is not in the pair.
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is empty.
    /// - [`AmmError::InsufficientOutputAmount`] if the output rounds to zero.
    /// - [`AmmError::TransferFailed`] if the ledger refuses either leg.
    /// - [`AmmError::InvariantViolation`] if the ledger then refuses to
    ///   reverse a completed leg.
    /// - [`AmmError::InvariantViolation`] if `k` would decrease.
    pub fn swap<L: TokenLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        token_in: Address,
        amount_in: Amount,
    ) -> Result<SwapResult, AmmError> {
        let plan = self.plan_swap(token_in, amount_in)?;
        let fee = self.fee_tier.fee_on(amount_in)?;
        let result = SwapResult::new(plan.token_in, plan.token_out, amount_in, plan.amount_out, fee)?;

        let k_before = self.k()?;
        let k_after = plan.reserve0.safe_mul(&plan.reserve1)?.get();
        if k_after < k_before {
            return Err(AmmError::InvariantViolation("constant product decreased"));
        }

        let mut journal = TransferJournal::new(ledger);
        let moved = journal
            .pull(plan.token_in, self.address, caller, amount_in)
            .and_then(|()| journal.push(plan.token_out, self.address, caller, plan.amount_out));
        journal.settle(moved)?;

        self.reserve0 = plan.reserve0;
        self.reserve1 = plan.reserve1;
        self.events.push(PairEvent::Swap {
            sender: caller,
            token_in,
            amount_in,
            amount_out: plan.amount_out,
        });
        debug!(
            "pair {}: {caller} swapped {amount_in} {token_in} for {} {} (fee {fee})",
            self.address, plan.amount_out, plan.token_out
        );
        Ok(result)
    }

    fn plan_swap(&self, token_in: Address, amount_in: Amount) -> Result<SwapPlan, AmmError> {
        let tokens = self.tokens()?;
        let token_out = tokens.other(&token_in)?;
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if self.total_supply.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let zero_for_one = token_in == tokens.token0();
        let (reserve_in, reserve_out) = if zero_for_one {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        };

        let amount_out = self.compute_amount_out(amount_in, reserve_in, reserve_out)?;
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        let (reserve0, reserve1) = if zero_for_one {
            (new_in, new_out)
        } else {
            (new_out, new_in)
        };

        Ok(SwapPlan {
            token_in,
            token_out,
            amount_out,
            reserve0,
            reserve1,
        })
    }

    /// `reserve_out × amount_in × W / (reserve_in × D + amount_in × W)`.
    fn compute_amount_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        let weight = U256::from(self.fee_tier.retained_weight()?);
        let scale = U256::from(FeeTier::DENOMINATOR);

        let amount_in_with_fee = amount_in
            .get()
            .checked_mul(weight)
            .ok_or(AmmError::Overflow("amount_in with fee overflow"))?;
        let numerator = amount_in_with_fee
            .checked_mul(reserve_out.get())
            .ok_or(AmmError::Overflow("swap numerator overflow"))?;
        let denominator = reserve_in
            .get()
            .checked_mul(scale)
            .and_then(|d| d.checked_add(amount_in_with_fee))
            .ok_or(AmmError::Overflow("swap denominator overflow"))?;
        let amount_out = numerator
            .checked_div(denominator)
            .map(Amount::from_u256)
            .ok_or(AmmError::DivisionByZero)?;

        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }
}
