//! Per-operation transfer journal with compensating rollback.
//!
//! A pair operation performs up to two ledger transfers.  Each single
//! transfer is atomic, but the pair of them is not: if the second leg fails
//! the first has already moved funds.  [`TransferJournal`] records every
//! completed leg and, unless [`commit`](TransferJournal::commit) is called,
//! reverses them in reverse order when dropped.  Pair state is only
//! written after `commit`, so a failed operation leaves both the pair and
//! the ledger as they were.
//!
//! That guarantee holds only while the ledger accepts the compensating
//! transfers.  [`settle`](TransferJournal::settle) reports a reversal the
//! ledger refused as [`AmmError::InvariantViolation`] instead of the
//! original transfer error, so callers can tell a clean failure from a
//! ledger left partially changed.

use log::{error, warn};

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::TokenLedger;

/// One completed transfer.
#[derive(Debug, Clone, Copy)]
struct Leg {
    token: Address,
    from: Address,
    to: Address,
    amount: Amount,
    /// `(spender, allowance before the pull)` for `transfer_from` legs.
    allowance: Option<(Address, Amount)>,
}

/// Records completed transfers and reverses them unless committed.
pub(crate) struct TransferJournal<'a, L: TokenLedger + ?Sized> {
    ledger: &'a mut L,
    legs: Vec<Leg>,
}

impl<'a, L: TokenLedger + ?Sized> TransferJournal<'a, L> {
    pub(crate) fn new(ledger: &'a mut L) -> Self {
        Self {
            ledger,
            legs: Vec::with_capacity(2),
        }
    }

    /// Draws `amount` of `token` from `from` into `spender`, using the
    /// allowance `from` granted `spender`.
    pub(crate) fn pull(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let prior = self.ledger.allowance(token, from, spender);
        self.ledger
            .transfer_from(token, spender, from, spender, amount)?;
        self.legs.push(Leg {
            token,
            from,
            to: spender,
            amount,
            allowance: Some((spender, prior)),
        });
        Ok(())
    }

    /// Sends `amount` of `token` from `from` to `to`.
    pub(crate) fn push(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.ledger.transfer(token, from, to, amount)?;
        self.legs.push(Leg {
            token,
            from,
            to,
            amount,
            allowance: None,
        });
        Ok(())
    }

    /// Accepts every recorded leg; nothing will be reversed.
    pub(crate) fn commit(mut self) {
        self.legs.clear();
    }

    /// Commits on `Ok`; on `Err` reverses every recorded leg and returns
    /// the original error.
    ///
    /// # Errors
    ///
    /// - The error in `outcome`, once every leg has been reversed.
    /// - [`AmmError::InvariantViolation`] if the ledger refused any
    ///   compensating transfer or allowance restore.
    pub(crate) fn settle(mut self, outcome: Result<(), AmmError>) -> Result<(), AmmError> {
        match outcome {
            Ok(()) => {
                self.commit();
                Ok(())
            }
            Err(err) => {
                if self.rollback() {
                    Err(err)
                } else {
                    Err(AmmError::InvariantViolation("ledger rollback incomplete"))
                }
            }
        }
    }

    /// Reverses all recorded legs; `false` if any reversal failed.
    fn rollback(&mut self) -> bool {
        if self.legs.is_empty() {
            return true;
        }
        warn!("rolling back {} ledger transfer(s)", self.legs.len());
        let mut clean = true;
        while let Some(leg) = self.legs.pop() {
            if let Err(err) = self.ledger.transfer(leg.token, leg.to, leg.from, leg.amount) {
                error!(
                    "failed to reverse transfer of {} {} from {} to {}: {err}",
                    leg.amount, leg.token, leg.from, leg.to
                );
                clean = false;
                continue;
            }
            if let Some((spender, prior)) = leg.allowance {
                if let Err(err) = self.ledger.approve(leg.token, leg.from, spender, prior) {
                    error!("failed to restore allowance of {spender} on {}: {err}", leg.token);
                    clean = false;
                }
            }
        }
        clean
    }
}

impl<L: TokenLedger + ?Sized> Drop for TransferJournal<'_, L> {
    fn drop(&mut self) {
        let _ = self.rollback();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn user() -> Address {
        Address::from_low_u64(10)
    }

    fn pool() -> Address {
        Address::from_low_u64(20)
    }

    fn setup() -> (MemoryLedger, Address, Address) {
        let mut ledger = MemoryLedger::new();
        let (Ok(a), Ok(b)) = (
            ledger.deploy_token("A", "A", 0, 1_000, user()),
            ledger.deploy_token("B", "B", 0, 1_000, user()),
        ) else {
            panic!("deploy failed");
        };
        (ledger, a, b)
    }

    #[test]
    fn committed_legs_stay() {
        let (mut ledger, a, _) = setup();
        let Ok(()) = ledger.approve(a, user(), pool(), Amount::new(100)) else {
            panic!("approve failed");
        };
        {
            let mut journal = TransferJournal::new(&mut ledger);
            let Ok(()) = journal.pull(a, pool(), user(), Amount::new(40)) else {
                panic!("pull failed");
            };
            journal.commit();
        }
        assert_eq!(ledger.balance_of(a, pool()), Amount::new(40));
        assert_eq!(ledger.allowance(a, user(), pool()), Amount::new(60));
    }

    #[test]
    fn dropped_journal_reverses_pull_and_allowance() {
        let (mut ledger, a, b) = setup();
        let Ok(()) = ledger.approve(a, user(), pool(), Amount::new(100)) else {
            panic!("approve failed");
        };
        {
            let mut journal = TransferJournal::new(&mut ledger);
            let Ok(()) = journal.pull(a, pool(), user(), Amount::new(40)) else {
                panic!("pull failed");
            };
            // second leg fails: the pool holds no B
            let result = journal.push(b, pool(), user(), Amount::new(1));
            assert_eq!(result, Err(AmmError::TransferFailed("insufficient balance")));
        }
        assert_eq!(ledger.balance_of(a, pool()), Amount::ZERO);
        assert_eq!(ledger.balance_of(a, user()), Amount::new(1_000));
        assert_eq!(ledger.allowance(a, user(), pool()), Amount::new(100));
    }

    #[test]
    fn dropped_journal_reverses_pushes_in_reverse_order() {
        let (mut ledger, a, b) = setup();
        let (Ok(()), Ok(())) = (
            ledger.transfer(a, user(), pool(), Amount::new(5)),
            ledger.transfer(b, user(), pool(), Amount::new(5)),
        ) else {
            panic!("funding failed");
        };
        {
            let mut journal = TransferJournal::new(&mut ledger);
            let (Ok(()), Ok(())) = (
                journal.push(a, pool(), user(), Amount::new(5)),
                journal.push(b, pool(), user(), Amount::new(5)),
            ) else {
                panic!("push failed");
            };
        }
        assert_eq!(ledger.balance_of(a, pool()), Amount::new(5));
        assert_eq!(ledger.balance_of(b, pool()), Amount::new(5));
    }

    /// Delegates to a [`MemoryLedger`] and refuses every plain `transfer`
    /// once `transfers_left` reaches zero.
    struct ExhaustibleLedger {
        inner: MemoryLedger,
        transfers_left: usize,
    }

    impl TokenLedger for ExhaustibleLedger {
        fn balance_of(&self, token: Address, holder: Address) -> Amount {
            self.inner.balance_of(token, holder)
        }

        fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
            self.inner.allowance(token, owner, spender)
        }

        fn approve(
            &mut self,
            token: Address,
            owner: Address,
            spender: Address,
            amount: Amount,
        ) -> Result<(), AmmError> {
            self.inner.approve(token, owner, spender, amount)
        }

        fn transfer(
            &mut self,
            token: Address,
            from: Address,
            to: Address,
            amount: Amount,
        ) -> Result<(), AmmError> {
            if self.transfers_left == 0 {
                return Err(AmmError::TransferFailed("ledger frozen"));
            }
            self.transfers_left -= 1;
            self.inner.transfer(token, from, to, amount)
        }

        fn transfer_from(
            &mut self,
            token: Address,
            spender: Address,
            from: Address,
            to: Address,
            amount: Amount,
        ) -> Result<(), AmmError> {
            self.inner.transfer_from(token, spender, from, to, amount)
        }
    }

    fn funded_pool() -> (ExhaustibleLedger, Address, Address) {
        let (mut inner, a, b) = setup();
        let (Ok(()), Ok(())) = (
            inner.transfer(a, user(), pool(), Amount::new(5)),
            inner.transfer(b, user(), pool(), Amount::new(5)),
        ) else {
            panic!("funding failed");
        };
        (
            ExhaustibleLedger {
                inner,
                transfers_left: usize::MAX,
            },
            a,
            b,
        )
    }

    #[test]
    fn settle_ok_commits() {
        let (mut ledger, a, b) = funded_pool();
        let mut journal = TransferJournal::new(&mut ledger);
        let moved = journal
            .push(a, pool(), user(), Amount::new(5))
            .and_then(|()| journal.push(b, pool(), user(), Amount::new(5)));
        assert_eq!(journal.settle(moved), Ok(()));
        assert_eq!(ledger.balance_of(a, pool()), Amount::ZERO);
        assert_eq!(ledger.balance_of(b, pool()), Amount::ZERO);
    }

    #[test]
    fn settle_err_reverses_and_returns_original_error() {
        let (mut ledger, a, b) = funded_pool();
        let mut journal = TransferJournal::new(&mut ledger);
        let moved = journal
            .push(a, pool(), user(), Amount::new(5))
            .and_then(|()| journal.push(b, pool(), user(), Amount::new(6)));
        assert_eq!(
            journal.settle(moved),
            Err(AmmError::TransferFailed("insufficient balance"))
        );
        assert_eq!(ledger.balance_of(a, pool()), Amount::new(5));
    }

    #[test]
    fn refused_reversal_is_reported() {
        let (mut ledger, a, b) = funded_pool();
        // first push succeeds, second push and the reversal are refused
        ledger.transfers_left = 1;
        let mut journal = TransferJournal::new(&mut ledger);
        let moved = journal
            .push(a, pool(), user(), Amount::new(5))
            .and_then(|()| journal.push(b, pool(), user(), Amount::new(5)));
        assert_eq!(moved, Err(AmmError::TransferFailed("ledger frozen")));
        assert_eq!(
            journal.settle(moved),
            Err(AmmError::InvariantViolation("ledger rollback incomplete"))
        );
        assert_eq!(ledger.balance_of(a, pool()), Amount::ZERO);
        assert_eq!(ledger.balance_of(a, user()), Amount::new(1_000));
    }
}
