//! Storage-cost estimation against the user's WAL balance.
//!
//! The estimator owns two independent inputs, the selected file size and the
//! connected account. Changing either starts a background fetch; only the
//! most recently started fetch for an input may write its result, so a slow
//! response for an old file can never replace the quote for the current one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dropit_core::constants::{DEFAULT_EPOCHS, WAL_COIN_TYPE_MARKER};
use dropit_core::{Frost, SuiAddress};
use dropit_sui::{Balance, LedgerReader};
use dropit_walrus::PriceOracle;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const QUOTE_FALLBACK_ERROR: &str = "Failed to estimate cost";

/// Observable state of a [`CostEstimator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostSnapshot {
    /// Quoted cost of the selected file, in FROST.
    pub total_cost: Option<Frost>,
    /// WAL balance of the connected account, in FROST.
    pub wal_balance: Option<Frost>,
    /// A quote request is in flight.
    pub is_loading: bool,
    /// Message of the last failed quote.
    pub error: Option<String>,
}

impl CostSnapshot {
    /// `None` until both the cost and the balance are known.
    pub fn has_sufficient_balance(&self) -> Option<bool> {
        match (self.total_cost, self.wal_balance) {
            (Some(cost), Some(balance)) => Some(balance >= cost),
            _ => None,
        }
    }

    /// How much WAL is missing, when the balance is known to be insufficient.
    pub fn shortfall(&self) -> Option<Frost> {
        match (self.total_cost, self.wal_balance) {
            (Some(cost), Some(balance)) if balance < cost => Some(cost.saturating_sub(balance)),
            _ => None,
        }
    }
}

struct Inner {
    oracle: Arc<dyn PriceOracle>,
    ledger: Arc<dyn LedgerReader>,
    epochs: u32,
    state: watch::Sender<CostSnapshot>,
    cost_generation: AtomicU64,
    balance_generation: AtomicU64,
}

/// Keeps a storage-cost quote and a WAL balance up to date.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CostEstimator {
    inner: Arc<Inner>,
}

impl CostEstimator {
    pub fn new(oracle: Arc<dyn PriceOracle>, ledger: Arc<dyn LedgerReader>, epochs: u32) -> Self {
        let (state, _) = watch::channel(CostSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                oracle,
                ledger,
                epochs: if epochs == 0 { DEFAULT_EPOCHS } else { epochs },
                state,
                cost_generation: AtomicU64::new(0),
                balance_generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn epochs(&self) -> u32 {
        self.inner.epochs
    }

    /// Current state.
    pub fn snapshot(&self) -> CostSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CostSnapshot> {
        self.inner.state.subscribe()
    }

    /// Select a file size. `None` or `0` clears the quote.
    ///
    /// The returned handle completes once the quote (if any) has been applied
    /// or discarded as stale.
    pub fn set_file_size(&self, size: Option<u64>) -> JoinHandle<()> {
        let generation = self.inner.cost_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(size) = size.filter(|s| *s > 0) else {
            self.inner.state.send_modify(|s| {
                s.total_cost = None;
                s.error = None;
                s.is_loading = false;
            });
            return tokio::spawn(async {});
        };

        self.inner.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = inner.oracle.quote(size, inner.epochs).await;
            let committed = inner.state.send_if_modified(|s| {
                if inner.cost_generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                match &result {
                    Ok(cost) => {
                        s.total_cost = Some(cost.total_cost);
                    }
                    Err(e) => {
                        let message = e.to_string();
                        s.total_cost = None;
                        s.error = Some(if message.is_empty() {
                            QUOTE_FALLBACK_ERROR.to_owned()
                        } else {
                            message
                        });
                    }
                }
                s.is_loading = false;
                true
            });
            match (&result, committed) {
                (_, false) => debug!(size, "discarding stale storage quote"),
                (Ok(cost), true) => debug!(size, total = %cost.total_cost, "storage quote applied"),
                (Err(e), true) => warn!(size, error = %e, "storage quote failed"),
            }
        })
    }

    /// Select the account whose WAL balance is tracked. `None` clears it.
    ///
    /// A failed balance lookup leaves the balance unknown without reporting
    /// an error.
    pub fn set_owner(&self, owner: Option<SuiAddress>) -> JoinHandle<()> {
        let generation = self.inner.balance_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(owner) = owner else {
            self.inner.state.send_modify(|s| s.wal_balance = None);
            return tokio::spawn(async {});
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let balance = match inner.ledger.get_all_balances(&owner).await {
                Ok(balances) => Some(wal_balance(&balances)),
                Err(e) => {
                    debug!(owner = %owner, error = %e, "balance lookup failed");
                    None
                }
            };
            inner.state.send_if_modified(|s| {
                if inner.balance_generation.load(Ordering::SeqCst) != generation {
                    return false;
                }
                s.wal_balance = balance;
                true
            });
        })
    }

    /// Apply both inputs and wait for their fetches.
    pub async fn estimate(&self, size: u64, owner: Option<SuiAddress>) -> CostSnapshot {
        let cost = self.set_file_size(Some(size));
        let balance = self.set_owner(owner);
        for handle in [cost, balance] {
            if let Err(e) = handle.await {
                warn!(error = %e, "cost estimation task failed");
            }
        }
        self.snapshot()
    }
}

/// Balance of the first coin type naming WAL; zero when the account holds none.
fn wal_balance(balances: &[Balance]) -> Frost {
    balances
        .iter()
        .find(|b| b.coin_type.contains(WAL_COIN_TYPE_MARKER))
        .map_or(Frost::ZERO, |b| b.total_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GatedOracle, StubLedger, wal};

    fn estimator(oracle: &Arc<GatedOracle>, ledger: &Arc<StubLedger>) -> CostEstimator {
        CostEstimator::new(oracle.clone(), ledger.clone(), 5)
    }

    #[test]
    fn sufficiency_requires_both_sides() {
        let mut snapshot = CostSnapshot::default();
        assert_eq!(snapshot.has_sufficient_balance(), None);
        snapshot.total_cost = Some(Frost::new(10));
        assert_eq!(snapshot.has_sufficient_balance(), None);
        snapshot.wal_balance = Some(Frost::new(10));
        assert_eq!(snapshot.has_sufficient_balance(), Some(true));
        snapshot.wal_balance = Some(Frost::new(9));
        assert_eq!(snapshot.has_sufficient_balance(), Some(false));
        assert_eq!(snapshot.shortfall(), Some(Frost::new(1)));
        snapshot.total_cost = None;
        assert_eq!(snapshot.has_sufficient_balance(), None);
        assert_eq!(snapshot.shortfall(), None);
    }

    #[test]
    fn wal_entry_is_found_by_coin_type() {
        let balances = vec![
            Balance {
                coin_type: "0x2::sui::SUI".into(),
                coin_object_count: 1,
                total_balance: Frost::new(99),
            },
            wal(7),
        ];
        assert_eq!(wal_balance(&balances), Frost::new(7));
        assert_eq!(wal_balance(&balances[..1]), Frost::ZERO);
    }

    #[tokio::test]
    async fn quotes_once_with_size_and_epochs() {
        let oracle = Arc::new(GatedOracle::with_total(1_000));
        let ledger = Arc::new(StubLedger::with_balances(vec![wal(400)]));
        let estimator = estimator(&oracle, &ledger);

        let snapshot = estimator
            .estimate(10 * 1024 * 1024, Some(SuiAddress::new("0xa11ce")))
            .await;

        assert_eq!(oracle.calls(), vec![(10 * 1024 * 1024, 5)]);
        assert_eq!(snapshot.total_cost, Some(Frost::new(1_000)));
        assert_eq!(snapshot.wal_balance, Some(Frost::new(400)));
        assert_eq!(snapshot.has_sufficient_balance(), Some(false));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn stale_quote_does_not_overwrite_newer_size() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        oracle.respond(100, Ok(1));
        oracle.respond(200, Ok(2));
        let release_first = oracle.gate(100);
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);

        let first = estimator.set_file_size(Some(100));
        let second = estimator.set_file_size(Some(200));
        second.await.unwrap();
        assert_eq!(estimator.snapshot().total_cost, Some(Frost::new(2)));

        release_first.send(()).unwrap();
        first.await.unwrap();

        let snapshot = estimator.snapshot();
        assert_eq!(snapshot.total_cost, Some(Frost::new(2)));
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn clearing_size_drops_in_flight_quote() {
        let oracle = Arc::new(GatedOracle::with_total(50));
        let release = oracle.gate(10);
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);

        let pending = estimator.set_file_size(Some(10));
        assert!(estimator.snapshot().is_loading);

        estimator.set_file_size(None).await.unwrap();
        release.send(()).unwrap();
        pending.await.unwrap();

        let snapshot = estimator.snapshot();
        assert_eq!(snapshot.total_cost, None);
        assert_eq!(snapshot.error, None);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn zero_size_clears_without_quoting() {
        let oracle = Arc::new(GatedOracle::with_total(50));
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);

        estimator.set_file_size(Some(0)).await.unwrap();
        assert!(oracle.calls().is_empty());
        assert_eq!(estimator.snapshot(), CostSnapshot::default());
    }

    #[tokio::test]
    async fn quote_failure_sets_error_message() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        oracle.respond(5, Err("Walrus system state not found".into()));
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);

        estimator.set_file_size(Some(5)).await.unwrap();
        let snapshot = estimator.snapshot();
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Walrus system state not found")
        );
        assert_eq!(snapshot.total_cost, None);
        assert!(!snapshot.is_loading);

        // A new selection clears the previous error.
        oracle.respond(6, Ok(9));
        estimator.set_file_size(Some(6)).await.unwrap();
        assert_eq!(estimator.snapshot().error, None);
    }

    #[tokio::test]
    async fn empty_quote_error_uses_fallback_message() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        oracle.respond(5, Err(String::new()));
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);

        estimator.set_file_size(Some(5)).await.unwrap();
        assert_eq!(
            estimator.snapshot().error.as_deref(),
            Some("Failed to estimate cost")
        );
    }

    #[tokio::test]
    async fn balance_failure_is_silent() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        let ledger = Arc::new(StubLedger::failing("connection refused"));
        let estimator = estimator(&oracle, &ledger);

        estimator
            .set_owner(Some(SuiAddress::new("0x1")))
            .await
            .unwrap();
        let snapshot = estimator.snapshot();
        assert_eq!(snapshot.wal_balance, None);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn stale_balance_does_not_overwrite_newer_owner() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        ledger.balances_for("0xa", vec![wal(1_000)]);
        ledger.balances_for("0xb", vec![wal(2_000)]);
        let release_first = ledger.gate_owner("0xa");
        let estimator = estimator(&oracle, &ledger);

        let first = estimator.set_owner(Some(SuiAddress::new("0xa")));
        let second = estimator.set_owner(Some(SuiAddress::new("0xb")));
        second.await.unwrap();
        assert_eq!(estimator.snapshot().wal_balance, Some(Frost::new(2_000)));

        release_first.send(()).unwrap();
        first.await.unwrap();

        assert_eq!(estimator.snapshot().wal_balance, Some(Frost::new(2_000)));
    }

    #[tokio::test]
    async fn disconnect_drops_in_flight_balance() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        let ledger = Arc::new(StubLedger::with_balances(vec![wal(500)]));
        let release = ledger.gate_owner("0xa");
        let estimator = estimator(&oracle, &ledger);

        let pending = estimator.set_owner(Some(SuiAddress::new("0xa")));
        estimator.set_owner(None).await.unwrap();
        release.send(()).unwrap();
        pending.await.unwrap();

        assert_eq!(estimator.snapshot().wal_balance, None);
    }

    #[tokio::test]
    async fn account_without_wal_has_zero_balance() {
        let oracle = Arc::new(GatedOracle::with_total(0));
        let ledger = Arc::new(StubLedger::with_balances(vec![Balance {
            coin_type: "0x2::sui::SUI".into(),
            coin_object_count: 1,
            total_balance: Frost::new(5),
        }]));
        let estimator = estimator(&oracle, &ledger);

        estimator
            .set_owner(Some(SuiAddress::new("0x1")))
            .await
            .unwrap();
        assert_eq!(estimator.snapshot().wal_balance, Some(Frost::ZERO));

        estimator.set_owner(None).await.unwrap();
        assert_eq!(estimator.snapshot().wal_balance, None);
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let oracle = Arc::new(GatedOracle::with_total(77));
        let ledger = Arc::new(StubLedger::with_balances(vec![]));
        let estimator = estimator(&oracle, &ledger);
        let mut rx = estimator.subscribe();

        estimator.set_file_size(Some(1)).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_cost, Some(Frost::new(77)));
    }
}
