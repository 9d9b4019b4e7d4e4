//! In-memory stand-ins for the oracle, ledger, wallet and blob store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use dropit_core::{BlobId, Frost, ObjectId, SuiAddress, TransactionDigest};
use dropit_sui::{Balance, LedgerReader, ObjectQuery, OwnedObjectsPage, SuiError, Transaction, WalletSigner};
use dropit_walrus::{BlobPublisher, PriceOracle, StorageCost, StoreOutcome, StoredBlob, WalrusError};
use tokio::sync::oneshot;

pub(crate) fn wal(frost: u64) -> Balance {
    Balance {
        coin_type: "0x8270feb7375eee355e64fdb69c50abb6b5f9393a722883c1cf45f8e26048810a::wal::WAL"
            .into(),
        coin_object_count: 1,
        total_balance: Frost::new(frost),
    }
}

/// Price oracle with per-size answers and optional gates that hold a quote
/// until released.
pub(crate) struct GatedOracle {
    default_total: u64,
    responses: Mutex<HashMap<u64, Result<u64, String>>>,
    gates: Mutex<HashMap<u64, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<(u64, u32)>>,
}

impl GatedOracle {
    pub fn with_total(total: u64) -> Self {
        Self {
            default_total: total,
            responses: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, size: u64, total: Result<u64, String>) {
        self.responses.lock().unwrap().insert(size, total);
    }

    /// Hold quotes for `size` until the returned sender fires.
    pub fn gate(&self, size: u64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(size, rx);
        tx
    }

    pub fn calls(&self) -> Vec<(u64, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceOracle for GatedOracle {
    async fn quote(&self, size: u64, epochs: u32) -> Result<StorageCost, WalrusError> {
        self.calls.lock().unwrap().push((size, epochs));
        let gate = self.gates.lock().unwrap().remove(&size);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let answer = self
            .responses
            .lock()
            .unwrap()
            .get(&size)
            .cloned()
            .unwrap_or(Ok(self.default_total));
        let total = answer.map_err(WalrusError::Pricing)?;
        Ok(StorageCost {
            storage_cost: Frost::new(total),
            write_cost: Frost::ZERO,
            total_cost: Frost::new(total),
        })
    }
}

/// Ledger with canned balances and a queue of owned-object pages.
pub(crate) struct StubLedger {
    balances: Result<Vec<Balance>, String>,
    owner_balances: Mutex<HashMap<String, Vec<Balance>>>,
    balance_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    pages: Mutex<Vec<OwnedObjectsPage>>,
    pub queries: Mutex<Vec<(SuiAddress, ObjectQuery)>>,
}

impl StubLedger {
    pub fn with_balances(balances: Vec<Balance>) -> Self {
        Self {
            balances: Ok(balances),
            owner_balances: Mutex::new(HashMap::new()),
            balance_gates: Mutex::new(HashMap::new()),
            pages: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            balances: Err(message.to_owned()),
            owner_balances: Mutex::new(HashMap::new()),
            balance_gates: Mutex::new(HashMap::new()),
            pages: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Pages are served in order; the last one repeats.
    pub fn with_pages(pages: Vec<serde_json::Value>) -> Self {
        let pages = pages
            .into_iter()
            .map(|p| serde_json::from_value(p).unwrap())
            .collect();
        Self {
            balances: Ok(Vec::new()),
            owner_balances: Mutex::new(HashMap::new()),
            balance_gates: Mutex::new(HashMap::new()),
            pages: Mutex::new(pages),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Serve `balances` for `owner` instead of the default answer.
    pub fn balances_for(&self, owner: &str, balances: Vec<Balance>) {
        self.owner_balances
            .lock()
            .unwrap()
            .insert(owner.to_owned(), balances);
    }

    /// Hold balance lookups for `owner` until the returned sender fires.
    pub fn gate_owner(&self, owner: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.balance_gates
            .lock()
            .unwrap()
            .insert(owner.to_owned(), rx);
        tx
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerReader for StubLedger {
    async fn get_all_balances(&self, owner: &SuiAddress) -> Result<Vec<Balance>, SuiError> {
        let gate = self.balance_gates.lock().unwrap().remove(owner.as_str());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(balances) = self.owner_balances.lock().unwrap().get(owner.as_str()) {
            return Ok(balances.clone());
        }
        self.balances.clone().map_err(|message| SuiError::Rpc {
            code: -32000,
            message,
        })
    }

    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        query: &ObjectQuery,
    ) -> Result<OwnedObjectsPage, SuiError> {
        self.queries
            .lock()
            .unwrap()
            .push((owner.clone(), query.clone()));
        let mut pages = self.pages.lock().unwrap();
        let page = if pages.len() > 1 {
            pages.remove(0)
        } else {
            pages.first().cloned().unwrap_or_default()
        };
        Ok(page)
    }
}

/// Wallet that records every transaction it is asked to sign.
pub(crate) struct RecordingWallet {
    address: SuiAddress,
    result: Result<String, String>,
    pub transactions: Mutex<Vec<Transaction>>,
}

impl RecordingWallet {
    pub fn approving(address: &str) -> Self {
        Self {
            address: SuiAddress::new(address),
            result: Ok("D1g3st".to_owned()),
            transactions: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(address: &str, message: &str) -> Self {
        Self {
            address: SuiAddress::new(address),
            result: Err(message.to_owned()),
            transactions: Mutex::new(Vec::new()),
        }
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletSigner for RecordingWallet {
    fn address(&self) -> &SuiAddress {
        &self.address
    }

    async fn sign_and_execute(&self, tx: &Transaction) -> Result<TransactionDigest, SuiError> {
        self.transactions.lock().unwrap().push(tx.clone());
        self.result
            .clone()
            .map(TransactionDigest::new)
            .map_err(SuiError::Signer)
    }
}

/// Blob store with a canned reply and an optional gate.
pub(crate) struct StubPublisher {
    reply: Result<Option<StoredBlob>, String>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub uploads: Mutex<Vec<(Bytes, u32)>>,
}

impl StubPublisher {
    fn new(reply: Result<Option<StoredBlob>, String>) -> Self {
        Self {
            reply,
            gate: Mutex::new(None),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn storing(blob_id: &str, outcome: StoreOutcome) -> Self {
        Self::new(Ok(Some(StoredBlob {
            blob_id: BlobId::new(blob_id),
            outcome,
            object_id: Some(ObjectId::new("0xb10b")),
            end_epoch: None,
            cost: None,
        })))
    }

    pub fn without_blob_id() -> Self {
        Self::new(Ok(None))
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(Err(reason.to_owned()))
    }

    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobPublisher for StubPublisher {
    async fn store_blob(&self, data: Bytes, epochs: u32) -> Result<StoredBlob, WalrusError> {
        self.uploads.lock().unwrap().push((data, epochs));
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match &self.reply {
            Ok(Some(stored)) => Ok(stored.clone()),
            Ok(None) => Err(WalrusError::MissingBlobId),
            Err(reason) => Err(WalrusError::Status {
                operation: "upload",
                status: 500,
                reason: reason.clone(),
            }),
        }
    }
}
