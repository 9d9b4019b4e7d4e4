//! A minimal programmable-transaction model: a list of Move calls.
//!
//! The signer is responsible for gas selection, serialization to BCS and
//! signing; this side only describes which entry points to call and with
//! which arguments.

use dropit_core::constants::CLOCK_OBJECT_ID;
use dropit_core::{ObjectId, PackageId, SuiAddress};
use serde::{Deserialize, Serialize};

/// A single argument to a Move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// A pure value, BCS-encoded by the signer as a Move `String`.
    Pure(String),
    /// A reference to an existing ledger object.
    Object(ObjectId),
}

impl CallArg {
    pub fn pure_string(value: impl Into<String>) -> Self {
        Self::Pure(value.into())
    }

    pub fn object(id: impl Into<ObjectId>) -> Self {
        Self::Object(id.into())
    }

    /// The shared clock object.
    pub fn clock() -> Self {
        Self::Object(ObjectId::new(CLOCK_OBJECT_ID))
    }
}

/// A call to `<package>::<module>::<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub package: PackageId,
    pub module: String,
    pub function: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    pub fn new(package: PackageId, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package,
            module: module.into(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: CallArg) -> Self {
        self.arguments.push(arg);
        self
    }

    #[must_use]
    pub fn with_type_argument(mut self, type_arg: impl Into<String>) -> Self {
        self.type_arguments.push(type_arg.into());
        self
    }

    /// Fully qualified target, e.g. `0x2::video::create_video`.
    pub fn target(&self) -> String {
        self.package.target(&self.module, &self.function)
    }
}

/// An unsigned transaction made of Move calls executed in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SuiAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,
    pub calls: Vec<MoveCall>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transaction with exactly one call.
    pub fn single(call: MoveCall) -> Self {
        Self {
            calls: vec![call],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_call(mut self, call: MoveCall) -> Self {
        self.calls.push(call);
        self
    }

    #[must_use]
    pub fn with_sender(mut self, sender: SuiAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    #[must_use]
    pub fn with_gas_budget(mut self, budget: u64) -> Self {
        self.gas_budget = Some(budget);
        self
    }
}
